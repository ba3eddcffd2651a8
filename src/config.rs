//! Runtime configuration
//!
//! Compile-time defaults, overridable by a backend URL remembered in
//! LocalStorage.

use log::LevelFilter;

use crate::web::KeyValueStore;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
const DEFAULT_LOG_LEVEL: &str = "info";

pub const STORAGE_API_BASE_KEY: &str = "emotion_api_base";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Inference backend, without trailing slash
    pub api_base: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Defaults baked in at build time (`EMOTION_API_BASE`, `EMOTION_LOG_LEVEL`)
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("EMOTION_API_BASE"),
            option_env!("EMOTION_LOG_LEVEL"),
        )
    }

    fn from_values(api_base: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base = api_base
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE);
        let log_level = log_level
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .parse()
            .unwrap_or(LevelFilter::Info);

        Self {
            api_base: normalize_base(api_base),
            log_level,
        }
    }

    /// Apply the URL the user entered on a previous visit, if any
    pub fn with_overrides<S: KeyValueStore>(mut self, store: &S) -> Self {
        if let Some(url) = store
            .get(STORAGE_API_BASE_KEY)
            .filter(|u| !u.trim().is_empty())
        {
            self.api_base = normalize_base(&url);
        }
        self
    }

    /// Load build defaults plus stored overrides
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        Self::from_build_env().with_overrides(store)
    }
}

pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Remember a backend URL for the next visit
pub fn remember_api_base<S: KeyValueStore>(store: &S, url: &str) -> bool {
    store.set(STORAGE_API_BASE_KEY, &normalize_base(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStore;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config.api_base, "http://127.0.0.1:5000");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_build_values_are_normalized() {
        let config = AppConfig::from_values(Some("https://api.example.com/"), Some("debug"));
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.log_level, LevelFilter::Debug);

        let config = AppConfig::from_values(Some(""), Some("shouting"));
        assert_eq!(config.api_base, "http://127.0.0.1:5000");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_stored_override_wins() {
        let store = MemoryStore::new();
        assert!(remember_api_base(&store, " http://10.0.0.2:5000/ "));

        let config = AppConfig::from_values(None, None).with_overrides(&store);
        assert_eq!(config.api_base, "http://10.0.0.2:5000");
    }

    #[test]
    fn test_blank_override_ignored() {
        let store = MemoryStore::with(STORAGE_API_BASE_KEY, "   ");
        let config = AppConfig::from_values(None, None).with_overrides(&store);
        assert_eq!(config.api_base, "http://127.0.0.1:5000");
    }
}
