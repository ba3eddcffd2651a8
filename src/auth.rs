//! Authentication module
//!
//! `SessionStore` persists the token; `AuthContext` mirrors it into signals
//! for the views. The router only sees the derived authenticated flag.

use emotion_shared::AuthMode;
use leptos::prelude::*;

use crate::api::EmotionApi;
use crate::config::{self, AppConfig};
use crate::error::AppResult;
use crate::web::{HttpClient, KeyValueStore, LocalStorage};

const STORAGE_TOKEN_KEY: &str = "emotion_token";

// =========================================================
// Session store
// =========================================================

/// Token persistence over a key/value store
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.get(STORAGE_TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) {
        if !self.store.set(STORAGE_TOKEN_KEY, token) {
            log::warn!("[Auth] token could not be persisted");
        }
    }

    pub fn clear_token(&self) {
        self.store.delete(STORAGE_TOKEN_KEY);
    }

    /// True iff a non-empty token is stored
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some_and(|t| !t.is_empty())
    }
}

/// Authenticate and persist the issued token
///
/// Nothing is stored when the backend rejects the credentials.
pub async fn authenticate<C: HttpClient, S: KeyValueStore>(
    api: &EmotionApi<C>,
    session: &SessionStore<S>,
    email: &str,
    password: &str,
    mode: AuthMode,
) -> AppResult<String> {
    let resp = api.authenticate(email, password, mode).await?;
    session.set_token(&resp.token);
    log::info!("[Auth] {:?} succeeded", mode);
    Ok(resp.token)
}

/// Tell the backend to drop the token, then forget it locally
///
/// The remote call is best-effort: a failure is logged and the local session
/// is cleared regardless.
pub async fn end_session<C: HttpClient, S: KeyValueStore>(
    api: &EmotionApi<C>,
    session: &SessionStore<S>,
) {
    if let Err(e) = api.logout().await {
        log::warn!("[Auth] remote logout failed: {}", e);
    }
    session.clear_token();
}

// =========================================================
// Reactive context
// =========================================================

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    /// Backend base URL, also shown and editable on the login page
    pub api_base: String,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn api(&self) -> EmotionApi {
        EmotionApi::new(&self.api_base, self.token.clone())
    }
}

/// Shared through Leptos context
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// Derived flag injected into the router
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::is_authenticated))
    }

    /// API client for the current session
    pub fn api(&self) -> EmotionApi {
        self.state.with_untracked(AuthState::api)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

fn browser_session() -> SessionStore<LocalStorage> {
    SessionStore::new(LocalStorage)
}

/// Load the persisted token and configured backend at startup
pub fn init_auth(ctx: &AuthContext, config: &AppConfig) {
    let session = browser_session();
    let token = session.get_token().filter(|t| !t.is_empty());
    log::debug!("[Auth] restored session: {}", session.is_authenticated());

    ctx.set_state.update(|state| {
        state.token = token;
        state.api_base = config.api_base.clone();
    });
}

/// Log in (or sign up) against `api_base`
///
/// On success the URL is remembered for the next visit and the router's
/// auth redirect takes the user to the dashboard.
pub async fn login(
    ctx: &AuthContext,
    api_base: String,
    email: String,
    password: String,
    mode: AuthMode,
) -> AppResult<()> {
    let api_base = config::normalize_base(&api_base);
    let api = EmotionApi::new(&api_base, None);
    let session = browser_session();

    let token = authenticate(&api, &session, &email, &password, mode).await?;
    config::remember_api_base(&LocalStorage, &api_base);

    ctx.set_state.update(|state| {
        state.token = Some(token);
        state.api_base = api_base;
    });
    Ok(())
}

/// Log out and clear the session
///
/// The router reacts to the flag change and redirects protected views.
pub async fn logout(ctx: &AuthContext) {
    let api = ctx.api();
    end_session(&api, &browser_session()).await;
    ctx.set_state.update(|state| state.token = None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::web::{MemoryStore, MockHttpClient};
    use serde_json::json;

    #[test]
    fn test_authenticated_iff_non_empty_token() {
        let session = SessionStore::new(MemoryStore::new());
        assert!(!session.is_authenticated());

        session.set_token("");
        assert!(!session.is_authenticated());

        session.set_token("abc");
        assert!(session.is_authenticated());
        assert_eq!(session.get_token().as_deref(), Some("abc"));

        session.clear_token();
        assert!(!session.is_authenticated());
        assert_eq!(session.get_token(), None);
    }

    #[test]
    fn test_auth_state_flag() {
        let mut state = AuthState::default();
        assert!(!state.is_authenticated());
        state.token = Some(String::new());
        assert!(!state.is_authenticated());
        state.token = Some("t".to_string());
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn test_authenticate_persists_token() {
        let client = MockHttpClient::new().respond(
            "/auth",
            200,
            json!({"success": true, "token": "tok"}),
        );
        let api = EmotionApi::with_client("http://b", None, client);
        let session = SessionStore::new(MemoryStore::new());

        let token = authenticate(&api, &session, "a@b.c", "pw", AuthMode::Signup)
            .await
            .unwrap();
        assert_eq!(token, "tok");
        assert!(session.is_authenticated());
        assert_eq!(api.client().body_of(0)["mode"], "signup");
    }

    #[tokio::test]
    async fn test_rejected_login_stores_nothing() {
        let client = MockHttpClient::new().respond(
            "/auth",
            401,
            json!({"error": "Invalid credentials"}),
        );
        let api = EmotionApi::with_client("http://b", None, client);
        let session = SessionStore::new(MemoryStore::new());

        let err = authenticate(&api, &session, "a@b.c", "bad", AuthMode::Login)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(matches!(err, AppError::BackendRejected { status: 401, .. }));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_unreachable_backend_message() {
        let api = EmotionApi::with_client("http://b", None, MockHttpClient::new());
        let session = SessionStore::new(MemoryStore::new());

        let err = authenticate(&api, &session, "a@b.c", "pw", AuthMode::Login)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Backend not reachable");
    }

    #[tokio::test]
    async fn test_end_session_clears_even_when_remote_fails() {
        let store = MemoryStore::with(STORAGE_TOKEN_KEY, "tok");
        let session = SessionStore::new(&store);
        let api = EmotionApi::with_client("http://b", session.get_token(), MockHttpClient::new());

        end_session(&api, &session).await;

        assert!(!session.is_authenticated());
        let requests = api.client().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header_value("Authorization"), Some("tok"));
    }
}
