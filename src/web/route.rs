//! Route definitions
//!
//! Pure domain layer: no DOM, no `web_sys`. Declares every page and which of
//! them sit behind the session guard.

use std::fmt::Display;

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Landing page
    #[default]
    Home,
    Login,
    /// Picks an interaction mode (requires auth)
    Dashboard,
    /// Text emotion + chat reply (requires auth)
    Text,
    /// Camera capture (requires auth)
    Face,
    /// Microphone recording (requires auth)
    Voice,
    /// Mood history (requires auth)
    History,
    NotFound,
}

impl AppRoute {
    /// Parse a URL path
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/text" => Self::Text,
            "/face" => Self::Face,
            "/voice" => Self::Voice,
            "/history" => Self::History,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Text => "/text",
            Self::Face => "/face",
            Self::Voice => "/voice",
            Self::History => "/history",
            Self::NotFound => "/404",
        }
    }

    /// **Guard rule: does this route need a session**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Text | Self::Face | Self::Voice | Self::History
        )
    }

    /// Routes an authenticated user is bounced away from
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Whether the navbar is rendered on this route
    pub fn shows_navbar(&self) -> bool {
        !matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// The route that actually renders when navigating here.
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 8] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Dashboard,
        AppRoute::Text,
        AppRoute::Face,
        AppRoute::Voice,
        AppRoute::History,
        AppRoute::NotFound,
    ];

    #[test]
    fn test_path_round_trip() {
        for route in ALL.into_iter().filter(|r| *r != AppRoute::NotFound) {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/friends"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/face/"), AppRoute::Face);
    }

    #[test]
    fn test_protected_routes_redirect_to_login_when_unauthenticated() {
        for route in ALL.into_iter().filter(AppRoute::requires_auth) {
            assert_eq!(route.guard(false), AppRoute::Login, "{route}");
            assert_eq!(route.guard(true), route);
        }
    }

    #[test]
    fn test_public_routes_pass_through() {
        assert_eq!(AppRoute::Home.guard(false), AppRoute::Home);
        assert_eq!(AppRoute::Home.guard(true), AppRoute::Home);
        assert_eq!(AppRoute::Login.guard(false), AppRoute::Login);
        assert_eq!(AppRoute::NotFound.guard(false), AppRoute::NotFound);
    }

    #[test]
    fn test_login_redirects_to_dashboard_when_authenticated() {
        assert_eq!(AppRoute::Login.guard(true), AppRoute::Dashboard);
    }

    #[test]
    fn test_navbar_hidden_on_login() {
        assert!(!AppRoute::Login.shows_navbar());
        assert!(AppRoute::Dashboard.shows_navbar());
    }
}
