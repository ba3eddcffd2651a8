//! emotion.ai client
//!
//! Single-page app over the emotion inference backend:
//! - `web::route`, `web::router`: route table and History-API router
//! - `auth`: session context
//! - `api`: typed gateway to the backend
//! - `capture`: camera, microphone and text pipelines, free of DOM types
//! - `web`: thin wrappers over browser APIs
//! - `components`: pages

mod api;
mod auth;
mod config;
mod error;
mod scope;
mod speech;

mod capture {
    mod camera;
    pub mod media;
    mod microphone;
    mod text_flow;

    pub use camera::{CameraController, CameraStatus};
    pub use media::{FrameSource, MediaDevices, MediaStream};
    pub use microphone::{MicStatus, MicrophoneController, format_elapsed};
    pub use text_flow::{TextPhase, analyze_and_chat};
}

mod components {
    pub mod dashboard;
    pub mod face;
    pub mod history;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod text;
    pub mod voice;
}

// Browser API wrappers; everything that touches `web_sys` lives here.
pub(crate) mod web {
    mod http;
    pub mod logger;
    pub mod media;
    mod route;
    mod router;
    pub mod speech;
    mod storage;
    mod timer;

    pub use http::{FetchClient, HttpClient, HttpRequest};
    pub use route::AppRoute;
    pub use router::{Link, Router, RouterOutlet, use_router};
    pub use storage::{KeyValueStore, LocalStorage};
    pub use timer::Interval;

    #[cfg(test)]
    pub use http::MockHttpClient;
    #[cfg(test)]
    pub use storage::MemoryStore;
}

pub use config::AppConfig;
pub use web::LocalStorage;
pub use web::logger::ConsoleLogger;

use leptos::prelude::*;

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::face::FacePage;
use crate::components::history::HistoryPage;
use crate::components::home::HomePage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::text::TextPage;
use crate::components::voice::VoicePage;
use crate::web::{AppRoute, Link, Router, RouterOutlet};

#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[70vh]">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"Page not found"</p>
                <Link to=AppRoute::Home class="btn btn-ghost">"Back home"</Link>
            </div>
        </div>
    }
}

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Text => view! { <TextPage /> }.into_any(),
        AppRoute::Face => view! { <FacePage /> }.into_any(),
        AppRoute::Voice => view! { <VoicePage /> }.into_any(),
        AppRoute::History => view! { <HistoryPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // session first: the router guards the initial URL against it
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx, &config);

    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <Layout>
                <RouterOutlet matcher=route_matcher />
            </Layout>
        </Router>
    }
}
