//! Router service
//!
//! Wraps the History API: every `window.history` call lives here.
//! Navigation runs "request -> guard -> push -> render".

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects so the denied path does not stay in history
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service
///
/// Signal-driven; the authenticated flag is injected so the router does not
/// depend on the session module.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial_route = requested.guard(is_authenticated.get_untracked());
        if initial_route != requested {
            replace_history_state(initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **Navigate with guard**
    pub fn navigate_to_route(&self, target: AppRoute) {
        let resolved = target.guard(self.is_authenticated.get_untracked());
        if resolved != target {
            log::info!("[Router] {} denied, redirecting to {}", target, resolved);
        }
        push_history_state(resolved.to_path());
        self.set_route.set(resolved);
    }

    /// Back/forward buttons go through the guard as well
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let resolved = target.guard(is_authenticated.get_untracked());
            if resolved != target {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // the listener lives as long as the page
        closure.forget();
    }

    /// Re-run the guard whenever the session flips
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let resolved = route.guard(is_auth);

            if resolved != route {
                log::info!(
                    "[Router] Auth state changed (authenticated: {}), redirecting to {}",
                    is_auth,
                    resolved
                );
                push_history_state(resolved.to_path());
                set_route.set(resolved);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

/// Root router component, provides `RouterService` to its children
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// Renders the view for the current route
#[component]
pub fn RouterOutlet(
    /// Maps the current route to its view
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app anchor that navigates without a page reload
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate_to_route(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
