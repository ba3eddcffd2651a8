use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, Sparkles};
use crate::web::{AppRoute, Link, use_router};

/// Top navigation, hidden on the login view
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (logging_out, set_logging_out) = signal(false);

    let visible = move || router.current_route().get().shows_navbar();
    let is_authenticated = auth.is_authenticated_signal();

    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        set_logging_out.set(true);
        leptos::task::spawn_local(async move {
            logout(&auth).await;
            set_logging_out.set(false);
        });
    };

    view! {
        <Show when=visible>
            <div class="navbar bg-base-100 shadow-sm px-4 md:px-8 sticky top-0 z-40">
                <div class="flex-1">
                    <Link to=AppRoute::Home class="btn btn-ghost text-xl gap-2">
                        <Sparkles class="h-6 w-6 text-primary" />
                        "emotion.ai"
                    </Link>
                </div>
                <div class="flex-none gap-2">
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| view! {
                            <Link to=AppRoute::Login class="btn btn-primary btn-sm">"Login"</Link>
                        }
                    >
                        <Link to=AppRoute::Dashboard class="btn btn-ghost btn-sm">"Dashboard"</Link>
                        <Link to=AppRoute::History class="btn btn-ghost btn-sm">"History"</Link>
                        <button
                            class="btn btn-outline btn-error btn-sm gap-2"
                            disabled=move || logging_out.get()
                            on:click=on_logout
                        >
                            <LogOut class="h-4 w-4" />
                            "Logout"
                        </button>
                    </Show>
                </div>
            </div>
        </Show>
    }
}

/// Page shell: navbar on top, routed view below
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Navbar />
            <main>{children()}</main>
        </div>
    }
}
