use emotion_shared::AuthMode;
use leptos::prelude::*;

use crate::auth::{login, use_auth};
use crate::components::icons::{AlertCircle, Sparkles};
use crate::scope::ViewScope;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let scope = ViewScope::for_current_view();

    let (api_base, set_api_base) = signal(auth.state.with_untracked(|s| s.api_base.clone()));
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (mode, set_mode) = signal(AuthMode::Login);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let (base, email, password, mode) = (
            api_base.get_untracked(),
            email.get_untracked(),
            password.get_untracked(),
            mode.get_untracked(),
        );
        // success flips the session flag; the router then leaves this page
        scope.spawn(
            async move { login(&auth, base, email, password, mode).await },
            move |result| {
                set_is_submitting.set(false);
                if let Err(e) = result {
                    set_error_msg.set(Some(e.to_string()));
                }
            },
        );
    };

    let is_login = move || mode.get() == AuthMode::Login;

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Sparkles class="h-8 w-8" />
                        </div>
                        <span class="text-sm font-semibold tracking-wide text-primary">"emotion.ai"</span>
                        <h1 class="text-3xl font-bold">
                            {move || if is_login() { "Welcome back" } else { "Create your account" }}
                        </h1>
                        <p class="text-base-content/70">
                            {move || if is_login() {
                                "Sign in to continue to your dashboard."
                            } else {
                                "Start understanding emotions intelligently."
                            }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <input
                                type="email"
                                placeholder="Email address"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <input
                                type="password"
                                placeholder="Password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <details class="collapse collapse-arrow bg-base-200 text-sm">
                            <summary class="collapse-title min-h-0 py-2">"Backend"</summary>
                            <div class="collapse-content">
                                <input
                                    type="url"
                                    placeholder="http://127.0.0.1:5000"
                                    on:input=move |ev| set_api_base.set(event_target_value(&ev))
                                    prop:value=api_base
                                    class="input input-bordered input-sm w-full"
                                />
                            </div>
                        </details>

                        <div class="form-control mt-4">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else if is_login() {
                                    "Sign in".into_any()
                                } else {
                                    "Create account".into_any()
                                }}
                            </button>
                        </div>

                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle class="stroke-current shrink-0 h-5 w-5" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="text-center text-sm text-base-content/70 mt-2">
                            {move || if is_login() {
                                "Don't have an account?"
                            } else {
                                "Already have an account?"
                            }}
                            <br />
                            <button
                                type="button"
                                class="btn btn-link btn-sm"
                                on:click=move |_| set_mode.update(|m| *m = m.toggled())
                            >
                                {move || if is_login() { "Create account" } else { "Sign in" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
