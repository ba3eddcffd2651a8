use emotion_shared::HealthResponse;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{Camera, MessageCircle, Mic};
use crate::scope::ViewScope;
use crate::web::{AppRoute, Link};

#[derive(Clone, Debug, PartialEq)]
enum BackendHealth {
    Checking,
    Online(HealthResponse),
    Offline,
}

#[component]
fn HealthBadge(health: ReadSignal<BackendHealth>) -> impl IntoView {
    move || match health.get() {
        BackendHealth::Checking => view! {
            <span class="badge badge-ghost gap-2">
                <span class="loading loading-spinner loading-xs"></span>
                "Checking backend"
            </span>
        }
        .into_any(),
        BackendHealth::Online(status) => {
            let models = format!(
                "text {} / face {} / bot {}",
                if status.text_model { "ready" } else { "off" },
                if status.face_model { "ready" } else { "off" },
                if status.bot { "ready" } else { "off" },
            );
            view! {
                <span class="badge badge-success gap-2" title=models>"Backend online"</span>
            }
            .into_any()
        }
        BackendHealth::Offline => view! {
            <span class="badge badge-error gap-2">"Backend offline"</span>
        }
        .into_any(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let scope = ViewScope::for_current_view();
    let (health, set_health) = signal(BackendHealth::Checking);

    let api = auth.api();
    scope.spawn(async move { api.health().await }, move |result| {
        let next = match result {
            Ok(status) if status.is_ok() => BackendHealth::Online(status),
            Ok(status) => {
                log::warn!("[Dashboard] backend reported status {}", status.status);
                BackendHealth::Offline
            }
            Err(e) => {
                log::warn!("[Dashboard] health check failed: {}", e);
                BackendHealth::Offline
            }
        };
        set_health.set(next);
    });

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-8">
                <div class="flex flex-col md:flex-row md:items-end justify-between gap-4">
                    <div>
                        <h1 class="text-4xl font-bold">"How would you like to begin?"</h1>
                        <p class="text-base-content/70 mt-2">"Choose a path. Move at your own pace."</p>
                    </div>
                    <HealthBadge health=health />
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <Link to=AppRoute::Text class="card bg-base-100 shadow-xl hover:shadow-2xl transition-shadow">
                        <div class="card-body">
                            <MessageCircle class="h-8 w-8 text-primary" />
                            <h2 class="card-title">"Text Emotion"</h2>
                            <p class="text-base-content/70">"Analyze emotions from written thoughts and messages."</p>
                        </div>
                    </Link>
                    <Link to=AppRoute::Face class="card bg-base-100 shadow-xl hover:shadow-2xl transition-shadow">
                        <div class="card-body">
                            <Camera class="h-8 w-8 text-secondary" />
                            <h2 class="card-title">"Face Emotion"</h2>
                            <p class="text-base-content/70">"Detect emotions through facial expressions using AI."</p>
                        </div>
                    </Link>
                    <Link to=AppRoute::Voice class="card bg-base-100 shadow-xl hover:shadow-2xl transition-shadow">
                        <div class="card-body">
                            <Mic class="h-8 w-8 text-accent" />
                            <h2 class="card-title">"Voice Emotion"</h2>
                            <p class="text-base-content/70">"Understand emotions from tone and speech patterns."</p>
                        </div>
                    </Link>
                </div>
            </div>
        </div>
    }
}
