use std::rc::Rc;

use leptos::html::Video;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::capture::{CameraController, CameraStatus};
use crate::components::icons::{AlertCircle, Camera};
use crate::scope::ViewScope;
use crate::web::FetchClient;
use crate::web::media::BrowserCamera;

type BrowserCameraController = CameraController<BrowserCamera, FetchClient>;

#[component]
pub fn FacePage() -> impl IntoView {
    let auth = use_auth();
    let scope = ViewScope::for_current_view();
    let video = NodeRef::<Video>::new();

    let controller: Rc<BrowserCameraController> =
        Rc::new(CameraController::new(BrowserCamera::new(video), auth.api()));
    let snapshot = RwSignal::new(controller.snapshot());
    let controller = StoredValue::new_local(controller);

    // release the camera when the view goes away
    on_cleanup(move || {
        controller.try_with_value(|c| c.stop());
    });

    let on_start = {
        let scope = scope.clone();
        move |_| {
            let ctrl = controller.get_value();
            if ctrl.status() != CameraStatus::Off {
                return;
            }
            snapshot.update(|s| s.status = CameraStatus::Starting);
            // a pending prompt must resolve so its stream can be released
            scope.spawn_to_completion(
                async move {
                    ctrl.start().await;
                    ctrl.snapshot()
                },
                move |snap| snapshot.set(snap),
            );
        }
    };

    let on_capture = move |_| {
        let ctrl = controller.get_value();
        if !ctrl.status().is_on() {
            return;
        }
        scope.spawn(
            async move {
                ctrl.capture().await;
                ctrl.snapshot()
            },
            move |snap| snapshot.set(snap),
        );
    };

    let on_clear = move |_| {
        controller.with_value(|c| {
            c.clear_result();
            snapshot.set(c.snapshot());
        });
    };

    let on_stop = move |_| {
        controller.with_value(|c| {
            c.stop();
            snapshot.set(c.snapshot());
        });
    };

    let status = move || snapshot.with(|s| s.status);
    let is_on = move || status().is_on();

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-4xl mx-auto space-y-6">
                <header>
                    <h1 class="text-4xl font-bold">"Face Emotion Analysis"</h1>
                    <p class="text-base-content/70 mt-2">
                        "Your camera is private. You decide when it's active."
                    </p>
                </header>

                <section class="card bg-base-100 shadow-xl">
                    <div class="card-body gap-4">
                        <div class="relative aspect-video bg-neutral rounded-box overflow-hidden">
                            <video
                                node_ref=video
                                class="w-full h-full object-cover transition-opacity"
                                class:opacity-0=move || !is_on()
                            ></video>
                            <Show when=move || !is_on()>
                                <div class="absolute inset-0 flex flex-col items-center justify-center gap-2 text-neutral-content/70">
                                    <Camera class="h-10 w-10" />
                                    <span>
                                        {move || if status() == CameraStatus::Starting {
                                            "Waiting for permission..."
                                        } else {
                                            "Camera is off"
                                        }}
                                    </span>
                                </div>
                            </Show>
                            <span class=move || {
                                if is_on() {
                                    "badge badge-success absolute top-3 left-3"
                                } else {
                                    "badge badge-neutral absolute top-3 left-3"
                                }
                            }>
                                {move || if is_on() { "Camera Active" } else { "Camera Disabled" }}
                            </span>
                        </div>

                        <div class="flex flex-wrap gap-2">
                            <button
                                class="btn btn-primary"
                                disabled=move || status() != CameraStatus::Off
                                on:click=on_start
                            >
                                "Enable Camera"
                            </button>
                            <button class="btn btn-secondary" disabled=move || !is_on() on:click=on_capture>
                                "Capture Emotion"
                            </button>
                            <button
                                class="btn btn-outline"
                                disabled=move || snapshot.with(|s| s.result.is_none())
                                on:click=on_clear
                            >
                                "Clear Result"
                            </button>
                            <button class="btn btn-error" on:click=on_stop>
                                "Stop Camera"
                            </button>
                        </div>

                        {move || snapshot.with(|s| s.error.as_ref().map(ToString::to_string)).map(|message| view! {
                            <div role="alert" class="alert alert-error">
                                <AlertCircle class="stroke-current shrink-0 h-5 w-5" />
                                <span>{message}</span>
                            </div>
                        })}

                        {move || snapshot.with(|s| s.result.clone()).map(|result| view! {
                            <div class="bg-base-200 rounded-box p-4 space-y-2">
                                <h3 class="font-semibold flex items-center gap-2">
                                    "Detected Emotion"
                                    {result.label.clone().map(|label| view! {
                                        <span class="badge badge-primary badge-lg capitalize">{label}</span>
                                    })}
                                </h3>
                                <pre class="text-xs overflow-x-auto">{result.pretty()}</pre>
                            </div>
                        })}
                    </div>
                </section>
            </div>
        </div>
    }
}

