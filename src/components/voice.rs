use std::rc::Rc;

use leptos::prelude::*;

use crate::capture::{MicStatus, MicrophoneController, format_elapsed};
use crate::components::icons::{AlertCircle, Mic};
use crate::error::AppError;
use crate::scope::ViewScope;
use crate::web::Interval;
use crate::web::media::{AudioClip, BrowserMicrophone};

#[component]
pub fn VoicePage() -> impl IntoView {
    let scope = ViewScope::for_current_view();

    let status = RwSignal::new(MicStatus::Idle);
    let elapsed = RwSignal::new(0u32);
    let error = RwSignal::new(Option::<AppError>::None);
    let clip = RwSignal::new(Option::<AudioClip>::None);

    // the recorder hands over the clip after stop, possibly after unmount
    let microphone = BrowserMicrophone::new(move |next: AudioClip| {
        let mut pending = Some(next);
        clip.try_update(|slot| {
            if let Some(old) = slot.take() {
                old.revoke();
            }
            *slot = pending.take();
        });
        if let Some(orphan) = pending {
            orphan.revoke();
        }
    });

    let controller = StoredValue::new_local(Rc::new(MicrophoneController::new(microphone)));
    let ticker = StoredValue::new_local(Option::<Interval>::None);

    on_cleanup(move || {
        ticker.try_set_value(None);
        controller.try_with_value(|c| c.stop());
        clip.try_update(|slot| slot.take().map(|c| c.revoke()));
    });

    let start_ticker = move || {
        let interval = Interval::new(1000, move || {
            if let Some(secs) = controller.try_with_value(|c| {
                c.tick();
                c.elapsed()
            }) {
                elapsed.set(secs);
            }
        });
        if interval.is_none() {
            log::warn!("[Voice] timer unavailable");
        }
        ticker.set_value(interval);
    };

    let on_start = move |_: leptos::ev::MouseEvent| {
        let ctrl = controller.get_value();
        if ctrl.status() != MicStatus::Idle {
            return;
        }
        clip.update(|slot| {
            if let Some(old) = slot.take() {
                old.revoke();
            }
        });
        elapsed.set(0);
        status.set(MicStatus::Requesting);

        scope.spawn_to_completion(
            async move {
                ctrl.start().await;
                (ctrl.status(), ctrl.error())
            },
            move |(next, err)| {
                status.set(next);
                error.set(err);
                if next == MicStatus::Recording {
                    start_ticker();
                }
            },
        );
    };

    let on_stop = move |_| {
        ticker.set_value(None);
        controller.with_value(|c| {
            c.stop();
            elapsed.set(c.elapsed());
            status.set(c.status());
        });
    };

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-2xl mx-auto space-y-6">
                <div>
                    <h1 class="text-4xl font-bold">"Voice Emotion"</h1>
                    <p class="text-base-content/70 mt-2">"Record freely. No data leaves your device yet."</p>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center gap-6">
                        <div class=move || {
                            if status.get() == MicStatus::Recording {
                                "font-mono text-6xl text-error"
                            } else {
                                "font-mono text-6xl"
                            }
                        }>
                            {move || format_elapsed(elapsed.get())}
                        </div>

                        <Show
                            when=move || status.get() == MicStatus::Recording
                            fallback=move || view! {
                                <button
                                    class="btn btn-primary gap-2"
                                    disabled=move || status.get() == MicStatus::Requesting
                                    on:click=on_start.clone()
                                >
                                    <Mic class="h-4 w-4" />
                                    "Start Recording"
                                </button>
                            }
                        >
                            <button class="btn btn-error gap-2" on:click=on_stop>
                                <span class="loading loading-ring loading-sm"></span>
                                "Stop Recording"
                            </button>
                        </Show>

                        {move || error.get().map(|e| view! {
                            <div role="alert" class="alert alert-error w-full">
                                <AlertCircle class="stroke-current shrink-0 h-5 w-5" />
                                <span>{e.to_string()}</span>
                            </div>
                        })}

                        {move || clip.get().map(|c| view! {
                            <div class="w-full space-y-1">
                                <audio controls class="w-full" src=c.url></audio>
                                <p class="text-xs text-base-content/60 text-right">
                                    {format!("{:.1} KB, kept on this device", c.bytes / 1024.0)}
                                </p>
                            </div>
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}
