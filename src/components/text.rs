use leptos::prelude::*;

use crate::auth::use_auth;
use crate::capture::{TextPhase, analyze_and_chat};
use crate::components::icons::{AlertCircle, MessageCircle};
use crate::scope::ViewScope;
use crate::web::speech::BrowserSpeaker;

#[component]
pub fn TextPage() -> impl IntoView {
    let auth = use_auth();
    let scope = ViewScope::for_current_view();

    let (text, set_text) = signal(String::new());
    let phase = RwSignal::new(TextPhase::Idle);

    let on_send = move |_| {
        let input = text.get_untracked();
        if !phase.with_untracked(|p| p.accepts(&input)) {
            return;
        }
        phase.set(TextPhase::Submitting { emotion: None });

        let api = auth.api();
        scope.spawn(
            async move {
                analyze_and_chat(&api, &BrowserSpeaker, &input, |emotion| {
                    phase.set(TextPhase::Submitting {
                        emotion: Some(emotion.to_string()),
                    });
                })
                .await
            },
            move |outcome| phase.update(|p| *p = std::mem::take(p).settle(outcome)),
        );
    };

    let busy = move || phase.with(TextPhase::is_busy);
    let emotion = move || phase.with(|p| p.emotion().map(str::to_string));
    let reply = move || phase.with(|p| p.reply().map(str::to_string));
    let error = move || phase.with(TextPhase::error);

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-6">
                <div>
                    <h1 class="text-4xl font-bold">"Talk to Emotion.AI"</h1>
                    <p class="text-base-content/70 mt-2">
                        "Express yourself. I'll respond based on how you feel."
                    </p>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body gap-4">
                        <textarea
                            class="textarea textarea-bordered w-full text-base"
                            rows="6"
                            placeholder="Type how you're feeling..."
                            prop:value=text
                            on:input=move |ev| set_text.set(event_target_value(&ev))
                        ></textarea>

                        <div class="card-actions justify-end">
                            <button class="btn btn-primary gap-2" disabled=busy on:click=on_send>
                                <MessageCircle class="h-4 w-4" />
                                {move || if busy() { "Thinking..." } else { "Send" }}
                            </button>
                        </div>

                        {move || emotion().map(|label| view! {
                            <div class="text-base-content/80">
                                "Detected emotion: " <span class="badge badge-primary badge-lg capitalize">{label}</span>
                            </div>
                        })}

                        {move || reply().map(|reply| view! {
                            <div class="bg-base-200 rounded-box p-4">
                                <strong>"Emotion.AI:"</strong>
                                <p class="mt-1">{reply}</p>
                            </div>
                        })}

                        {move || error().map(|message| view! {
                            <div role="alert" class="alert alert-error">
                                <AlertCircle class="stroke-current shrink-0 h-5 w-5" />
                                <span>{message}</span>
                            </div>
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}
