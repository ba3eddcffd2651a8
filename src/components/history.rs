use emotion_shared::history::placeholder_entries;
use leptos::prelude::*;

#[component]
pub fn HistoryPage() -> impl IntoView {
    let entries = placeholder_entries();

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-6">
                <div>
                    <h1 class="text-4xl font-bold">"Mood History"</h1>
                    <p class="text-base-content/70 mt-2">"Your recent detected moods (placeholder data)."</p>
                </div>

                <ul class="space-y-3">
                    {entries
                        .into_iter()
                        .map(|entry| {
                            let time = entry.display_time();
                            view! {
                                <li class="card bg-base-100 shadow">
                                    <div class="card-body flex-row items-center justify-between py-4">
                                        <div>
                                            <div class="font-bold capitalize">{entry.label}</div>
                                            <div class="text-sm text-base-content/60">{entry.note}</div>
                                        </div>
                                        <time class="text-sm text-base-content/60">{time}</time>
                                    </div>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
