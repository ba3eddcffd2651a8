use leptos::prelude::*;

use crate::web::{AppRoute, Link};

struct Section {
    heading: &'static str,
    lines: &'static [&'static str],
}

const SECTIONS: &[Section] = &[
    Section {
        heading: "On certain days, even thought bleeds mute.",
        lines: &[
            "When words feel heavy.",
            "When silence speaks louder.",
            "We stay with you.",
        ],
    },
    Section {
        heading: "We understand, even when you cannot talk",
        lines: &[
            "Emotion.AI gently reflects emotional signals through text, voice, and expression, only when you choose to share.",
        ],
    },
    Section {
        heading: "Awareness, not diagnosis",
        lines: &[
            "This is not medical judgment.",
            "It is emotional awareness: private, calm and respectful.",
        ],
    },
    Section {
        heading: "Express in the way that feels safest",
        lines: &[
            "Write. Speak. Or simply be seen.",
            "Emotion.AI adapts to how you choose to express yourself.",
        ],
    },
    Section {
        heading: "You are not alone",
        lines: &["Connect with people who experience similar emotional rhythms."],
    },
];

#[component]
fn HomeSection(section: &'static Section, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    view! {
        <section class="hero min-h-screen bg-neutral text-neutral-content">
            <div class="hero-content text-center px-[10vw]">
                <div class="max-w-4xl">
                    <h2 class="text-5xl md:text-7xl font-bold leading-tight mb-6">{section.heading}</h2>
                    <p class="text-xl md:text-2xl text-neutral-content/80 leading-relaxed">
                        {section
                            .lines
                            .iter()
                            .map(|line| view! { <span class="block">{*line}</span> })
                            .collect_view()}
                    </p>
                    {children.map(|c| c())}
                </div>
            </div>
        </section>
    }
}

const CLOSING: Section = Section {
    heading: "Begin when you are ready",
    lines: &["Private. Gentle. On your terms."],
};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div>
            {SECTIONS.iter().map(|section| view! { <HomeSection section=section /> }).collect_view()}
            <HomeSection section=&CLOSING>
                <div class="mt-12">
                    // protected: the guard sends visitors to Login first
                    <Link to=AppRoute::Text class="btn btn-success btn-lg">
                        "Login / Sign Up"
                    </Link>
                </div>
            </HomeSection>
        </div>
    }
}
