//! Inline SVG icons (lucide outlines)

use leptos::prelude::*;

#[component]
fn Svg(class: String, children: Children) -> impl IntoView {
    view! {
        <svg
            class=class
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
        >
            {children()}
        </svg>
    }
}

#[component]
pub fn Sparkles(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M12 3l1.9 5.8L20 10.7l-6.1 1.9L12 18.5l-1.9-5.9L4 10.7l6.1-1.9z" />
        </Svg>
    }
}

#[component]
pub fn MessageCircle(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M7.9 20A9 9 0 1 0 4 16.1L2 22z" />
        </Svg>
    }
}

#[component]
pub fn Camera(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M14.5 4h-5L7 7H4a2 2 0 0 0-2 2v9a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2V9a2 2 0 0 0-2-2h-3z" />
            <circle cx="12" cy="13" r="3" />
        </Svg>
    }
}

#[component]
pub fn Mic(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M12 2a3 3 0 0 0-3 3v7a3 3 0 0 0 6 0V5a3 3 0 0 0-3-3z" />
            <path d="M19 10v2a7 7 0 0 1-14 0v-2" />
            <line x1="12" x2="12" y1="19" y2="22" />
        </Svg>
    }
}

#[component]
pub fn LogOut(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4" />
            <polyline points="16 17 21 12 16 7" />
            <line x1="21" x2="9" y1="12" y2="12" />
        </Svg>
    }
}

#[component]
pub fn AlertCircle(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <circle cx="12" cy="12" r="10" />
            <line x1="12" x2="12" y1="8" y2="12" />
            <line x1="12" x2="12.01" y1="16" y2="16" />
        </Svg>
    }
}
