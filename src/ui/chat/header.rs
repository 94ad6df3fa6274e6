//! Chat header component.

use leptos::prelude::*;

use crate::ui::components::{Badge, BadgeVariant, ChatIcon};

/// Chat header with title and status.
#[component]
pub fn ChatHeader(
    /// Title displayed in the header.
    title: String,
    /// Whether a question is being answered.
    #[prop(default = false)]
    awaiting: bool,
) -> impl IntoView {
    let (variant, status) = if awaiting {
        (BadgeVariant::Pending, "Thinking…")
    } else {
        (BadgeVariant::Success, "Online")
    };

    view! {
        <header class="cw-chat-header">
            <div class="cw-chat-header__title">
                <ChatIcon class="cw-icon--accent" />
                <h3>{title}</h3>
            </div>

            <Badge variant=variant>
                <span class="cw-chat-status" aria-live="polite">{status}</span>
            </Badge>
        </header>
    }
}
