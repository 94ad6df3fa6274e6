//! Floating launcher button.

use leptos::prelude::*;

use crate::ui::components::{ButtonSize, ButtonVariant, ChatIcon, button_classes};

/// Round button pinned to the page corner; toggles the chat modal.
#[component]
pub fn ChatLauncher(
    /// Toggle endpoint for this widget instance.
    toggle_url: String,
    /// Element id of the widget root the response replaces.
    widget_target: String,
    /// Whether the modal is currently open.
    #[prop(default = false)]
    open: bool,
) -> impl IntoView {
    let label = if open { "Close chatbot" } else { "Open chatbot" };
    let expanded = if open { "true" } else { "false" };
    let classes = format!(
        "{} cw-launcher",
        button_classes(ButtonVariant::Floating, ButtonSize::Icon)
    );
    let target = format!("#{widget_target}");

    view! {
        <button
            type="button"
            class=classes
            aria-label=label
            aria-expanded=expanded
            hx-post=toggle_url
            hx-target=target
            hx-swap="outerHTML"
        >
            <ChatIcon class="cw-icon--lg" />
        </button>
    }
}
