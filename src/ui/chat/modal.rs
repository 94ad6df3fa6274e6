//! Chat modal component.

use leptos::prelude::*;

use super::ChatPanel;
use crate::ui::components::{ButtonSize, ButtonVariant, XIcon, button_classes};
use crate::ui::view_model::PanelView;

/// Overlay plus dialog hosting the chat panel.
///
/// Clicking the overlay closes the modal; clicks inside the dialog do not,
/// because the trigger is filtered to the overlay element itself.
#[component]
pub fn ChatModal(
    /// Close endpoint for this widget instance.
    close_url: String,
    /// Element id of the widget root the response replaces.
    widget_target: String,
    /// Panel contents.
    panel: PanelView,
) -> impl IntoView {
    let overlay_id = format!("{widget_target}-overlay");
    let title_id = format!("{widget_target}-title");
    let trigger = format!("click target:#{overlay_id}");
    let target = format!("#{widget_target}");
    let overlay_target = target.clone();
    let overlay_close_url = close_url.clone();
    let dialog_labelled_by = title_id.clone();
    let title = panel.title.clone();
    let close_classes = button_classes(ButtonVariant::Ghost, ButtonSize::Icon);

    view! {
        <div
            id=overlay_id
            class="cw-overlay"
            hx-post=overlay_close_url
            hx-trigger=trigger
            hx-target=overlay_target
            hx-swap="outerHTML"
        >
            <div class="cw-dialog" role="dialog" aria-modal="true" aria-labelledby=dialog_labelled_by>
                <div class="cw-dialog__header">
                    <h2 id=title_id>{title}</h2>
                    <button
                        type="button"
                        class=close_classes
                        aria-label="Close chatbot"
                        hx-post=close_url
                        hx-target=target
                        hx-swap="outerHTML"
                    >
                        <XIcon />
                    </button>
                </div>
                <div class="cw-dialog__body">
                    <ChatPanel panel=panel />
                </div>
            </div>
        </div>
    }
}
