//! Chat panel layout component.

use leptos::prelude::*;

use super::{ChatHeader, ChatInputArea, ChatMessageList};
use crate::ui::view_model::PanelView;

/// Complete chat interface for one widget instance.
///
/// Provides:
/// - Header with title and status
/// - Scrollable message list with typing indicator
/// - Input area for new questions
///
/// While a question is in flight the panel re-fetches itself after
/// `poll_interval_ms`, so the answer appears without a client-side script.
/// The refresh targets the panel itself; the enclosing overlay's `hx-target`
/// points at the widget root and must not be inherited.
#[component]
pub fn ChatPanel(panel: PanelView) -> impl IntoView {
    let dom_id = panel.dom_id();
    let panel_id = dom_id.clone();
    let base = format!("/widget/{}", panel.widget_id);
    let (poll_url, poll_trigger) = if panel.awaiting {
        (
            Some(format!("{base}/panel")),
            Some(format!("load delay:{}ms", panel.poll_interval_ms)),
        )
    } else {
        (None, None)
    };
    let busy = if panel.awaiting { "true" } else { "false" };
    let submit_url = format!("{base}/messages");

    view! {
        <section
            id=panel_id
            class="cw-panel"
            aria-busy=busy
            hx-get=poll_url
            hx-trigger=poll_trigger
            hx-target="this"
            hx-swap="outerHTML"
        >
            <ChatHeader title=panel.title awaiting=panel.awaiting />

            <ChatMessageList messages=panel.messages awaiting=panel.awaiting />

            <ChatInputArea
                submit_url=submit_url
                panel_target=dom_id
                placeholder=panel.placeholder
                initial=panel.pending_input
                awaiting=panel.awaiting
            />
        </section>
    }
}
