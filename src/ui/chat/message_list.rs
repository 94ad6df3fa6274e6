//! Chat message list component.

use leptos::prelude::*;

use crate::chat::Sender;
use crate::ui::view_model::MessageView;

/// Scrolls the list to its newest entry every time it is swapped in.
const SCROLL_TO_END: &str = "$el.scrollTop = $el.scrollHeight";

/// Transcript rendering with an optional typing indicator.
///
/// The list is re-rendered wholesale on every panel swap, and Alpine's
/// `x-init` runs on each insertion, which keeps the newest content in view.
#[component]
pub fn ChatMessageList(
    /// Messages in display order.
    messages: Vec<MessageView>,
    /// Show the typing indicator after the last message.
    #[prop(default = false)]
    awaiting: bool,
) -> impl IntoView {
    view! {
        <div
            class="cw-messages"
            role="log"
            aria-label="Chat messages"
            x-data=""
            x-init=SCROLL_TO_END
        >
            {messages
                .into_iter()
                .map(|message| view! { <ChatMessage message=message /> })
                .collect_view()}
            {awaiting.then(|| view! { <TypingIndicator /> })}
        </div>
    }
}

/// A single message bubble.
#[component]
fn ChatMessage(message: MessageView) -> impl IntoView {
    let classes = match message.sender {
        Sender::User => "cw-message cw-message--user",
        Sender::Assistant => "cw-message cw-message--assistant",
    };
    let sender = message.sender.as_str();
    let MessageView { dom_id, text, datetime, time_label, .. } = message;

    view! {
        <div id=dom_id class=classes data-sender=sender>
            <div class="cw-message__text">{text}</div>
            <time class="cw-message__time" datetime=datetime>
                {time_label}
            </time>
        </div>
    }
}

/// Three bouncing dots shown while the answer service is working.
#[component]
fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="cw-message cw-message--assistant cw-typing" aria-label="Assistant is typing">
            <span></span>
            <span></span>
            <span></span>
        </div>
    }
}
