//! Chat input area component.

use leptos::prelude::*;

use crate::ui::components::{ButtonSize, ButtonVariant, SendIcon, button_classes};

/// Enter submits, Shift+Enter inserts a newline.
const SUBMIT_ON_ENTER: &str =
    "if (!$event.shiftKey) { $event.preventDefault(); if (message.trim()) { $el.form.requestSubmit() } }";

/// Chat message composer with HTMX form submission.
///
/// The text box and send button are disabled while a question is in flight;
/// the send button is also disabled whenever the trimmed input is empty.
#[component]
pub fn ChatInputArea(
    /// Submission endpoint for this widget instance.
    submit_url: String,
    /// Element id of the panel the response replaces.
    panel_target: String,
    /// Placeholder shown in the empty text box.
    placeholder: String,
    /// Text already in the box.
    #[prop(default = String::new())]
    initial: String,
    /// Whether a question is in flight.
    #[prop(default = false)]
    awaiting: bool,
) -> impl IntoView {
    let x_data = format!(
        "{{ message: {} }}",
        serde_json::to_string(&initial).unwrap_or_else(|_| "''".into())
    );
    let label = if awaiting { "..." } else { "Send" };
    let target = format!("#{panel_target}");
    let send_classes = button_classes(ButtonVariant::Primary, ButtonSize::Md);
    let send_disabled = if awaiting { "true" } else { "!message.trim()" };

    view! {
        <div class="cw-composer">
            <form
                class="cw-composer__form"
                hx-post=submit_url
                hx-target=target
                hx-swap="outerHTML"
                x-data=x_data
            >
                <textarea
                    name="message"
                    class="cw-composer__input"
                    placeholder=placeholder
                    rows="1"
                    aria-label="Your question"
                    x-model="message"
                    x-on:keydown.enter=SUBMIT_ON_ENTER
                    disabled=awaiting
                >
                    {initial}
                </textarea>

                <button
                    type="submit"
                    class=send_classes
                    aria-label="Send message"
                    disabled=awaiting
                    x-bind:disabled=send_disabled
                >
                    <SendIcon />
                    <span>{label}</span>
                </button>
            </form>

            <p class="cw-composer__hint">"Press Enter to send, Shift+Enter for new line"</p>
        </div>
    }
}
