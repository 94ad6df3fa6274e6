//! Mounted widget instances.
//!
//! Every page view mounts its own [`WidgetInstance`], holding the modal-open
//! flag next to the chat controller. Instances live in a [`WidgetStore`] until
//! the page unloads (or goes quiet for too long).
//!
//! # Example
//!
//! ```rust
//! use docs_chat_widget::widget::WidgetStore;
//!
//! let store = WidgetStore::new("Hello!");
//! let id = store.mount();
//! assert_eq!(store.toggle(&id), Some(true));
//! ```

mod store;

use std::sync::Arc;

use crate::backend::AnswerService;

pub use store::{WidgetInstance, WidgetStore};

/// Outcome of [`ask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    /// The question was accepted and a query is in flight.
    Accepted,
    /// Blank text, or a query was already in flight.
    Ignored,
    /// No such widget instance.
    NotMounted,
}

/// Submit `raw_text` to widget `id` and settle it in the background.
///
/// The controller is only touched under the store lock; the query itself runs
/// on a spawned task, which delivers its outcome through
/// [`WidgetStore::settle`]. Must be called from within a tokio runtime.
pub fn ask(
    store: &WidgetStore,
    answers: &Arc<dyn AnswerService>,
    id: &str,
    raw_text: &str,
) -> AskOutcome {
    let ticket = match store.begin(id, raw_text) {
        None => return AskOutcome::NotMounted,
        Some(None) => return AskOutcome::Ignored,
        Some(Some(ticket)) => ticket,
    };

    tracing::info!(
        name: "widget.query.started",
        widget_id = %id,
        query_len = ticket.text().len(),
        "Forwarding question to answer service"
    );

    let store = store.clone();
    let answers = Arc::clone(answers);
    let id = id.to_owned();
    tokio::spawn(async move {
        let outcome = answers.query(ticket.text()).await;
        if store.settle(&id, ticket, outcome) {
            tracing::info!(name: "widget.query.settled", widget_id = %id, "Question answered");
        }
    });

    AskOutcome::Accepted
}
