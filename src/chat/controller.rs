//! Interaction controller: the ask/respond cycle of one widget instance.

use serde::Serialize;

use super::message::{Message, Sender, Transcript};
use crate::backend::{Answer, AnswerService, QueryError};

/// Reply used when the service answered but gave nothing usable.
pub const FALLBACK_REPLY: &str = "Sorry, I could not process your request.";

/// Reply used when the service could not be reached or refused the request.
pub const BACKEND_ERROR_REPLY: &str =
    "Error connecting to the backend. Please make sure the backend server is running.";

/// Controller phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Ready for a new question.
    #[default]
    Idle,
    /// A query is in flight; submits are ignored.
    Awaiting,
}

/// Ticket for an in-flight query.
///
/// Returned by [`InteractionController::begin`] and consumed by
/// [`InteractionController::settle`], so every accepted question is settled
/// exactly once. Deliberately not `Clone`.
#[derive(Debug)]
pub struct PendingQuery {
    text: String,
}

impl PendingQuery {
    /// The trimmed question to send.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Owns the transcript, the pending input and the phase.
///
/// Live keystrokes stay in the browser (the composer's Alpine model);
/// `pending_input` is the server-side copy the composer is seeded with when a
/// panel is rendered. It only changes through [`set_input`](Self::set_input)
/// and is cleared by an accepted [`begin`](Self::begin), so widgets served
/// over HTTP always render it empty.
///
/// ```text
/// Idle --begin(valid text)--> Awaiting --settle--> Idle
/// ```
///
/// `begin` while awaiting, or with blank text, changes nothing.
#[derive(Debug, Clone)]
pub struct InteractionController {
    transcript: Transcript,
    pending_input: String,
    phase: Phase,
}

impl InteractionController {
    /// Create a controller whose transcript starts with `greeting`.
    #[must_use]
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::with_greeting(greeting),
            pending_input: String::new(),
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        self.phase == Phase::Awaiting
    }

    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replace the text currently in the input box.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Whether the send affordance should be enabled.
    ///
    /// Mirrors the composer's client-side `disabled` expression for the
    /// seeded text.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle && !self.pending_input.trim().is_empty()
    }

    /// Accept a question.
    ///
    /// Appends the user message, clears the input and enters
    /// [`Phase::Awaiting`]. Returns `None` (and changes nothing) when the
    /// trimmed text is empty or a query is already in flight.
    pub fn begin(&mut self, raw_text: &str) -> Option<PendingQuery> {
        let text = raw_text.trim();
        if text.is_empty() || self.is_awaiting() {
            return None;
        }

        self.transcript.push(Sender::User, text);
        self.pending_input.clear();
        self.phase = Phase::Awaiting;

        Some(PendingQuery {
            text: text.to_owned(),
        })
    }

    /// Record the outcome of an in-flight query and return to [`Phase::Idle`].
    ///
    /// Returns the assistant message that was appended.
    pub fn settle(
        &mut self,
        ticket: PendingQuery,
        outcome: Result<Answer, QueryError>,
    ) -> &Message {
        let reply = reply_for(&ticket, outcome);
        self.phase = Phase::Idle;
        self.transcript.push(Sender::Assistant, reply)
    }

    /// Run a whole cycle against `service`: begin, query, settle.
    ///
    /// Returns `false` when the submit was ignored.
    pub async fn submit(&mut self, raw_text: &str, service: &dyn AnswerService) -> bool {
        let Some(ticket) = self.begin(raw_text) else {
            return false;
        };
        let outcome = service.query(ticket.text()).await;
        self.settle(ticket, outcome);
        true
    }
}

fn reply_for(ticket: &PendingQuery, outcome: Result<Answer, QueryError>) -> String {
    match outcome {
        Ok(Answer { text: Some(text) }) if !text.is_empty() => text,
        Ok(_) => {
            tracing::info!(
                name: "widget.query.empty_answer",
                query_len = ticket.text.len(),
                "Answer service returned no answer"
            );
            FALLBACK_REPLY.to_owned()
        }
        Err(error) => {
            tracing::warn!(
                name: "widget.query.failed",
                error = %error,
                "Error calling answer service"
            );
            BACKEND_ERROR_REPLY.to_owned()
        }
    }
}
