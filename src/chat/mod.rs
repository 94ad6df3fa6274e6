//! Conversation state for one widget instance.
//!
//! - [`Transcript`]: append-only list of [`Message`]s, seeded with a greeting
//! - [`InteractionController`]: the Idle/Awaiting state machine that turns a
//!   submitted question into a user message, a remote query and exactly one
//!   assistant reply
//!
//! # Example
//!
//! ```rust
//! use docs_chat_widget::backend::Answer;
//! use docs_chat_widget::chat::{InteractionController, Phase};
//!
//! let mut controller = InteractionController::new("Hello!");
//! let ticket = controller.begin("What is chapter 3 about?").unwrap();
//! assert_eq!(controller.phase(), Phase::Awaiting);
//!
//! controller.settle(ticket, Ok(Answer::new("Sensors.")));
//! assert_eq!(controller.transcript().len(), 3);
//! assert_eq!(controller.phase(), Phase::Idle);
//! ```

mod controller;
mod message;

pub use controller::{
    BACKEND_ERROR_REPLY, FALLBACK_REPLY, InteractionController, PendingQuery, Phase,
};
pub use message::{Message, MessageId, Sender, Transcript};
