//! Remote answer service.
//!
//! The widget does no retrieval of its own: every question is forwarded to an
//! external question-answering API with a single JSON request/response pair.
//!
//! - [`AnswerService`]: the seam the chat controller talks to
//! - [`QueryClient`]: the HTTP implementation
//! - [`QueryError`]: failure detail, logged but never shown to readers

mod client;
mod error;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::QueryClient;
pub use error::QueryError;

/// Conversation identifier sent with every query.
///
/// The service supports per-conversation context but the widget always talks
/// in one shared conversation.
pub const DEFAULT_CONVERSATION_ID: &str = "default_conversation";

/// Request body for the answer service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The reader's question.
    pub query: String,
    /// Conversation identifier.
    pub conversation_id: String,
}

impl QueryRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            conversation_id: DEFAULT_CONVERSATION_ID.to_string(),
        }
    }
}

/// A successfully received answer.
///
/// `text` is `None` when the response body had no usable `answer` string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub text: Option<String>,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// An answer with no usable text.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Something that can answer a reader's question.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask one question. No retries.
    async fn query(&self, text: &str) -> Result<Answer, QueryError>;
}
