//! Transcript messages.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The reader typing into the widget.
    User,
    /// The answer service (or the widget's own canned replies).
    Assistant,
}

impl Sender {
    /// Lowercase name, used for styling hooks.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Opaque message identifier, unique and increasing within one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
}

impl Message {
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Append-only, insertion-ordered list of messages.
///
/// A transcript always starts with one assistant greeting. Messages are never
/// edited or removed; the only mutation is [`Transcript::push`].
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
    #[serde(skip)]
    next_id: u64,
}

impl Transcript {
    /// Create a transcript seeded with an assistant greeting.
    #[must_use]
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        transcript.push(Sender::Assistant, greeting);
        transcript
    }

    /// Append a message stamped with the current time and return it.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &Message {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_greeting() {
        let transcript = Transcript::with_greeting("Hi!");

        assert_eq!(transcript.len(), 1);
        let greeting = &transcript.messages()[0];
        assert_eq!(greeting.sender(), Sender::Assistant);
        assert_eq!(greeting.text(), "Hi!");
    }

    #[test]
    fn test_ids_increase_in_insertion_order() {
        let mut transcript = Transcript::with_greeting("Hi!");
        transcript.push(Sender::User, "one");
        transcript.push(Sender::Assistant, "two");

        let ids: Vec<MessageId> = transcript.messages().iter().map(Message::id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

        let texts: Vec<&str> = transcript.messages().iter().map(Message::text).collect();
        assert_eq!(texts, ["Hi!", "one", "two"]);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_value(Sender::Assistant).unwrap();
        assert_eq!(json, "assistant");
    }
}
