//! Uniform response wrapper used by every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub msg: String,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// `{success, detail, content}` body shared by success and error responses.
///
/// `detail` and `content` serialize as `null` when absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub success: bool,
    pub detail: Option<Vec<Message>>,
    pub content: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    /// Successful response with one message and the given content items.
    pub fn ok(msg: impl Into<String>, content: Vec<T>) -> Self {
        Self {
            success: true,
            detail: Some(vec![Message::new(msg)]),
            content: Some(content),
        }
    }

    /// Successful response carrying only a message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: Some(vec![Message::new(msg)]),
            content: None,
        }
    }
}

impl Envelope<Value> {
    /// Failed response, one `{msg}` per message.
    pub fn error(messages: Vec<String>) -> Self {
        Self {
            success: false,
            detail: Some(messages.into_iter().map(Message::new).collect()),
            content: None,
        }
    }
}
