//! Chat transcript types and the JSON bodies exchanged with the QA backend.
//! Client → server: `{"question": ...}`. Server → client: `{"answer": ..., "sources": [...]}`.

use serde::{Deserialize, Deserializer, Serialize};

/// Text shown in place of an answer whenever the backend call fails.
pub const BACKEND_ERROR_TEXT: &str = "Error contacting backend.";

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One chat turn. Never mutated once it is in a [`Transcript`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn assistant(text: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            sources,
        }
    }

    /// The fixed assistant reply for a failed backend call.
    pub fn backend_error() -> Self {
        Self::assistant(BACKEND_ERROR_TEXT, Vec::new())
    }
}

impl From<QueryResponse> for ChatMessage {
    fn from(resp: QueryResponse) -> Self {
        Self::assistant(resp.answer, resp.sources)
    }
}

/// Ordered, append-only conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Client → server: POST /query body.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

impl<'a> QueryRequest<'a> {
    pub fn new(question: &'a str) -> Self {
        Self { question }
    }
}

/// Server → client: successful answer. `answer` is required; `sources` may be absent or null.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
