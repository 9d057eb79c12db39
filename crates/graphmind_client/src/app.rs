//! Conversation controller: owns the transcript and the loading state, and
//! turns each question into exactly one user turn and one assistant turn.

use tracing::{debug, error};

use crate::client::{Backend, ClientError};
use crate::messages::{ChatMessage, QueryResponse, Transcript};

/// Idle, or waiting on one or more backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    AwaitingResponse { in_flight: usize },
}

/// A question whose user turn is already in the transcript and whose answer
/// has not arrived yet. Hand it back to [`App::settle`] once the backend replies.
#[derive(Debug)]
#[must_use = "a pending query keeps the app loading until it is settled"]
pub struct PendingQuery {
    question: String,
}

impl PendingQuery {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn into_question(self) -> String {
        self.question
    }
}

#[derive(Debug, Default)]
pub struct App {
    transcript: Transcript,
    state: LoadState,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::AwaitingResponse { .. })
    }

    /// Appends the user turn and marks a request in flight.
    /// Callers guarantee `question` is non-empty after trimming.
    pub fn begin(&mut self, question: String) -> PendingQuery {
        self.transcript.push(ChatMessage::user(question.clone()));
        self.state = match self.state {
            LoadState::Idle => LoadState::AwaitingResponse { in_flight: 1 },
            LoadState::AwaitingResponse { in_flight } => LoadState::AwaitingResponse {
                in_flight: in_flight + 1,
            },
        };
        debug!(state = ?self.state, "question submitted");
        PendingQuery { question }
    }

    /// Appends the assistant turn for one request and clears its in-flight mark.
    /// Failures are logged and shown as the fixed error reply; nothing is returned.
    pub fn settle(&mut self, pending: PendingQuery, outcome: Result<QueryResponse, ClientError>) {
        let reply = match outcome {
            Ok(resp) => ChatMessage::from(resp),
            Err(e) => {
                error!(question = %pending.question, error = %e, "backend call failed");
                ChatMessage::backend_error()
            }
        };
        self.transcript.push(reply);
        self.state = match self.state {
            LoadState::AwaitingResponse { in_flight } if in_flight > 1 => {
                LoadState::AwaitingResponse {
                    in_flight: in_flight - 1,
                }
            }
            _ => LoadState::Idle,
        };
        debug!(state = ?self.state, "question settled");
    }

    /// Sequential ask: begin, wait on the backend, settle.
    pub async fn ask<B: Backend + ?Sized>(&mut self, backend: &B, question: String) {
        let pending = self.begin(question);
        let outcome = backend.query(pending.question()).await;
        self.settle(pending, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Role;
    use async_trait::async_trait;

    struct Fixed(Result<QueryResponse, ()>);

    #[async_trait]
    impl Backend for Fixed {
        async fn query(&self, _question: &str) -> Result<QueryResponse, ClientError> {
            match &self.0 {
                Ok(resp) => Ok(resp.clone()),
                Err(()) => Err(serde_json::from_str::<QueryResponse>("{}")
                    .unwrap_err()
                    .into()),
            }
        }
    }

    fn response(answer: &str, sources: &[&str]) -> QueryResponse {
        QueryResponse {
            answer: answer.into(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn begin_appends_user_turn_and_loads() {
        let mut app = App::new();
        let pending = app.begin("What is MetaKGP?".into());
        assert!(app.is_loading());
        assert_eq!(app.transcript().len(), 1);
        let first = app.transcript().last().unwrap();
        assert_eq!(first.role, Role::User);
        assert_eq!(first.text, "What is MetaKGP?");
        assert!(first.sources.is_empty());
        app.settle(pending, Ok(response("A", &[])));
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn success_appends_answer_with_sources() {
        let mut app = App::new();
        let backend = Fixed(Ok(response("A", &["u1", "u2"])));
        app.ask(&backend, "q".into()).await;

        assert_eq!(app.state(), LoadState::Idle);
        let msgs = app.transcript().as_slice();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1], ChatMessage::assistant("A", vec!["u1".into(), "u2".into()]));
    }

    #[tokio::test]
    async fn failure_appends_fixed_error_and_clears_loading() {
        let mut app = App::new();
        app.ask(&Fixed(Err(())), "q".into()).await;

        assert!(!app.is_loading());
        let msgs = app.transcript().as_slice();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1], ChatMessage::backend_error());

        // The session stays usable after a failure.
        app.ask(&Fixed(Ok(response("B", &[]))), "again".into()).await;
        assert_eq!(app.transcript().len(), 4);
        assert_eq!(app.transcript().last().unwrap().text, "B");
    }

    #[test]
    fn overlapping_requests_keep_loading_until_last_settles() {
        let mut app = App::new();
        let first = app.begin("one".into());
        let second = app.begin("two".into());
        assert_eq!(app.state(), LoadState::AwaitingResponse { in_flight: 2 });

        // Second settles first: replies land in settle order.
        app.settle(second, Ok(response("answer two", &[])));
        assert!(app.is_loading());
        app.settle(first, Ok(response("answer one", &[])));
        assert!(!app.is_loading());

        let texts: Vec<_> = app.transcript().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "answer two", "answer one"]);
    }
}
