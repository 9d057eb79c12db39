//! HTTP client for the QA backend: one `POST /query` per question.

use async_trait::async_trait;
use tracing::debug;

use crate::messages::{QueryRequest, QueryResponse};

/// Backend used when neither the CLI nor the config names one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Path of the question endpoint, relative to the backend base URL.
pub const QUERY_PATH: &str = "/query";

/// Why a backend call failed. Only ever logged; the user sees one fixed message.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to reach backend: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can answer a question. Implemented by [`Client`]; tests may
/// substitute their own.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn query(&self, question: &str) -> Result<QueryResponse, ClientError>;
}

/// QA backend reachable over HTTP.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
}

impl Client {
    /// `base_url` is e.g. `http://localhost:8000`; a trailing slash is fine.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: query_endpoint(base_url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

fn query_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), QUERY_PATH)
}

#[async_trait]
impl Backend for Client {
    async fn query(&self, question: &str) -> Result<QueryResponse, ClientError> {
        debug!(endpoint = %self.endpoint, "sending question to backend");
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&QueryRequest::new(question))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(ClientError::Transport)?;
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
