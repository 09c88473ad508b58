//! HTTP Evaluation Service
//!
//! Client for the calculator web service.
//!
//! # Endpoints
//!
//! - `POST /calculate` - evaluate `{"expression": ...}`, returns the result
//!   and the updated history
//! - `GET /history` - stored history, newest first
//! - `DELETE /history` - clear stored history
//!
//! The service reports malformed expressions with a 400 and a body of
//! `{"result": "Error", "error": "..."}`; that surfaces here as
//! [`EvaluationError::Status`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::traits::{Evaluation, EvaluationError, EvaluationService};
use crate::history::HistoryEntry;

/// Default service address (the service's development server)
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// Body of `GET`/`DELETE /history`
#[derive(Debug, Deserialize)]
struct HistoryBody {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

/// Error body the service sends with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the evaluation service
#[derive(Clone)]
pub struct HttpEvaluationService {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpEvaluationService {
    /// Create a client for `base_url` with no request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: builder.build()?,
        })
    }

    /// The base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn calculate_url(&self) -> String {
        format!("{}/calculate", self.base_url)
    }

    fn history_url(&self) -> String {
        format!("{}/history", self.base_url)
    }

    /// Turn a response into its body text, mapping failure statuses
    async fn read_body(response: reqwest::Response) -> Result<String, EvaluationError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EvaluationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(EvaluationError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }
}

/// Pull the `error` field out of a failure body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Decode a `POST /calculate` success body
pub(crate) fn decode_evaluation(body: &str) -> Result<Evaluation, EvaluationError> {
    serde_json::from_str(body).map_err(|e| EvaluationError::Decode(e.to_string()))
}

/// Decode a `/history` body
pub(crate) fn decode_history(body: &str) -> Result<Vec<HistoryEntry>, EvaluationError> {
    serde_json::from_str::<HistoryBody>(body)
        .map(|b| b.history)
        .map_err(|e| EvaluationError::Decode(e.to_string()))
}

fn transport(err: &reqwest::Error) -> EvaluationError {
    EvaluationError::Transport(err.to_string())
}

#[async_trait]
impl EvaluationService for HttpEvaluationService {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(self.history_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }

    async fn calculate(&self, expression: &str) -> Result<Evaluation, EvaluationError> {
        let request = serde_json::json!({ "expression": expression });

        let response = self
            .http_client
            .post(self.calculate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let body = Self::read_body(response).await?;
        decode_evaluation(&body)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, EvaluationError> {
        let response = self
            .http_client
            .get(self.history_url())
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let body = Self::read_body(response).await?;
        decode_history(&body)
    }

    async fn clear_history(&self) -> Result<Vec<HistoryEntry>, EvaluationError> {
        let response = self
            .http_client
            .delete(self.history_url())
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let body = Self::read_body(response).await?;
        decode_history(&body)
    }
}
