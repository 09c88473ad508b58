//! Evaluation Service Traits
//!
//! The calculator never evaluates anything itself. It hands the expression
//! text to an [`EvaluationService`] and shows whatever comes back.
//!
//! The trait keeps the calculator independent of the transport so that the
//! HTTP client and test doubles are interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::HistoryEntry;

/// Outcome of a successful evaluation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Result string as the service formatted it
    pub result: String,
    /// The service's history after recording this evaluation
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Failures talking to the evaluation service
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The request never produced a response
    #[error("evaluation service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("evaluation service returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error text from the body, or the raw body
        message: String,
    },

    /// The response body could not be decoded
    #[error("undecodable evaluation response: {0}")]
    Decode(String),
}

impl EvaluationError {
    /// Whether the service was reached at all
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Evaluation service
///
/// Implement this trait to plug a different evaluator into the calculator.
#[async_trait]
pub trait EvaluationService: Send + Sync {
    /// Service name for logs
    fn name(&self) -> &str;

    /// Check whether the service is reachable
    async fn health_check(&self) -> bool;

    /// Evaluate an expression
    async fn calculate(&self, expression: &str) -> Result<Evaluation, EvaluationError>;

    /// Fetch the stored history
    async fn history(&self) -> Result<Vec<HistoryEntry>, EvaluationError>;

    /// Clear the stored history, returning what remains
    async fn clear_history(&self) -> Result<Vec<HistoryEntry>, EvaluationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_without_history_field() {
        let evaluation: Evaluation = serde_json::from_str(r#"{"result":"4"}"#).unwrap();
        assert_eq!(evaluation.result, "4");
        assert!(evaluation.history.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = EvaluationError::Status {
            status: 400,
            message: "division by zero".into(),
        };
        assert_eq!(
            err.to_string(),
            "evaluation service returned 400: division by zero"
        );
        assert!(!err.is_transport());
        assert!(EvaluationError::Transport("refused".into()).is_transport());
    }
}
