//! Evaluation Service Integration
//!
//! Access to the remote evaluator through a common trait interface.
//!
//! # Usage
//!
//! ```ignore
//! use calc_controller::service::{EvaluationService, HttpEvaluationService};
//!
//! let service = HttpEvaluationService::new("http://localhost:5000")?;
//! let evaluation = service.calculate("12×3").await?;
//! println!("{}", evaluation.result);
//! ```

mod http;
mod traits;

pub use http::{HttpEvaluationService, DEFAULT_SERVICE_URL};
pub use traits::{Evaluation, EvaluationError, EvaluationService};
