//! Error types for answering collaborators

use thiserror::Error;

/// Errors that can occur during answering operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Requested model is not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The service failed or timed out; the caller decides whether to retry
    #[error("Answering service unavailable: {0}")]
    Unavailable(String),
}
