use reqwest::StatusCode;
use thiserror::Error;

/// Ways a single completion round trip can fail.
///
/// A successful response without a usable answer is not an error; see
/// [`crate::model::CompletionResult::answer`].
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("OpenRouter API key must be provided via --api-key or prompted input.")]
    MissingCredential,
    #[error("{0}")]
    Network(String),
    #[error("Model request failed with status {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("Failed to parse model response: {0}")]
    InvalidResponse(String),
}
