//! Language model error types.

use thiserror::Error;

/// Errors from chat completion calls.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Config(String),

    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM authentication failed ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("LLM rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("LLM API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned an empty response")]
    EmptyResponse,

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

/// Result type for language model calls.
pub type LlmResult<T> = Result<T, LlmError>;
