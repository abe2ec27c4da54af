//! Centralized error types for the domain model.

use thiserror::Error;

use crate::Source;

/// Errors raised while validating records at the store/LLM boundary.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid phenotype ID '{0}': expected at least 5 characters")]
    InvalidPhenotypeId(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Malformed {db} record: {reason}")]
    MalformedRecord { db: Source, reason: String },

    #[error("Malformed summary: {reason}")]
    MalformedSummary { reason: String, raw: String },
}

/// Result type for domain model operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a malformed record error.
    pub fn malformed(db: Source, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            db,
            reason: reason.into(),
        }
    }
}
