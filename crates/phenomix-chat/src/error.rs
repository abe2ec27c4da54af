//! Pipeline error types.

use phenomix_graph::GraphError;
use phenomix_llm::LlmError;
use thiserror::Error;

/// Errors raised by the question-answering pipeline.
///
/// Store and model failures stay distinct so callers can tell a bad query
/// from an unreachable or misbehaving model.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Graph store error: {0}")]
    Store(#[from] GraphError),

    #[error("Generated query failed: {source}\n  query: {query}")]
    QueryFailed {
        query: String,
        #[source]
        source: GraphError,
    },

    #[error("Language model error: {0}")]
    Llm(#[from] LlmError),
}

/// Result type for pipeline operations.
pub type ChatResult<T> = Result<T, ChatError>;

impl ChatError {
    /// Whether the failure came from the graph store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_) | Self::QueryFailed { .. })
    }
}
