//! Graph access error types.

use thiserror::Error;

use crate::readonly::WriteClause;

/// Errors raised by the graph store.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid Neo4j configuration: {0}")]
    Config(#[source] neo4rs::Error),

    #[error("Cannot reach Neo4j at {uri}: {source}")]
    Connection {
        uri: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error("Query failed: {source}\n  query: {query}")]
    Query {
        query: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error("Failed to read field '{field}': {reason}")]
    Decode { field: String, reason: String },

    #[error("Refusing to run a query that writes to the graph ({clause})\n  query: {query}")]
    WriteRejected { clause: WriteClause, query: String },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a query error carrying the text that failed.
    pub fn query(query: impl Into<String>, source: neo4rs::Error) -> Self {
        Self::Query {
            query: query.into(),
            source,
        }
    }

    /// Create a field decode error.
    pub fn decode(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}
