//! # Phenomix Graph
//!
//! Neo4j access for the phenotype knowledge graph.
//!
//! Provides the connection client, parameterized lookups of phenotypes,
//! details and concepts, shared-concept queries, execution of generated
//! Cypher behind a read-only guard, and the `PhenotypeStore` seam used by
//! the question-answering pipeline.

pub mod client;
pub mod convert;
pub mod error;
pub mod queries;
pub mod readonly;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use error::{GraphError, GraphResult};
pub use queries::related::SharedConcepts;
pub use readonly::{check_read_only, WriteClause};
pub use store::PhenotypeStore;
