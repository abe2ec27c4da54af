//! Phenomix Core Library
//!
//! Domain model for the multi-source phenotype knowledge graph
//! (Sentinel, HDRUK, CPRD, OHDSI, PheKB): phenotype identifiers,
//! per-source detail and concept records, and the schema descriptor
//! handed to the language model.

pub mod concept;
pub mod detail;
pub mod error;
pub mod lenient;
pub mod literal;
pub mod phenotype;
pub mod quality;
pub mod schema;
pub mod source;
pub mod summary;

pub use concept::{Concept, ProjectedConcept};
pub use detail::Detail;
pub use error::{CoreError, CoreResult};
pub use phenotype::{DetailPlan, HdrukRef, Phenotype, PhenotypeId};
pub use quality::DataQualityIssue;
pub use schema::SCHEMA_DESCRIPTOR;
pub use source::Source;
pub use summary::PhenotypeSummary;

/// Loosely-typed property bag as read from a graph node.
pub type Properties = std::collections::BTreeMap<String, serde_json::Value>;
