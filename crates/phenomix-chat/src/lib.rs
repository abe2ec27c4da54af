//! # Phenomix Chat
//!
//! The question-answering pipeline over the phenotype graph:
//!
//! - [`translator`]: natural-language question to Cypher
//! - [`answer`]: execute the query and synthesize an answer
//! - [`resolver`]: find phenotypes named in text and resolve their details
//! - [`summarize`]: per-source summaries of resolved phenotypes
//! - [`related`]: phenotypes sharing concepts with the resolved ones
//! - [`view`]: a single phenotype with details and projected concepts

pub mod answer;
pub mod context;
pub mod error;
pub mod related;
pub mod resolver;
pub mod summarize;
pub mod translator;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use answer::{ask, Answer};
pub use context::ChatContext;
pub use error::{ChatError, ChatResult};
pub use related::{find_related, RelatedPhenotypes};
pub use resolver::{resolve, Resolution, ResolvedPhenotype};
pub use summarize::{describe, Description, SummaryOutcome};
pub use translator::translate;
pub use view::{view_phenotype, DetailConcepts, PhenotypeView};
