//! The store seam between the question-answering pipeline and Neo4j.

use async_trait::async_trait;
use phenomix_core::{Phenotype, PhenotypeId, Properties, Source};
use serde_json::Value;

use crate::client::GraphClient;
use crate::error::GraphResult;
use crate::queries::{concepts, details, generated, phenotypes, related};
use crate::queries::related::SharedConcepts;

/// Read access to the phenotype graph.
///
/// Every operation is a single self-contained statement; implementations
/// must be shareable across concurrent sessions.
#[async_trait]
pub trait PhenotypeStore: Send + Sync {
    /// All phenotype master records.
    async fn list_phenotypes(&self) -> GraphResult<Vec<Phenotype>>;

    /// One phenotype master record by ID.
    async fn get_phenotype(&self, id: &PhenotypeId) -> GraphResult<Option<Phenotype>>;

    /// Raw properties of the detail nodes of `source` with the given PID.
    async fn details_by_pid(&self, source: Source, pid: &str) -> GraphResult<Vec<Properties>>;

    /// Raw properties of the concepts attached to a detail.
    async fn concepts_for_detail(&self, source: Source, pid: &str) -> GraphResult<Vec<Properties>>;

    /// Distinct concept IDs reachable from the named phenotype.
    async fn concept_ids_for_phenotype(&self, name: &str) -> GraphResult<Vec<String>>;

    /// Phenotypes sharing at least one of `cids`, with overlap counts.
    async fn phenotypes_sharing_concepts(&self, cids: &[String]) -> GraphResult<Vec<SharedConcepts>>;

    /// Execute generated Cypher; rejects writes unless `allow_writes`.
    async fn run_query(&self, cypher: &str, allow_writes: bool) -> GraphResult<Vec<Value>>;
}

#[async_trait]
impl PhenotypeStore for GraphClient {
    async fn list_phenotypes(&self) -> GraphResult<Vec<Phenotype>> {
        phenotypes::list_phenotypes(self).await
    }

    async fn get_phenotype(&self, id: &PhenotypeId) -> GraphResult<Option<Phenotype>> {
        phenotypes::get_phenotype(self, id).await
    }

    async fn details_by_pid(&self, source: Source, pid: &str) -> GraphResult<Vec<Properties>> {
        details::details_by_pid(self, source, pid).await
    }

    async fn concepts_for_detail(&self, source: Source, pid: &str) -> GraphResult<Vec<Properties>> {
        concepts::concepts_for_detail(self, source, pid).await
    }

    async fn concept_ids_for_phenotype(&self, name: &str) -> GraphResult<Vec<String>> {
        related::concept_ids_for_phenotype(self, name).await
    }

    async fn phenotypes_sharing_concepts(&self, cids: &[String]) -> GraphResult<Vec<SharedConcepts>> {
        related::phenotypes_sharing_concepts(self, cids).await
    }

    async fn run_query(&self, cypher: &str, allow_writes: bool) -> GraphResult<Vec<Value>> {
        generated::run_generated(self, cypher, allow_writes).await
    }
}
