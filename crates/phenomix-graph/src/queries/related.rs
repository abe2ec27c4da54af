//! Shared-concept queries backing related-phenotype discovery.

use neo4rs::BoltType;
use serde::Serialize;

use crate::client::GraphClient;
use crate::convert::optional_text;
use crate::error::{GraphError, GraphResult};

/// A phenotype and the number of distinct concepts it shares with a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedConcepts {
    pub name: String,
    pub shared_count: u64,
}

/// Distinct concept IDs reachable from the named phenotype.
pub async fn concept_ids_for_phenotype(client: &GraphClient, name: &str) -> GraphResult<Vec<String>> {
    let cypher = "MATCH (p:phenotype {phenotypes: $name})-[:DETAILS_ARE]->(d)-[:HAS_CONCEPT]->(c) \
                  WHERE c.CID IS NOT NULL \
                  RETURN DISTINCT toString(c.CID) AS cid ORDER BY cid";
    let rows = client
        .query(cypher, vec![("name", BoltType::from(name))])
        .await?;
    Ok(rows.iter().filter_map(|row| optional_text(row, "cid")).collect())
}

/// Phenotypes with at least one concept in `cids`, with their overlap.
pub async fn phenotypes_sharing_concepts(
    client: &GraphClient,
    cids: &[String],
) -> GraphResult<Vec<SharedConcepts>> {
    if cids.is_empty() {
        return Ok(Vec::new());
    }

    let cypher = "MATCH (p:phenotype)-[:DETAILS_ARE]->(d)-[:HAS_CONCEPT]->(c) \
                  WHERE toString(c.CID) IN $cids \
                  RETURN p.phenotypes AS name, count(DISTINCT c) AS shared_count \
                  ORDER BY shared_count DESC, name";
    let rows = client
        .query(cypher, vec![("cids", BoltType::from(cids.to_vec()))])
        .await?;

    let mut shared = Vec::with_capacity(rows.len());
    for row in &rows {
        let Some(name) = optional_text(row, "name") else {
            continue;
        };
        let count: i64 = row
            .get("shared_count")
            .map_err(|e| GraphError::decode("shared_count", e))?;
        shared.push(SharedConcepts {
            name,
            shared_count: count.max(0) as u64,
        });
    }
    Ok(shared)
}
