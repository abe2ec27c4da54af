//! Concept lookups through `HAS_CONCEPT`.

use neo4rs::BoltType;
use phenomix_core::{Properties, Source};

use crate::client::GraphClient;
use crate::convert::row_node_properties;
use crate::error::GraphResult;

/// Concepts attached to the detail with the given PID.
///
/// HDRUK has no concept nodes, so the result is always empty there.
pub async fn concepts_for_detail(
    client: &GraphClient,
    source: Source,
    pid: &str,
) -> GraphResult<Vec<Properties>> {
    let Some(concept_label) = source.concept_label() else {
        return Ok(Vec::new());
    };

    let cypher = format!(
        "MATCH (d:{} {{PID: $pid}})-[:HAS_CONCEPT]->(c:{}) RETURN c ORDER BY c.CID",
        source.detail_label(),
        concept_label
    );
    let rows = client
        .query(&cypher, vec![("pid", BoltType::from(pid))])
        .await?;
    Ok(rows.iter().filter_map(|row| row_node_properties(row, "c")).collect())
}
