//! Detail node lookups.

use neo4rs::BoltType;
use phenomix_core::{Properties, Source};

use crate::client::GraphClient;
use crate::convert::row_node_properties;
use crate::error::GraphResult;

/// Detail nodes of `source` whose `PID` equals `pid`.
///
/// Normally zero or one node; duplicates in the data are all returned.
pub async fn details_by_pid(
    client: &GraphClient,
    source: Source,
    pid: &str,
) -> GraphResult<Vec<Properties>> {
    let cypher = format!(
        "MATCH (d:{} {{PID: $pid}}) RETURN d",
        source.detail_label()
    );
    let rows = client
        .query(&cypher, vec![("pid", BoltType::from(pid))])
        .await?;
    Ok(rows.iter().filter_map(|row| row_node_properties(row, "d")).collect())
}
