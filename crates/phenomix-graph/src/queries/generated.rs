//! Execution of model-generated Cypher.

use serde_json::Value;
use tracing::{debug, info};

use crate::client::GraphClient;
use crate::convert::row_to_json;
use crate::error::GraphResult;
use crate::readonly::check_read_only;

/// Run a generated statement and return its rows as JSON objects.
///
/// Unless `allow_writes` is set, statements containing write clauses are
/// rejected before reaching the database.
pub async fn run_generated(
    client: &GraphClient,
    cypher: &str,
    allow_writes: bool,
) -> GraphResult<Vec<Value>> {
    if !allow_writes {
        check_read_only(cypher)?;
    }

    info!("Running generated query");
    debug!(query = %cypher);

    let rows = client.query(cypher, Vec::new()).await?;
    Ok(rows.iter().map(row_to_json).collect())
}
