//! Live schema introspection.

use phenomix_core::Source;

use crate::client::GraphClient;
use crate::convert::optional_text;
use crate::error::GraphResult;

/// Distinct property keys present on nodes with the given label.
pub async fn property_keys(client: &GraphClient, label: &str) -> GraphResult<Vec<String>> {
    let cypher = format!(
        "MATCH (n:`{}`) UNWIND keys(n) AS key RETURN DISTINCT key ORDER BY key",
        label.replace('`', "")
    );
    let rows = client.query(&cypher, Vec::new()).await?;
    Ok(rows.iter().filter_map(|row| optional_text(row, "key")).collect())
}

/// Property keys of every detail label, in source order.
pub async fn detail_property_keys(client: &GraphClient) -> GraphResult<Vec<(Source, Vec<String>)>> {
    let mut keys = Vec::with_capacity(Source::ALL.len());
    for source in Source::ALL {
        keys.push((source, property_keys(client, source.detail_label()).await?));
    }
    Ok(keys)
}
