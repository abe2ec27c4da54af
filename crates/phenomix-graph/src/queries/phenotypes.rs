//! Phenotype master list queries.

use neo4rs::Row;
use phenomix_core::{Phenotype, PhenotypeId, Source};
use tracing::warn;

use crate::client::GraphClient;
use crate::convert::optional_text;
use crate::error::GraphResult;

const PHENOTYPE_COLUMNS: &str = "p.id AS id, p.phenotypes AS name, \
     toString(p.sentinel_PID) AS sentinel_PID, \
     p.hdruk_PID AS hdruk_PID, \
     toString(p.cprd_PID) AS cprd_PID, \
     toString(p.ohdsi_PID) AS ohdsi_PID, \
     toString(p.phekb_PID) AS phekb_PID";

/// All phenotype master records, ordered by ID.
///
/// Records with a missing or malformed ID are skipped with a warning.
pub async fn list_phenotypes(client: &GraphClient) -> GraphResult<Vec<Phenotype>> {
    let cypher = format!("MATCH (p:phenotype) RETURN {} ORDER BY id", PHENOTYPE_COLUMNS);
    let rows = client.query(&cypher, Vec::new()).await?;
    Ok(rows.iter().filter_map(phenotype_from_row).collect())
}

/// A single phenotype by global ID.
pub async fn get_phenotype(client: &GraphClient, id: &PhenotypeId) -> GraphResult<Option<Phenotype>> {
    let cypher = format!(
        "MATCH (p:phenotype {{id: $id}}) RETURN {} LIMIT 1",
        PHENOTYPE_COLUMNS
    );
    let rows = client
        .query(&cypher, vec![("id", id.as_str().into())])
        .await?;
    Ok(rows.iter().find_map(phenotype_from_row))
}

fn phenotype_from_row(row: &Row) -> Option<Phenotype> {
    let raw_id = optional_text(row, "id")?;
    let id = match PhenotypeId::parse(&raw_id) {
        Ok(id) => id,
        Err(e) => {
            warn!(id = %raw_id, error = %e, "Skipping phenotype with invalid ID");
            return None;
        }
    };
    let name = optional_text(row, "name").unwrap_or_default();

    let mut phenotype = Phenotype::new(id, name);
    for source in Source::ALL {
        if let Some(raw) = optional_text(row, source.pid_property()) {
            phenotype = phenotype.with_reference(source, raw);
        }
    }
    Some(phenotype)
}
