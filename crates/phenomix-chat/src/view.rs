//! Single-phenotype view: details plus concepts projected onto each detail.

use std::collections::BTreeMap;

use phenomix_core::{Concept, DataQualityIssue, PhenotypeId, ProjectedConcept, Source};
use phenomix_graph::PhenotypeStore;
use serde::Serialize;
use tracing::warn;

use crate::error::ChatResult;
use crate::resolver::{resolve_phenotype, ResolvedPhenotype};

/// Concepts of one detail record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailConcepts {
    pub detail_pid: String,
    pub concepts: Vec<ProjectedConcept>,
}

/// Everything shown for one phenotype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhenotypeView {
    #[serde(flatten)]
    pub resolved: ResolvedPhenotype,
    pub concepts: BTreeMap<Source, Vec<DetailConcepts>>,
}

impl PhenotypeView {
    pub fn concepts_for(&self, source: Source) -> &[DetailConcepts] {
        self.concepts.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Load a phenotype by ID; `None` when the ID is unknown.
pub async fn view_phenotype(
    store: &dyn PhenotypeStore,
    id: &PhenotypeId,
) -> ChatResult<Option<PhenotypeView>> {
    let Some(phenotype) = store.get_phenotype(id).await? else {
        return Ok(None);
    };

    let mut resolved = resolve_phenotype(store, phenotype).await?;
    let mut concepts: BTreeMap<Source, Vec<DetailConcepts>> = BTreeMap::new();

    for source in Source::ALL.into_iter().filter(Source::has_concepts) {
        let pids: Vec<String> = resolved
            .details_for(source)
            .iter()
            .map(|d| d.pid().to_string())
            .collect();

        let mut per_detail = Vec::with_capacity(pids.len());
        for pid in pids {
            let (projected, issues) = load_concepts(store, source, &pid).await?;
            resolved.issues.extend(issues);
            per_detail.push(DetailConcepts {
                detail_pid: pid,
                concepts: projected,
            });
        }
        concepts.insert(source, per_detail);
    }

    Ok(Some(PhenotypeView { resolved, concepts }))
}

async fn load_concepts(
    store: &dyn PhenotypeStore,
    source: Source,
    pid: &str,
) -> ChatResult<(Vec<ProjectedConcept>, Vec<DataQualityIssue>)> {
    let mut projected = Vec::new();
    let mut issues = Vec::new();

    for properties in store.concepts_for_detail(source, pid).await? {
        match Concept::from_properties(source, properties) {
            Ok(concept) => {
                for issue in concept.parallel_array_issues() {
                    warn!(%issue, "Concept arrays out of step with PIDs");
                    issues.push(issue);
                }
                projected.push(concept.project(pid));
            }
            Err(e) => {
                warn!(%source, %pid, error = %e, "Skipping malformed concept");
                issues.push(DataQualityIssue::MalformedConcept {
                    source,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok((projected, issues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{phenotype, MemoryStore};
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::with_phenotypes(vec![phenotype("SHXXX0001", "Anaphylaxis")
            .with_reference(Source::Sentinel, "S2")
            .with_reference(Source::Hdruk, "['H7']")])
        .detail(Source::Sentinel, json!({"PID": "S2", "outcome": "Anaphylaxis"}))
        .detail(Source::Hdruk, json!({"PID": "H7", "name": "Anaphylaxis (HDRUK)"}))
        .concept(
            Source::Sentinel,
            "S2",
            json!({
                "CID": "SC1",
                "description": "Anaphylactic shock",
                "PIDs": ["S1", "S2"],
                "care_setting": ["IP", "ED"],
                "code": "T78.2",
            }),
        )
        .concept(
            Source::Sentinel,
            "S2",
            json!({
                "CID": "SC2",
                "description": "Angioedema",
                "PIDs": "['S2', 'S3']",
                "care_setting": "['ED']",
            }),
        )
        .concept(Source::Sentinel, "S2", json!({"description": "no id"}))
    }

    #[tokio::test]
    async fn test_view_projects_concepts_onto_detail() {
        let store = store();
        let id = PhenotypeId::parse("SHXXX0001").unwrap();
        let view = view_phenotype(&store, &id).await.unwrap().unwrap();

        assert_eq!(view.resolved.details_for(Source::Sentinel).len(), 1);
        assert_eq!(view.resolved.details_for(Source::Hdruk).len(), 1);
        assert!(view.concepts_for(Source::Hdruk).is_empty());

        let sentinel = view.concepts_for(Source::Sentinel);
        assert_eq!(sentinel.len(), 1);
        assert_eq!(sentinel[0].detail_pid, "S2");
        let concepts = &sentinel[0].concepts;
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[0].attributes["care_setting"], json!("ED"));
        assert_eq!(concepts[0].attributes["code"], json!("T78.2"));
        assert_eq!(concepts[1].name.as_deref(), Some("Angioedema"));
    }

    #[tokio::test]
    async fn test_view_reports_concept_problems() {
        let store = store();
        let id = PhenotypeId::parse("SHXXX0001").unwrap();
        let view = view_phenotype(&store, &id).await.unwrap().unwrap();

        let issues = &view.resolved.issues;
        assert!(issues
            .iter()
            .any(|i| matches!(i, DataQualityIssue::ParallelArrayMismatch { cid, .. } if cid == "SC2")));
        assert!(issues
            .iter()
            .any(|i| matches!(i, DataQualityIssue::MalformedConcept { source: Source::Sentinel, .. })));
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = store();
        let id = PhenotypeId::parse("XXXXX9999").unwrap();
        assert!(view_phenotype(&store, &id).await.unwrap().is_none());
    }
}
