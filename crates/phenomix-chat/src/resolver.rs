//! Cross-reference resolution: phenotypes named in text and their details.

use std::collections::{BTreeMap, HashSet};

use phenomix_core::{DataQualityIssue, Detail, Phenotype, PhenotypeId, Source};
use phenomix_graph::PhenotypeStore;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::error::ChatResult;

/// A matched phenotype with its per-source detail records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPhenotype {
    pub phenotype: Phenotype,
    /// Every source is present; empty when absent or unresolved.
    pub details: BTreeMap<Source, Vec<Detail>>,
    pub issues: Vec<DataQualityIssue>,
}

impl ResolvedPhenotype {
    /// Details found for one source.
    pub fn details_for(&self, source: Source) -> &[Detail] {
        self.details.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether no source produced any detail.
    pub fn is_empty(&self) -> bool {
        self.details.values().all(Vec::is_empty)
    }

    /// The raw description handed to the summarization prompt.
    pub fn bundle(&self) -> Value {
        let mut details = Map::new();
        for (source, records) in &self.details {
            let records: Vec<Value> = records
                .iter()
                .map(|d| Value::Object(d.display_properties().into_iter().collect()))
                .collect();
            details.insert(source.key().to_string(), Value::Array(records));
        }

        json!({
            "id": self.phenotype.id.as_str(),
            "name": self.phenotype.name,
            "details": details,
        })
    }
}

/// Every phenotype matched in a piece of text, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub matches: Vec<ResolvedPhenotype>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Names of the matched phenotypes.
    pub fn names(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.phenotype.name.as_str()).collect()
    }

    /// Data-quality issues across all matches.
    pub fn issues(&self) -> impl Iterator<Item = &DataQualityIssue> {
        self.matches.iter().flat_map(|m| m.issues.iter())
    }
}

/// Phenotypes whose name matches `text`, deduplicated by ID.
///
/// The first occurrence of an ID wins; order follows the catalog.
pub async fn match_phenotypes(store: &dyn PhenotypeStore, text: &str) -> ChatResult<Vec<Phenotype>> {
    let text_lower = text.to_lowercase();
    let catalog = store.list_phenotypes().await?;
    let total = catalog.len();

    let mut seen: HashSet<PhenotypeId> = HashSet::new();
    let matches: Vec<Phenotype> = catalog
        .into_iter()
        .filter(|p| p.matches_text(&text_lower))
        .filter(|p| seen.insert(p.id.clone()))
        .collect();

    debug!(matched = matches.len(), catalog = total, "Matched phenotype names");
    Ok(matches)
}

/// Find phenotypes named in `text` and resolve their details.
pub async fn resolve(store: &dyn PhenotypeStore, text: &str) -> ChatResult<Resolution> {
    let phenotypes = match_phenotypes(store, text).await?;

    let mut matches = Vec::with_capacity(phenotypes.len());
    for phenotype in phenotypes {
        matches.push(resolve_phenotype(store, phenotype).await?);
    }

    info!(matches = matches.len(), "Resolved phenotype cross-references");
    Ok(Resolution { matches })
}

/// Fetch the detail records of every source the phenotype references.
///
/// Malformed records are skipped and reported as data-quality issues.
pub async fn resolve_phenotype(
    store: &dyn PhenotypeStore,
    phenotype: Phenotype,
) -> ChatResult<ResolvedPhenotype> {
    let plan = phenotype.detail_plan();
    let mut issues = plan.issues;
    let mut details: BTreeMap<Source, Vec<Detail>> =
        Source::ALL.into_iter().map(|s| (s, Vec::new())).collect();

    for (source, pid) in plan.lookups {
        for properties in store.details_by_pid(source, &pid).await? {
            match Detail::from_properties(source, properties) {
                Ok(detail) => details.entry(source).or_default().push(detail),
                Err(e) => {
                    warn!(%source, %pid, error = %e, "Skipping malformed detail");
                    issues.push(DataQualityIssue::MalformedDetail {
                        source,
                        pid: pid.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(ResolvedPhenotype {
        phenotype,
        details,
        issues,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::{phenotype, MemoryStore};

    fn diabetes_store() -> MemoryStore {
        MemoryStore::with_phenotypes(vec![
            phenotype("XXCXX0001", "Diabetes Mellitus Type 2").with_reference(Source::Cprd, "C100"),
            phenotype("SXXXX0002", "Asthma").with_reference(Source::Sentinel, "S200"),
        ])
        .detail(Source::Cprd, json!({"PID": "C100", "disease": "Type 2 diabetes", "disease_num": 42}))
        .detail(Source::Sentinel, json!({"PID": "S200", "outcome": "Asthma"}))
    }

    #[tokio::test]
    async fn test_short_query_matches_longer_name() {
        let store = diabetes_store();
        let resolution = resolve(&store, "diabetes").await.unwrap();

        assert_eq!(resolution.matches.len(), 1);
        let matched = &resolution.matches[0];
        assert_eq!(matched.phenotype.name, "Diabetes Mellitus Type 2");
        assert_eq!(matched.details_for(Source::Cprd).len(), 1);
        assert_eq!(matched.details_for(Source::Cprd)[0].title(), Some("Type 2 diabetes"));
        assert!(matched.details_for(Source::Sentinel).is_empty());
        assert_eq!(matched.details.len(), Source::ALL.len());
    }

    #[tokio::test]
    async fn test_name_mentioned_in_answer_text() {
        let store = diabetes_store();
        let resolution = resolve(&store, "Patients with ASTHMA were excluded.").await.unwrap();
        assert_eq!(resolution.names(), vec!["Asthma"]);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_resolution() {
        let store = diabetes_store();
        let resolution = resolve(&store, "gout").await.unwrap();
        assert!(resolution.is_empty());
        assert!(store.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_deduplicated_first_wins() {
        let store = MemoryStore::with_phenotypes(vec![
            phenotype("XXCXX0001", "Gout"),
            phenotype("XXCXX0001", "Gouty arthritis"),
            phenotype("XXXOX0003", "Gout flare"),
        ]);
        let matches = match_phenotypes(&store, "gout").await.unwrap();
        let names: Vec<&str> = matches.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Gout", "Gout flare"]);
    }

    #[tokio::test]
    async fn test_details_only_for_flagged_sources() {
        let store = MemoryStore::with_phenotypes(vec![phenotype("XXCXX0001", "Gout")
            .with_reference(Source::Cprd, "C1")
            .with_reference(Source::Sentinel, "S1")]);

        let resolution = resolve(&store, "gout").await.unwrap();
        assert_eq!(store.lookups(), vec![(Source::Cprd, "C1".to_string())]);
        assert!(matches!(
            resolution.matches[0].issues.as_slice(),
            [DataQualityIssue::UnflaggedReference { source: Source::Sentinel, .. }]
        ));
    }

    #[tokio::test]
    async fn test_hdruk_list_queried_per_element() {
        let store = MemoryStore::with_phenotypes(vec![
            phenotype("XHXXX0001", "Gout").with_reference(Source::Hdruk, "['H001','H002']"),
        ])
        .detail(Source::Hdruk, json!({"PID": "H001", "name": "Gout v1"}))
        .detail(Source::Hdruk, json!({"PID": "H002", "name": "Gout v2"}));

        let resolution = resolve(&store, "gout").await.unwrap();
        assert_eq!(
            store.lookups(),
            vec![(Source::Hdruk, "H001".to_string()), (Source::Hdruk, "H002".to_string())]
        );
        assert_eq!(resolution.matches[0].details_for(Source::Hdruk).len(), 2);
        assert!(resolution.matches[0].issues.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_hdruk_list_yields_no_lookups_and_an_issue() {
        let store = MemoryStore::with_phenotypes(vec![
            phenotype("XHXXX0001", "Gout").with_reference(Source::Hdruk, "[H001"),
        ]);

        let resolution = resolve(&store, "gout").await.unwrap();
        assert!(store.lookups().is_empty());
        let matched = &resolution.matches[0];
        assert!(matched.details_for(Source::Hdruk).is_empty());
        assert!(matches!(
            matched.issues.as_slice(),
            [DataQualityIssue::UnparseableReference { source: Source::Hdruk, .. }]
        ));
    }

    #[tokio::test]
    async fn test_malformed_detail_reported_not_raised() {
        let store = MemoryStore::with_phenotypes(vec![
            phenotype("XXCXX0001", "Gout").with_reference(Source::Cprd, "C1"),
        ])
        .detail(Source::Cprd, json!({"PID": "C1", "disease": "Gout"}))
        .detail(Source::Cprd, json!({"PID": "C1", "disease": {"nested": true}}));

        let resolution = resolve(&store, "gout").await.unwrap();
        let matched = &resolution.matches[0];
        assert_eq!(matched.details_for(Source::Cprd).len(), 1);
        assert!(matches!(
            matched.issues.as_slice(),
            [DataQualityIssue::MalformedDetail { source: Source::Cprd, .. }]
        ));
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let store = Arc::new(diabetes_store());
        let first = resolve(store.as_ref(), "asthma and diabetes").await.unwrap();
        let second = resolve(store.as_ref(), "asthma and diabetes").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.bundles(), second.bundles());
    }

    #[test]
    fn test_bundle_shape() {
        let detail = Detail::from_properties(
            Source::Cprd,
            crate::testing::props(json!({"PID": "C1", "disease": "Gout"})),
        )
        .unwrap();
        let mut details: BTreeMap<Source, Vec<Detail>> =
            Source::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        details.insert(Source::Cprd, vec![detail]);
        let resolved = ResolvedPhenotype {
            phenotype: phenotype("XXCXX0001", "Gout"),
            details,
            issues: Vec::new(),
        };

        let bundle = resolved.bundle();
        assert_eq!(bundle["name"], "Gout");
        assert_eq!(bundle["details"]["cprd"][0]["disease"], "Gout");
        assert_eq!(bundle["details"]["sentinel"], json!([]));
    }

    impl Resolution {
        fn bundles(&self) -> Vec<Value> {
            self.matches.iter().map(|m| m.bundle()).collect()
        }
    }
}
