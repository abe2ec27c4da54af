//! Related phenotypes by shared concepts.

use std::collections::HashSet;

use phenomix_graph::SharedConcepts;
use serde::Serialize;
use tracing::{debug, info};

use crate::context::ChatContext;
use crate::error::ChatResult;
use crate::summarize::{describe, SummaryOutcome};

/// Matched phenotype names followed by related ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedPhenotypes {
    pub matched: Vec<String>,
    /// Most shared concepts first; never repeats a matched name.
    pub related: Vec<SharedConcepts>,
}

impl RelatedPhenotypes {
    /// All names, matched first.
    pub fn names(&self) -> Vec<&str> {
        self.matched
            .iter()
            .map(String::as_str)
            .chain(self.related.iter().map(|r| r.name.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.related.is_empty()
    }
}

/// Summarize the phenotypes named in `text`, then find phenotypes sharing
/// concepts with them.
pub async fn find_related(ctx: &ChatContext, text: &str) -> ChatResult<RelatedPhenotypes> {
    let description = describe(ctx, text).await?;
    related_from_summaries(ctx, &description.summaries).await
}

/// Related phenotypes for already computed summaries.
///
/// Malformed summaries and blank or placeholder names are skipped.
pub async fn related_from_summaries(
    ctx: &ChatContext,
    summaries: &[SummaryOutcome],
) -> ChatResult<RelatedPhenotypes> {
    let mut matched: Vec<String> = Vec::new();
    for name in summaries
        .iter()
        .filter_map(SummaryOutcome::summary)
        .filter_map(|s| s.known_name())
    {
        if !matched.iter().any(|m| m == name) {
            matched.push(name.to_string());
        }
    }

    let mut cids: Vec<String> = Vec::new();
    for name in &matched {
        for cid in ctx.store().concept_ids_for_phenotype(name).await? {
            if !cids.contains(&cid) {
                cids.push(cid);
            }
        }
    }
    debug!(names = matched.len(), concepts = cids.len(), "Collected concepts of matched phenotypes");

    let shared = ctx.store().phenotypes_sharing_concepts(&cids).await?;
    let related = rank_related(shared, &matched);

    info!(matched = matched.len(), related = related.len(), "Found related phenotypes");
    Ok(RelatedPhenotypes { matched, related })
}

/// Order by shared-concept count, descending, keeping store order on ties.
///
/// Matched names (case-insensitively) and repeated names are dropped.
pub fn rank_related(mut shared: Vec<SharedConcepts>, matched: &[String]) -> Vec<SharedConcepts> {
    let excluded: HashSet<String> = matched.iter().map(|m| m.to_lowercase()).collect();
    let mut seen: HashSet<String> = HashSet::new();

    shared.sort_by(|a, b| b.shared_count.cmp(&a.shared_count));
    shared
        .into_iter()
        .filter(|s| !s.name.trim().is_empty())
        .filter(|s| {
            let key = s.name.to_lowercase();
            !excluded.contains(&key) && seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, phenotype, MemoryStore, ScriptedModel};
    use phenomix_core::Source;
    use serde_json::json;

    fn shared(name: &str, count: u64) -> SharedConcepts {
        SharedConcepts {
            name: name.to_string(),
            shared_count: count,
        }
    }

    #[test]
    fn test_rank_by_count_stable_on_ties() {
        let ranked = rank_related(
            vec![shared("A", 1), shared("B", 2), shared("C", 1), shared("D", 3)],
            &[],
        );
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn test_rank_excludes_matched_names() {
        let ranked = rank_related(
            vec![shared("Gout", 5), shared("Hyperuricemia", 2), shared("gout", 1)],
            &["Gout".to_string()],
        );
        assert_eq!(ranked, vec![shared("Hyperuricemia", 2)]);
    }

    fn gout_store() -> MemoryStore {
        MemoryStore::with_phenotypes(vec![
            phenotype("XXCXX0001", "Gout").with_reference(Source::Cprd, "C1"),
        ])
        .detail(Source::Cprd, json!({"PID": "C1", "disease": "Gout"}))
        .link("Gout", "C1")
        .link("Gout", "C2")
        .link("Kidney stones", "C1")
        .link("Hyperuricemia", "C1")
        .link("Hyperuricemia", "C2")
        .link("Asthma", "C9")
    }

    #[tokio::test]
    async fn test_phenotype_sharing_two_concepts_ranks_first() {
        let model = ScriptedModel::new([r#"{"name": "Gout", "cprd_summary": "codes"}"#]);
        let ctx = context(gout_store(), model);

        let related = find_related(&ctx, "gout").await.unwrap();
        assert_eq!(related.matched, vec!["Gout".to_string()]);
        assert_eq!(
            related.related,
            vec![shared("Hyperuricemia", 2), shared("Kidney stones", 1)]
        );
        assert_eq!(related.names(), vec!["Gout", "Hyperuricemia", "Kidney stones"]);
    }

    #[tokio::test]
    async fn test_malformed_and_unknown_summaries_skipped() {
        let model = ScriptedModel::new([r#"{"name": "Unknown"}"#]);
        let ctx = context(gout_store(), model);

        let related = find_related(&ctx, "gout").await.unwrap();
        assert!(related.is_empty());

        let model = ScriptedModel::new(["not json"]);
        let ctx = context(gout_store(), model);
        assert!(find_related(&ctx, "gout").await.unwrap().is_empty());
    }
}
