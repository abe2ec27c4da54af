//! Per-source phenotype summaries.

use phenomix_core::{CoreError, PhenotypeId, PhenotypeSummary};
use phenomix_llm::prompts;
use serde::Serialize;
use tracing::{info, warn};

use crate::context::ChatContext;
use crate::error::ChatResult;
use crate::resolver::{resolve, Resolution};

/// Summary result for one matched phenotype.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryOutcome {
    Parsed {
        phenotype_id: PhenotypeId,
        summary: PhenotypeSummary,
    },
    /// The model replied with something that is not the requested JSON.
    Malformed {
        phenotype_id: PhenotypeId,
        raw: String,
        reason: String,
    },
}

impl SummaryOutcome {
    pub fn phenotype_id(&self) -> &PhenotypeId {
        match self {
            Self::Parsed { phenotype_id, .. } | Self::Malformed { phenotype_id, .. } => phenotype_id,
        }
    }

    pub fn summary(&self) -> Option<&PhenotypeSummary> {
        match self {
            Self::Parsed { summary, .. } => Some(summary),
            Self::Malformed { .. } => None,
        }
    }
}

/// Resolved phenotypes together with their summaries, in match order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub resolution: Resolution,
    pub summaries: Vec<SummaryOutcome>,
}

/// Resolve the phenotypes named in `text` and summarize each one.
pub async fn describe(ctx: &ChatContext, text: &str) -> ChatResult<Description> {
    let resolution = resolve(ctx.store(), text).await?;
    let summaries = summarize(ctx, &resolution).await?;
    Ok(Description {
        resolution,
        summaries,
    })
}

/// One model call per matched phenotype.
///
/// Replies that do not parse become [`SummaryOutcome::Malformed`]; model
/// call failures abort the batch.
pub async fn summarize(ctx: &ChatContext, resolution: &Resolution) -> ChatResult<Vec<SummaryOutcome>> {
    let system = prompts::summarize_system_prompt();
    let mut outcomes = Vec::with_capacity(resolution.matches.len());

    for matched in &resolution.matches {
        let phenotype_id = matched.phenotype.id.clone();
        let raw = ctx.model().complete(system, &matched.bundle().to_string()).await?;

        let outcome = match PhenotypeSummary::parse(&raw) {
            Ok(summary) => SummaryOutcome::Parsed {
                phenotype_id,
                summary,
            },
            Err(CoreError::MalformedSummary { reason, raw }) => {
                warn!(phenotype = %phenotype_id, %reason, "Model returned a malformed summary");
                SummaryOutcome::Malformed {
                    phenotype_id,
                    raw,
                    reason,
                }
            }
            Err(e) => SummaryOutcome::Malformed {
                phenotype_id,
                raw,
                reason: e.to_string(),
            },
        };
        outcomes.push(outcome);
    }

    info!(summaries = outcomes.len(), "Summarized matched phenotypes");
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use crate::testing::{context, phenotype, MemoryStore, ScriptedModel};
    use phenomix_core::Source;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::with_phenotypes(vec![
            phenotype("XXCXX0001", "Gout").with_reference(Source::Cprd, "C1"),
            phenotype("SXXXX0002", "Asthma"),
        ])
        .detail(Source::Cprd, json!({"PID": "C1", "disease": "Gout"}))
    }

    #[tokio::test]
    async fn test_describe_one_call_per_match() {
        let model = ScriptedModel::new([
            r#"{"name": "Gout", "cprd_summary": "Read codes for gout"}"#,
            r#"```json
{"name": "Asthma", "sentinel_summary": ""}
```"#,
        ]);
        let ctx = context(store(), model.clone());

        let description = describe(&ctx, "gout and asthma").await.unwrap();
        assert_eq!(description.summaries.len(), 2);
        let gout = description.summaries[0].summary().unwrap();
        assert_eq!(gout.for_source(Source::Cprd), Some("Read codes for gout"));
        assert_eq!(description.summaries[1].summary().unwrap().name, "Asthma");

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].0.contains("summarization expert"));
        assert!(calls[0].1.contains(r#""disease":"Gout""#));
    }

    #[tokio::test]
    async fn test_malformed_summary_is_surfaced() {
        let model = ScriptedModel::new(["Sorry, I cannot help with that.", r#"{"name": "Asthma"}"#]);
        let ctx = context(store(), model);

        let description = describe(&ctx, "gout and asthma").await.unwrap();
        match &description.summaries[0] {
            SummaryOutcome::Malformed { phenotype_id, raw, .. } => {
                assert_eq!(phenotype_id.as_str(), "XXCXX0001");
                assert_eq!(raw, "Sorry, I cannot help with that.");
            }
            other => panic!("expected malformed outcome, got {:?}", other),
        }
        assert!(description.summaries[1].summary().is_some());
    }

    #[tokio::test]
    async fn test_model_failure_aborts() {
        let ctx = context(store(), ScriptedModel::failing());
        assert!(matches!(describe(&ctx, "gout").await, Err(ChatError::Llm(_))));
    }

    #[tokio::test]
    async fn test_no_matches_no_calls() {
        let model = ScriptedModel::new(Vec::<&str>::new());
        let ctx = context(store(), model.clone());

        let description = describe(&ctx, "psoriasis").await.unwrap();
        assert!(description.summaries.is_empty());
        assert!(model.calls().is_empty());
    }
}
