//! Query execution and answer synthesis.

use phenomix_llm::prompts;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::context::ChatContext;
use crate::error::{ChatError, ChatResult};
use crate::translator::translate;

/// The outcome of one question round trip.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// The statement that was executed, fences removed.
    pub cypher: String,
    pub rows: Vec<Value>,
    pub text: String,
}

/// Translate a question, execute the query and answer from its results.
pub async fn ask(ctx: &ChatContext, question: &str) -> ChatResult<Answer> {
    let candidate = translate(ctx, question).await?;
    answer(ctx, question, &candidate).await
}

/// Execute a candidate query and have the model interpret its results.
pub async fn answer(ctx: &ChatContext, question: &str, candidate: &str) -> ChatResult<Answer> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ChatError::EmptyQuestion);
    }

    let cypher = clean_cypher(candidate);
    let rows = ctx
        .store()
        .run_query(&cypher, ctx.allow_writes())
        .await
        .map_err(|source| ChatError::QueryFailed {
            query: cypher.clone(),
            source,
        })?;
    info!(rows = rows.len(), "Generated query executed");

    let system = prompts::interpret_system_prompt(&cypher, &rows);
    let text = ctx.model().complete(&system, question).await?;
    debug!(answer_len = text.len(), "Answer synthesized");

    Ok(Answer { cypher, rows, text })
}

/// Remove wrapping code fences, a `cypher` language tag and a trailing
/// semicolon from a model reply.
pub fn clean_cypher(raw: &str) -> String {
    let trimmed = raw.trim();

    let body = match trimmed.find("```") {
        Some(start) => {
            let after = &trimmed[start + 3..];
            match after.find("```") {
                Some(end) => &after[..end],
                None => after,
            }
        }
        None => trimmed,
    };

    let body = body.trim_start();
    let body = match body.get(..6) {
        Some(tag) if tag.eq_ignore_ascii_case("cypher") => {
            let rest = &body[6..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest
            } else {
                body
            }
        }
        _ => body,
    };

    body.trim().trim_end_matches(';').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::{context, MemoryStore, ScriptedModel};
    use phenomix_graph::GraphError;
    use serde_json::json;

    #[test]
    fn test_clean_cypher_variants() {
        let expected = "MATCH (p:phenotype) RETURN p";
        for raw in [
            "MATCH (p:phenotype) RETURN p",
            "```MATCH (p:phenotype) RETURN p```",
            "```cypher\nMATCH (p:phenotype) RETURN p\n```",
            "```Cypher MATCH (p:phenotype) RETURN p;```",
            "Here is the query:\n```cypher\nMATCH (p:phenotype) RETURN p\n```\nHope it helps",
            "  MATCH (p:phenotype) RETURN p;  ",
        ] {
            assert_eq!(clean_cypher(raw), expected, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_clean_cypher_keeps_identifiers_starting_with_cypher() {
        assert_eq!(clean_cypher("cypherish"), "cypherish");
    }

    #[tokio::test]
    async fn test_ask_round_trip() {
        let store = Arc::new(MemoryStore {
            query_rows: vec![json!({"name": "Asthma"})],
            ..MemoryStore::default()
        });
        let model = ScriptedModel::new([
            "```cypher\nMATCH (p:phenotype) RETURN p.phenotypes AS name\n```",
            "Asthma is the only phenotype recorded.",
        ]);
        let ctx = context(store.clone(), model.clone());

        let answer = ask(&ctx, "Which phenotypes exist?").await.unwrap();
        assert_eq!(answer.cypher, "MATCH (p:phenotype) RETURN p.phenotypes AS name");
        assert_eq!(answer.rows, vec![json!({"name": "Asthma"})]);
        assert_eq!(answer.text, "Asthma is the only phenotype recorded.");

        assert_eq!(
            store.executed.lock().unwrap().clone(),
            vec!["MATCH (p:phenotype) RETURN p.phenotypes AS name".to_string()]
        );
        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].0.contains(r#"[{"name":"Asthma"}]"#));
        assert_eq!(calls[1].1, "Which phenotypes exist?");
    }

    #[tokio::test]
    async fn test_unknown_label_is_store_error_not_llm_error() {
        let store = MemoryStore {
            missing_labels: vec!["nonexistent".to_string()],
            ..MemoryStore::default()
        };
        let model = ScriptedModel::new(["MATCH (n:nonexistent) RETURN n"]);
        let ctx = context(store, model.clone());

        let err = ask(&ctx, "Show me nonexistent nodes").await.unwrap_err();
        match &err {
            ChatError::QueryFailed { query, .. } => assert_eq!(query, "MATCH (n:nonexistent) RETURN n"),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.is_store_error());
        assert!(err.to_string().contains("MATCH (n:nonexistent) RETURN n"));
        // No answer synthesis after a failed execution.
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_write_query_rejected_before_execution() {
        let store = Arc::new(MemoryStore::default());
        let model = ScriptedModel::new(["MATCH (n) DETACH DELETE n"]);
        let ctx = context(store.clone(), model);

        let err = ask(&ctx, "Delete everything").await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::QueryFailed {
                source: GraphError::WriteRejected { .. },
                ..
            }
        ));
        assert!(store.executed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_allowed_when_configured() {
        let store = Arc::new(MemoryStore::default());
        let model = ScriptedModel::new(["MERGE (n:tag {name: 'x'})", "Done."]);
        let ctx = context(store.clone(), model).with_allow_writes(true);

        let answer = ask(&ctx, "Add a tag").await.unwrap();
        assert_eq!(answer.text, "Done.");
        assert_eq!(store.executed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_answer_model_failure_is_llm_error() {
        let model = ScriptedModel::new(["MATCH (p:phenotype) RETURN p"]);
        let ctx = context(MemoryStore::default(), model);

        let err = ask(&ctx, "Anything?").await.unwrap_err();
        assert!(matches!(err, ChatError::Llm(_)));
    }
}
