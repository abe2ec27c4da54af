//! Natural-language question to Cypher.

use phenomix_llm::prompts;
use tracing::{debug, info};

use crate::context::ChatContext;
use crate::error::{ChatError, ChatResult};

/// Ask the model for a Cypher statement answering `question`.
///
/// The reply is returned as-is, code fences included; it is cleaned and
/// screened only when executed.
pub async fn translate(ctx: &ChatContext, question: &str) -> ChatResult<String> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ChatError::EmptyQuestion);
    }

    info!(model = ctx.model().model_name(), "Translating question to Cypher");
    let cypher = ctx
        .model()
        .complete(&prompts::translate_system_prompt(), question)
        .await?;
    debug!(cypher = %cypher, "Model proposed query");

    Ok(cypher)
}
