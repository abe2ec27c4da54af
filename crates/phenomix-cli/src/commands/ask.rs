//! Ask a question about the phenotype database.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use phenomix_chat::{answer, related, summarize, translate, ChatContext};

use crate::config::PhenomixConfig;
use crate::output;

#[derive(Args)]
pub struct AskArgs {
    /// The question, in plain English
    #[arg(required = true)]
    pub question: Vec<String>,

    /// Show the generated Cypher
    #[arg(long)]
    pub show_cypher: bool,

    /// Summarize the phenotypes mentioned in the answer
    #[arg(long)]
    pub describe: bool,

    /// List phenotypes related to those mentioned in the answer
    #[arg(long)]
    pub related: bool,
}

pub async fn execute(args: AskArgs, config: &PhenomixConfig) -> Result<()> {
    let question = super::join_words(&args.question);
    if question.is_empty() {
        bail!("Question is empty");
    }

    let ctx = super::chat_context(config).await?;

    let candidate = translate(&ctx, &question).await?;
    let cleaned = answer::clean_cypher(&candidate);
    if args.show_cypher {
        println!("{}", "Cypher:".bold());
        println!("{}", cleaned.cyan());
        println!();
    }

    let result = answer::answer(&ctx, &question, &candidate).await?;
    println!("{}", "Answer:".bold());
    println!("{}", output::render_links(&result.text));

    if args.describe || args.related {
        follow_up(&ctx, &result.text, args.describe, args.related).await?;
    }

    Ok(())
}

/// Describe and/or relate the phenotypes mentioned in the answer, sharing
/// one round of summaries between both.
async fn follow_up(
    ctx: &ChatContext,
    text: &str,
    show_descriptions: bool,
    show_related: bool,
) -> Result<()> {
    let description = summarize::describe(ctx, text).await?;

    if show_descriptions {
        println!();
        println!("{}", "Relevant Phenotype Descriptions:".bold());
        super::describe::print_description(&description);
    }

    if show_related {
        let found = related::related_from_summaries(ctx, &description.summaries).await?;
        println!();
        println!("{}", "Related phenotypes:".bold());
        output::print_related(&found);
    }

    Ok(())
}
