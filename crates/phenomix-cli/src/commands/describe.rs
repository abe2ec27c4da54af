//! Per-source summaries of phenotypes named in text.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use phenomix_chat::{describe, Description};

use crate::config::PhenomixConfig;
use crate::output;

#[derive(Args)]
pub struct DescribeArgs {
    /// Text mentioning one or more phenotypes
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: DescribeArgs, config: &PhenomixConfig) -> Result<()> {
    let text = super::join_words(&args.text);
    if text.is_empty() {
        bail!("Text is empty");
    }

    let ctx = super::chat_context(config).await?;
    let description = describe(&ctx, &text).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&description)?);
    } else {
        print_description(&description);
    }
    Ok(())
}

pub fn print_description(description: &Description) {
    if description.resolution.is_empty() {
        println!("{}", "No known phenotypes mentioned.".dimmed());
        return;
    }

    for (matched, outcome) in description
        .resolution
        .matches
        .iter()
        .zip(&description.summaries)
    {
        output::print_summary(outcome, &matched.phenotype.name);
    }
    output::print_issues(description.resolution.issues());
}
