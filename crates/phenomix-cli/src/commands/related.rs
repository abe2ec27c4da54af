//! Related phenotypes by shared concepts.

use anyhow::{bail, Result};
use clap::Args;
use phenomix_chat::find_related;

use crate::config::PhenomixConfig;
use crate::output;

#[derive(Args)]
pub struct RelatedArgs {
    /// Text mentioning one or more phenotypes
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: RelatedArgs, config: &PhenomixConfig) -> Result<()> {
    let text = super::join_words(&args.text);
    if text.is_empty() {
        bail!("Text is empty");
    }

    let ctx = super::chat_context(config).await?;
    let related = find_related(&ctx, &text).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&related)?);
    } else {
        output::print_related(&related);
    }
    Ok(())
}
