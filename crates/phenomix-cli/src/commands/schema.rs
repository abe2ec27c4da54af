//! Schema commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use phenomix_core::SCHEMA_DESCRIPTOR;
use phenomix_graph::queries::introspect;

use crate::config::PhenomixConfig;

#[derive(Subcommand)]
pub enum SchemaCommands {
    /// List the property keys present on each detail label
    Keys,

    /// Print the schema description sent to the language model
    Descriptor,
}

pub async fn execute(cmd: SchemaCommands, config: &PhenomixConfig) -> Result<()> {
    match cmd {
        SchemaCommands::Keys => cmd_keys(config).await,
        SchemaCommands::Descriptor => {
            println!("{}", SCHEMA_DESCRIPTOR.trim());
            Ok(())
        }
    }
}

async fn cmd_keys(config: &PhenomixConfig) -> Result<()> {
    let client = super::connect(config).await?;
    let keys = introspect::detail_property_keys(&client).await?;

    for (source, properties) in keys {
        println!("{} {}", source.detail_label().cyan().bold(), format!("({})", properties.len()).dimmed());
        if properties.is_empty() {
            println!("  {}", "No nodes.".dimmed());
        }
        for key in properties {
            println!("  {}", key);
        }
    }
    Ok(())
}
