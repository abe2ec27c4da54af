//! Graph status.

use anyhow::Result;
use colored::Colorize;

use crate::config::PhenomixConfig;

pub async fn execute(config: &PhenomixConfig) -> Result<()> {
    let client = super::connect(config).await?;
    let counts = client.get_counts().await?;

    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Neo4j:         {} ({})", config.graph.uri, config.graph.database);
    println!("  Nodes:         {}", counts.nodes);
    println!("  Relationships: {}", counts.relationships);
    println!("  Phenotypes:    {}", counts.phenotypes);
    println!(
        "  Model:         {}{}",
        config.llm.model,
        if config.llm.api_key.is_some() {
            String::new()
        } else {
            " (no API key)".yellow().to_string()
        }
    );

    Ok(())
}
