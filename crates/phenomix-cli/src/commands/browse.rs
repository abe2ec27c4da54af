//! Phenotype browser.

use anyhow::Result;
use clap::Args;
use phenomix_core::Phenotype;
use phenomix_graph::PhenotypeStore;

use crate::config::PhenomixConfig;
use crate::output;

#[derive(Args)]
pub struct BrowseArgs {
    /// Only show phenotypes whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

pub async fn execute(args: BrowseArgs, config: &PhenomixConfig) -> Result<()> {
    let client = super::connect(config).await?;
    let phenotypes = client.list_phenotypes().await?;
    let total = phenotypes.len();

    let shown = filter_by_name(phenotypes, args.search.as_deref());
    output::print_phenotypes_table(&shown, total);
    Ok(())
}

/// Case-insensitive name filter; blank search keeps everything.
fn filter_by_name(phenotypes: Vec<Phenotype>, search: Option<&str>) -> Vec<Phenotype> {
    let needle = search.map(str::trim).unwrap_or("").to_lowercase();
    if needle.is_empty() {
        return phenotypes;
    }
    phenotypes
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}
