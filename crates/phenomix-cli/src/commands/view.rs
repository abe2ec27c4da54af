//! Single phenotype view.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use phenomix_chat::{view_phenotype, PhenotypeView};
use phenomix_core::{PhenotypeId, Source};

use crate::config::PhenomixConfig;
use crate::output;

const NOT_FOUND: &str = "No data found for the given phenotype ID.";
const NO_SOURCES: &str = "No specific data available for this phenotype ID.";

#[derive(Args)]
pub struct ViewArgs {
    /// Phenotype ID, e.g. XHCOP0159
    pub id: String,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ViewArgs, config: &PhenomixConfig) -> Result<()> {
    let Ok(id) = PhenotypeId::parse(&args.id) else {
        println!("{}", NOT_FOUND.dimmed());
        return Ok(());
    };

    let client = super::connect(config).await?;
    let Some(view) = view_phenotype(&client, &id).await? else {
        println!("{}", NOT_FOUND.dimmed());
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(&view);
    Ok(())
}

fn print_view(view: &PhenotypeView) {
    let resolved = &view.resolved;
    output::print_phenotype_header(&resolved.phenotype);

    let sources = match source_sections(&resolved.phenotype.id) {
        Ok(sources) => sources,
        Err(notice) => {
            println!();
            println!("{}", notice.dimmed());
            Vec::new()
        }
    };

    for source in sources {
        output::print_source_heading(source);

        let details = resolved.details_for(source);
        if details.is_empty() {
            println!(
                "  {}",
                format!("No detailed data available for {}.", source.display_name()).dimmed()
            );
            continue;
        }

        for detail in details {
            output::print_properties(&detail.display_properties());
            if let Some(concepts) = view
                .concepts_for(source)
                .iter()
                .find(|c| c.detail_pid == detail.pid())
            {
                output::print_concepts(concepts);
            }
        }
    }

    output::print_issues(&resolved.issues);
}

/// Sources the ID flags present, in display order.
fn source_sections(id: &PhenotypeId) -> Result<Vec<Source>, &'static str> {
    let sources = id.sources();
    if sources.is_empty() {
        Err(NO_SOURCES)
    } else {
        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_id_flags() {
        let id = PhenotypeId::parse("SHXXX0001").unwrap();
        assert_eq!(source_sections(&id), Ok(vec![Source::Sentinel, Source::Hdruk]));

        let id = PhenotypeId::parse("XXCOP0159").unwrap();
        assert_eq!(
            source_sections(&id),
            Ok(vec![Source::Cprd, Source::Ohdsi, Source::Phekb])
        );
    }

    #[test]
    fn test_no_flagged_source_gives_notice() {
        let id = PhenotypeId::parse("XXXXX0001").unwrap();
        assert_eq!(source_sections(&id), Err(NO_SOURCES));
    }
}
