//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use once_cell::sync::Lazy;
use phenomix_chat::{DetailConcepts, RelatedPhenotypes, SummaryOutcome};
use phenomix_core::{DataQualityIssue, Phenotype, PhenotypeId, PhenotypeSummary, Properties, Source};
use regex::Regex;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

/// Colored tag for a source.
fn source_tag(source: Source) -> ColoredString {
    let tag = format!("[{}]", source.display_name());
    match source {
        Source::Sentinel => tag.blue(),
        Source::Hdruk => tag.magenta(),
        Source::Cprd => tag.green(),
        Source::Ohdsi => tag.yellow(),
        Source::Phekb => tag.cyan(),
    }
}

/// Tags for every source the ID marks present.
pub fn source_tags(id: &PhenotypeId) -> String {
    id.sources()
        .into_iter()
        .map(|s| source_tag(s).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print phenotypes as a table.
pub fn print_phenotypes_table(phenotypes: &[Phenotype], total: usize) {
    println!(
        "{}",
        format!("Showing {} phenotypes out of {}", phenotypes.len(), total).dimmed()
    );
    if phenotypes.is_empty() {
        return;
    }
    println!();

    let name_width = term_width().saturating_sub(12 + 40).max(20);
    println!("{:<12}{:<w$}  {}", "ID", "Name", "Sources", w = name_width);
    println!("{}", "─".repeat(12 + name_width + 30));

    for phenotype in phenotypes {
        println!(
            "{:<12}{}  {}",
            phenotype.id.as_str().dimmed(),
            pad_right(&truncate_visual(&phenotype.name, name_width), name_width),
            source_tags(&phenotype.id)
        );
    }
}

/// Print the header of a phenotype view.
pub fn print_phenotype_header(phenotype: &Phenotype) {
    println!("{}", phenotype.name.cyan().bold());
    println!("{} {}", "ID:".bold(), phenotype.id);
    println!("{} {}", "Sources:".bold(), source_tags(&phenotype.id));
}

/// Print a section heading for one source.
pub fn print_source_heading(source: Source) {
    println!();
    println!("{}", source.display_name().bold().underline());
}

/// Print record properties, one per line.
pub fn print_properties(properties: &Properties) {
    let key_width = properties
        .keys()
        .map(|k| UnicodeWidthStr::width(k.as_str()))
        .max()
        .unwrap_or(0);

    for (key, value) in properties {
        println!(
            "  {}  {}",
            pad_right(key, key_width).bold(),
            format_value(value)
        );
    }
}

/// Print the concepts of one detail as a table.
pub fn print_concepts(detail: &DetailConcepts) {
    println!();
    println!(
        "  {} {}",
        "Concepts for".dimmed(),
        detail.detail_pid.as_str().yellow()
    );

    if detail.concepts.is_empty() {
        println!("  {}", "No concepts linked.".dimmed());
        return;
    }

    let width = term_width().saturating_sub(4).max(40);
    let name_width = width.saturating_sub(16).max(20);
    println!("  {:<14}  {}", "CID", "Name");
    println!("  {}", "─".repeat(width.min(100)));

    for concept in &detail.concepts {
        let name = concept.name.as_deref().unwrap_or("-");
        println!(
            "  {:<14}  {}",
            concept.cid,
            truncate_visual(&render_links(name), name_width)
        );
        if !concept.linked {
            println!("  {:<14}  {}", "", "(not linked to this detail)".dimmed());
        }
        for (key, value) in &concept.attributes {
            let line = format!("{}: {}", key, format_plain(value));
            println!("  {:<14}  {}", "", truncate_visual(&line, name_width).dimmed());
        }
    }
}

/// Print data-quality issues as warnings.
pub fn print_issues<'a>(issues: impl IntoIterator<Item = &'a DataQualityIssue>) {
    let issues: Vec<&DataQualityIssue> = issues.into_iter().collect();
    if issues.is_empty() {
        return;
    }
    println!();
    println!("{}", "Data quality".yellow().bold());
    for issue in issues {
        println!("  {} {}", "!".yellow(), issue);
    }
}

/// Print one summary outcome.
pub fn print_summary(outcome: &SummaryOutcome, fallback_name: &str) {
    match outcome {
        SummaryOutcome::Parsed { summary, .. } => print_parsed_summary(summary, fallback_name),
        SummaryOutcome::Malformed {
            phenotype_id,
            raw,
            reason,
        } => {
            println!();
            println!(
                "{} {}",
                fallback_name.cyan().bold(),
                format!("({})", phenotype_id).dimmed()
            );
            println!("  {} {}", "Summary could not be parsed:".red(), reason);
            for line in raw.lines() {
                println!("  {}", line.dimmed());
            }
        }
    }
}

fn print_parsed_summary(summary: &PhenotypeSummary, fallback_name: &str) {
    println!();
    println!("{}", summary.known_name().unwrap_or(fallback_name).cyan().bold());
    let mut any = false;
    for source in Source::ALL {
        if let Some(text) = summary.for_source(source) {
            any = true;
            println!("  {} {}", source_tag(source), render_links(text));
        }
    }
    if !any {
        println!("  {}", "No data available.".dimmed());
    }
}

/// Print matched and related phenotype names.
pub fn print_related(related: &RelatedPhenotypes) {
    if related.is_empty() {
        println!("{}", "No related phenotypes found.".dimmed());
        return;
    }
    for name in &related.matched {
        println!("  {} {}", "●".cyan(), name.bold());
    }
    for entry in &related.related {
        println!(
            "  {} {} {}",
            "○".dimmed(),
            entry.name,
            format!("({} shared)", entry.shared_count).dimmed()
        );
    }
}

/// Render a property value: lists as ` · `-joined tags, links expanded.
fn format_value(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => "-".dimmed().to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| format_plain(item).green().to_string())
            .collect::<Vec<_>>()
            .join(&" · ".dimmed().to_string()),
        other => format_plain(other),
    }
}

/// Render a value without color.
fn format_plain(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => render_links(s),
        Value::Array(items) => items.iter().map(format_plain).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Markdown link with no brackets inside its label.
static MARKDOWN_LINK: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^)]*)\)").ok());

/// Rewrite markdown links `[text](url)` as `text <url>`.
pub fn render_links(text: &str) -> String {
    match MARKDOWN_LINK.as_ref() {
        Some(re) => re.replace_all(text, "${1} <${2}>").into_owned(),
        None => text.to_string(),
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
