//! CLI command definitions and handlers.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phenomix_chat::ChatContext;
use phenomix_graph::GraphClient;
use phenomix_llm::OpenAiChat;

use crate::config::PhenomixConfig;

pub mod ask;
pub mod browse;
pub mod describe;
pub mod related;
pub mod schema;
pub mod status;
pub mod view;

/// Phenomix - phenotype knowledge graph browser and chatbot
#[derive(Parser)]
#[command(name = "phenomix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all phenotypes
    Browse(browse::BrowseArgs),

    /// Show one phenotype with its per-source details and concepts
    View(view::ViewArgs),

    /// Ask a question about the phenotype database
    Ask(ask::AskArgs),

    /// Summarize the phenotypes named in a piece of text
    Describe(describe::DescribeArgs),

    /// Find phenotypes sharing concepts with those named in a piece of text
    Related(related::RelatedArgs),

    /// Schema commands
    #[command(subcommand)]
    Schema(schema::SchemaCommands),

    /// Show graph status
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = PhenomixConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Browse(args) => browse::execute(args, &config).await,
            Commands::View(args) => view::execute(args, &config).await,
            Commands::Ask(args) => ask::execute(args, &config).await,
            Commands::Describe(args) => describe::execute(args, &config).await,
            Commands::Related(args) => related::execute(args, &config).await,
            Commands::Schema(cmd) => schema::execute(cmd, &config).await,
            Commands::Status => status::execute(&config).await,
        }
    }
}

/// Connect to Neo4j.
pub async fn connect(config: &PhenomixConfig) -> Result<GraphClient> {
    GraphClient::connect(&config.graph)
        .await
        .context("Failed to connect to Neo4j")
}

/// Build the store and model a pipeline command runs against.
pub async fn chat_context(config: &PhenomixConfig) -> Result<ChatContext> {
    let model = OpenAiChat::new(&config.llm).context("Language model is not configured")?;
    let client = connect(config).await?;
    Ok(ChatContext::new(Arc::new(client), Arc::new(model)).with_allow_writes(config.guard.allow_writes))
}

/// Join free-form words into one text argument.
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}
