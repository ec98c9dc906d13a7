//! # `notedigest-cli` Library Crate
//!
//! Command handling for the `notedigest` binary: argument parsing, wiring the
//! Notion client and the Anthropic-backed summarizer into a [`Pipeline`], and the
//! `inspect` helper.

pub mod config;
pub mod pipeline;

pub use config::{Cli, Commands, InspectArgs, RunArgs};
pub use pipeline::{Pipeline, PipelineConfig, PipelineError, RunReport};

use anyhow::{Context, Result};
use notedigest::providers::ai::AnthropicProvider;
use notedigest::Summarizer;
use notedigest_notion::{Database, NotionClient, TargetProperties};
use tracing::info;

// --- Public Entrypoint ---

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => handle_run(args).await,
        Commands::Inspect(args) => handle_inspect(args).await,
    }
}

/// Builds the pipeline from parsed `run` arguments.
pub fn build_pipeline(args: &RunArgs) -> Result<Pipeline> {
    if let Some(dir) = &args.dump_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create dump directory {}", dir.display()))?;
    }

    let notion = NotionClient::new(args.notion.notion_config(args.dump_dir.clone()))?;
    let provider = AnthropicProvider::new(
        args.anthropic_api_url.clone(),
        args.anthropic_api_key.clone(),
        args.model.clone(),
        args.generation_params(),
    )?;
    let summarizer = Summarizer::new(Box::new(provider))?;

    Ok(Pipeline::new(
        notion,
        summarizer,
        PipelineConfig {
            database_id: args.notion.database_id.clone(),
            pause: args.pause(),
        },
    ))
}

/// Lists problems with the configured target properties, empty when both are usable.
pub fn check_target_properties(database: &Database, targets: &TargetProperties) -> Vec<String> {
    [&targets.summary, &targets.keywords]
        .into_iter()
        .filter_map(|name| match database.properties.get(name) {
            None => Some(format!("property `{name}` does not exist")),
            Some(schema) if schema.property_type != "rich_text" => Some(format!(
                "property `{name}` is `{}`, expected `rich_text`",
                schema.property_type
            )),
            Some(_) => None,
        })
        .collect()
}

// --- Command Handlers ---

async fn handle_run(args: RunArgs) -> Result<()> {
    info!("Starting 'run' for database {}", args.notion.database_id);
    let pipeline = build_pipeline(&args)?;
    let report = pipeline.run().await?;

    println!(
        "✅ Task completed: {} selected, {} updated, {} skipped.",
        report.selected, report.updated, report.skipped
    );
    Ok(())
}

async fn handle_inspect(args: InspectArgs) -> Result<()> {
    let client = NotionClient::new(args.notion.notion_config(None))?;
    let database = client.fetch_database(&args.notion.database_id).await?;

    let title: String = database.title.iter().map(|t| t.plain_text.as_str()).collect();
    println!("🔎 Database '{}' ({})", title, database.id);
    for (name, schema) in &database.properties {
        println!("  - {name}: {}", schema.property_type);
    }

    let problems = check_target_properties(&database, &args.notion.targets());
    if problems.is_empty() {
        println!("✅ Target properties are ready.");
    } else {
        for problem in problems {
            println!("⚠️  {problem}");
        }
    }
    Ok(())
}
