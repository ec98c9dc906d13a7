//! # Command-Line Configuration
//!
//! Secrets and identifiers come from flags or their environment fallbacks (a `.env`
//! file is loaded first). Parsed arguments are turned into explicit config structs
//! handed to each component's constructor.

use clap::{Args, Parser, Subcommand};
use notedigest::providers::ai::anthropic::{DEFAULT_ANTHROPIC_API_URL, DEFAULT_ANTHROPIC_MODEL};
use notedigest::GenerationParams;
use notedigest_notion::client::{
    DEFAULT_KEYWORD_PROPERTY, DEFAULT_NOTION_API_URL, DEFAULT_NOTION_VERSION,
    DEFAULT_SUMMARY_PROPERTY,
};
use notedigest_notion::{NotionConfig, TargetProperties};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize and tag every page whose summary and keyword properties are empty
    Run(RunArgs),
    /// Print the property schema of the database and check the target properties
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NotionArgs {
    /// Notion integration token.
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: String,
    /// Identifier of the database to process.
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub database_id: String,
    #[arg(long, env = "NOTION_VERSION", default_value = DEFAULT_NOTION_VERSION)]
    pub notion_version: String,
    #[arg(long, env = "NOTION_API_URL", default_value = DEFAULT_NOTION_API_URL)]
    pub notion_api_url: String,
    /// Rich-text property that receives the summary.
    #[arg(long, default_value = DEFAULT_SUMMARY_PROPERTY)]
    pub summary_property: String,
    /// Rich-text property that receives the keyword list.
    #[arg(long, default_value = DEFAULT_KEYWORD_PROPERTY)]
    pub keyword_property: String,
}

impl NotionArgs {
    pub fn targets(&self) -> TargetProperties {
        TargetProperties {
            summary: self.summary_property.clone(),
            keywords: self.keyword_property.clone(),
        }
    }

    pub fn notion_config(&self, dump_dir: Option<PathBuf>) -> NotionConfig {
        NotionConfig {
            token: self.notion_token.clone(),
            version: self.notion_version.clone(),
            base_url: self.notion_api_url.clone(),
            targets: self.targets(),
            dump_dir,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub notion: NotionArgs,
    /// Anthropic API key.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: String,
    #[arg(long, env = "ANTHROPIC_API_URL", default_value = DEFAULT_ANTHROPIC_API_URL)]
    pub anthropic_api_url: String,
    #[arg(long, env = "ANTHROPIC_MODEL", default_value = DEFAULT_ANTHROPIC_MODEL)]
    pub model: String,
    #[arg(long, default_value_t = 500)]
    pub max_tokens: u32,
    #[arg(long, default_value_t = 0.5)]
    pub temperature: f32,
    /// Seconds to wait after each page is written back.
    #[arg(long, default_value_t = 10)]
    pub pause_secs: u64,
    /// Directory that receives the raw Notion responses as JSON.
    #[arg(long)]
    pub dump_dir: Option<PathBuf>,
}

impl RunArgs {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_secs(self.pause_secs)
    }
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub notion: NotionArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 8] = [
        "notedigest",
        "run",
        "--notion-token",
        "secret_token",
        "--database-id",
        "db-123",
        "--anthropic-api-key",
        "sk-ant-test",
    ];

    #[test]
    fn run_defaults_match_the_fixed_pipeline_settings() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };

        assert_eq!(args.notion.database_id, "db-123");
        assert_eq!(args.generation_params(), GenerationParams::default());
        assert_eq!(args.pause(), Duration::from_secs(10));
        assert_eq!(args.notion.targets(), TargetProperties::default());
        assert!(args.dump_dir.is_none());
    }

    #[test]
    fn overrides_flow_into_the_config_structs() {
        let mut argv = REQUIRED.to_vec();
        argv.extend([
            "--pause-secs",
            "0",
            "--summary-property",
            "Summary",
            "--keyword-property",
            "Tags",
            "--notion-api-url",
            "http://localhost:9999",
            "--dump-dir",
            "/tmp/dumps",
        ]);
        let Commands::Run(args) = Cli::try_parse_from(argv).unwrap().command else {
            panic!("expected run command");
        };

        let config = args.notion.notion_config(args.dump_dir.clone());
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.targets.summary, "Summary");
        assert_eq!(config.targets.keywords, "Tags");
        assert_eq!(config.dump_dir, Some(PathBuf::from("/tmp/dumps")));
        assert_eq!(args.pause(), Duration::ZERO);
    }
}
