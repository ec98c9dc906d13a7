//! # Digest Pipeline
//!
//! Processes each unannotated page strictly one after another:
//! fetch blocks → flatten → summarize → write back → pause.
//! Any error aborts the whole run. Pages already written are excluded from the next
//! run's query, so an interrupted run simply resumes with the remaining pages.

use notedigest::{PromptError, Summarizer};
use notedigest_notion::{flatten_blocks, NotionClient, NotionError, Page};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Notion(#[from] NotionError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub database_id: String,
    /// Fixed delay after every successful write-back.
    pub pause: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub selected: usize,
    pub updated: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    Updated,
    Skipped,
}

pub struct Pipeline {
    notion: NotionClient,
    summarizer: Summarizer,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(notion: NotionClient, summarizer: Summarizer, config: PipelineConfig) -> Self {
        Self {
            notion,
            summarizer,
            config,
        }
    }

    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        let pages = self
            .notion
            .query_unprocessed(&self.config.database_id)
            .await?;
        let mut report = RunReport {
            selected: pages.len(),
            ..Default::default()
        };
        info!(
            "Processing {} pages from database {}",
            pages.len(),
            self.config.database_id
        );

        for (index, page) in pages.iter().enumerate() {
            info!(
                "[{}/{}] Page {} ({})",
                index + 1,
                pages.len(),
                page.id,
                page.title().unwrap_or_default()
            );
            match self.process_page(page).await? {
                PageOutcome::Updated => {
                    report.updated += 1;
                    tokio::time::sleep(self.config.pause).await;
                }
                PageOutcome::Skipped => report.skipped += 1,
            }
        }

        Ok(report)
    }

    async fn process_page(&self, page: &Page) -> Result<PageOutcome, PipelineError> {
        let blocks = self.notion.fetch_blocks(&page.id).await?;

        let text = match flatten_blocks(&blocks) {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                info!("Page {} has no text content, skipping", page.id);
                return Ok(PageOutcome::Skipped);
            }
        };

        let annotation = self.summarizer.annotate(&text).await?;
        if annotation.summary.is_empty() || annotation.keywords.is_empty() {
            // Parse misses are still written back.
            warn!(
                "Page {} gets an incomplete annotation (summary: {} chars, keywords: {} chars)",
                page.id,
                annotation.summary.chars().count(),
                annotation.keywords.chars().count()
            );
        }

        self.notion.update_annotation(&page.id, &annotation).await?;
        Ok(PageOutcome::Updated)
    }
}
