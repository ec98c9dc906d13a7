//! # Summarization Client
//!
//! Wraps a single completion call with the fixed summarization prompt and parses the
//! reply into an [`Annotation`].

use crate::errors::PromptError;
use crate::extract::ReplyParser;
use crate::prompts::tasks::SUMMARIZE_SYSTEM_PROMPT;
use crate::providers::ai::AiProvider;
use crate::types::Annotation;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Summarizer {
    provider: Box<dyn AiProvider>,
    parser: ReplyParser,
}

impl Summarizer {
    pub fn new(provider: Box<dyn AiProvider>) -> Result<Self, PromptError> {
        Ok(Self {
            provider,
            parser: ReplyParser::new()?,
        })
    }

    /// Sends `text` as the sole user turn and returns the raw model reply.
    pub async fn summarize(&self, text: &str) -> Result<String, PromptError> {
        info!("Summarizing document ({} chars)", text.chars().count());
        self.provider.generate(SUMMARIZE_SYSTEM_PROMPT, text).await
    }

    /// Summarizes `text` and extracts the labeled fields from the reply.
    pub async fn annotate(&self, text: &str) -> Result<Annotation, PromptError> {
        let reply = self.summarize(text).await?;
        let annotation = self.parser.parse(&reply);
        debug!(?annotation, "Parsed model reply");
        Ok(annotation)
    }
}
