//! # Reply Parsing
//!
//! The model is asked to answer in a fixed two-label format, but nothing guarantees it
//! does. Extraction is therefore best-effort: a missing label yields an empty field and
//! never an error.

use crate::errors::PromptError;
use crate::prompts::tasks::{KEYWORDS_LABEL, SUMMARY_LABEL};
use crate::types::Annotation;
use regex::Regex;
use tracing::warn;

/// Pulls the summary and keyword sections out of a free-text model reply.
#[derive(Debug, Clone)]
pub struct ReplyParser {
    summary_re: Regex,
    open_summary_re: Regex,
    keywords_re: Regex,
}

impl ReplyParser {
    /// Builds a parser for the default `요약:` / `키워드:` labels.
    pub fn new() -> Result<Self, PromptError> {
        Self::with_labels(SUMMARY_LABEL, KEYWORDS_LABEL)
    }

    /// Builds a parser for arbitrary labels. Labels are matched literally.
    pub fn with_labels(summary_label: &str, keywords_label: &str) -> Result<Self, PromptError> {
        let summary = regex::escape(summary_label);
        let keywords = regex::escape(keywords_label);
        let summary_re = Regex::new(&format!(r"(?s){summary}(.*?){keywords}"))?;
        let open_summary_re = Regex::new(&format!(r"(?s){summary}(.*)"))?;
        let keywords_re = Regex::new(&format!(r"(?s){keywords}(.*)"))?;
        Ok(Self {
            summary_re,
            open_summary_re,
            keywords_re,
        })
    }

    /// Extracts both fields, trimming surrounding whitespace.
    pub fn parse(&self, reply: &str) -> Annotation {
        let keywords = capture_trimmed(&self.keywords_re, reply);
        // Summary runs up to the next keywords label. It only runs to the end of the text
        // when the reply has no keywords label at all.
        let summary = if self.keywords_re.is_match(reply) {
            capture_trimmed(&self.summary_re, reply)
        } else {
            capture_trimmed(&self.open_summary_re, reply)
        };

        if summary.is_empty() || keywords.is_empty() {
            warn!(
                summary_found = !summary.is_empty(),
                keywords_found = !keywords.is_empty(),
                "Model reply did not match the expected format"
            );
        }

        Annotation { summary, keywords }
    }
}

fn capture_trimmed(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
