//! # `notedigest-notion`: Notion Content Source
//!
//! Read and write access to a Notion database for the digest pipeline: querying pages that
//! still lack an annotation, fetching their block children, flattening those blocks into
//! plain text, and patching the annotation back onto the page.

pub mod client;
pub mod flatten;
pub mod types;

pub use client::{
    build_annotation_update, build_unprocessed_filter, NotionClient, NotionConfig,
    TargetProperties,
};
pub use flatten::flatten_blocks;
pub use types::{Block, BlockKind, Database, Page, RichText};

use thiserror::Error;

// --- Error Definitions ---

#[derive(Error, Debug, Clone)]
pub enum NotionError {
    #[error("Failed to fetch from Notion API: {0}")]
    Fetch(String),
    #[error("Notion API returned {status} while trying to {context}: {body}")]
    ApiError {
        context: String,
        status: u16,
        body: String,
    },
    #[error("Failed to decode Notion response: {0}")]
    Decode(String),
    #[error("Invalid Notion configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for NotionError {
    fn from(err: reqwest::Error) -> Self {
        NotionError::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for NotionError {
    fn from(err: serde_json::Error) -> Self {
        NotionError::Decode(err.to_string())
    }
}
