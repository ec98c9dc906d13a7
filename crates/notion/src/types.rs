//! Notion API response structures.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    pub plain_text: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichText>,
    },
    RichText {
        rich_text: Vec<RichText>,
    },
    #[serde(other)]
    Other,
}

/// A database row. Only the identifier drives the pipeline; properties are kept for logging.
#[derive(Deserialize, Debug, Clone)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Page {
    /// The page's title property joined into one string, if it has one.
    pub fn title(&self) -> Option<String> {
        self.properties.values().find_map(|prop| match prop {
            PropertyValue::Title { title } => Some(
                title
                    .iter()
                    .map(|t| t.plain_text.as_str())
                    .collect::<String>(),
            ),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind<'a> {
    Paragraph,
    Image,
    Other(&'a str),
}

/// One child block of a page.
///
/// Notion nests the type-specific payload under a key named after the `type`
/// discriminator (`{"type": "heading_1", "heading_1": {"rich_text": [...]}}`), so the
/// payload is kept as raw JSON and looked up by kind.
#[derive(Deserialize, Debug, Clone)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Block {
    pub fn kind(&self) -> BlockKind<'_> {
        match self.block_type.as_str() {
            "paragraph" => BlockKind::Paragraph,
            "image" => BlockKind::Image,
            other => BlockKind::Other(other),
        }
    }

    /// The text runs under `<type>.rich_text`, or an empty list when the block has none.
    pub fn rich_text(&self) -> Vec<RichText> {
        self.payload
            .get(&self.block_type)
            .and_then(|body| body.get("rich_text"))
            .and_then(|runs| match serde_json::from_value(runs.clone()) {
                Ok(runs) => Some(runs),
                Err(e) => {
                    warn!("Could not decode rich text of block {}: {}", self.id, e);
                    None
                }
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct PaginatedList {
    pub results: Vec<Value>,
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub id: String,
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
}
