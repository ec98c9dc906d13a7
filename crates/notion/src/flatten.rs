//! # Content Flattening
//!
//! Reduces a page's blocks to plain text for the model. Lossy by nature: only paragraphs
//! keep every run, other text-bearing blocks keep their first run, images are dropped.

use crate::types::{Block, BlockKind};

/// Flattens blocks in order, each contributing block followed by a newline.
///
/// Returns `None` when nothing was extracted.
pub fn flatten_blocks(blocks: &[Block]) -> Option<String> {
    let mut text = String::new();

    for block in blocks {
        match block.kind() {
            BlockKind::Paragraph => {
                for run in block.rich_text() {
                    text.push_str(&run.plain_text);
                }
                text.push('\n');
            }
            BlockKind::Image => {}
            BlockKind::Other(_) => {
                if let Some(first) = block.rich_text().first() {
                    text.push_str(&first.plain_text);
                    text.push('\n');
                }
            }
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
