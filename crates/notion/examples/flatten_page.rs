//! # Page Flattening Example
//!
//! Fetches the block children of one Notion page and prints the plain text the
//! digest pipeline would send to the model.
//!
//! ## Prerequisites
//!
//! Add the following to a `.env` file in the workspace root:
//!
//! ```env
//! NOTION_TOKEN="your_notion_integration_token"
//! NOTION_TEST_PAGE_ID="the_id_of_a_page"
//! ```
//!
//! ## How to Run
//!
//! ```sh
//! cargo run -p notedigest-notion --example flatten_page
//! ```

use anyhow::{Context, Result};
use dotenvy::dotenv;
use notedigest_notion::{flatten_blocks, NotionClient, NotionConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let token = env::var("NOTION_TOKEN").context("NOTION_TOKEN must be set")?;
    let page_id = env::var("NOTION_TEST_PAGE_ID").context("NOTION_TEST_PAGE_ID must be set")?;

    let client = NotionClient::new(NotionConfig::new(token))?;
    let blocks = client.fetch_blocks(&page_id).await?;
    println!("Fetched {} blocks from page {page_id}", blocks.len());

    match flatten_blocks(&blocks) {
        Some(text) => println!("--- Flattened text ---\n{text}"),
        None => println!("--- No extractable text ---"),
    }

    Ok(())
}
