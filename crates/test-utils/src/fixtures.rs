//! Builders for Notion API JSON payloads.

use serde_json::{json, Value};

fn text_runs(texts: &[&str]) -> Vec<Value> {
    texts
        .iter()
        .map(|t| {
            json!({
                "type": "text",
                "text": { "content": t, "link": null },
                "plain_text": t,
                "href": null
            })
        })
        .collect()
}

/// A database row whose summary and keyword properties are still empty.
pub fn unprocessed_page(id: &str, title: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": { "id": "title", "type": "title", "title": text_runs(&[title]) },
            "요약": { "id": "s1", "type": "rich_text", "rich_text": [] },
            "keyword": { "id": "k1", "type": "rich_text", "rich_text": [] }
        }
    })
}

pub fn paragraph(texts: &[&str]) -> Value {
    json!({
        "object": "block",
        "id": "paragraph-block",
        "type": "paragraph",
        "has_children": false,
        "paragraph": { "rich_text": text_runs(texts), "color": "default" }
    })
}

pub fn heading(level: u8, text: &str) -> Value {
    let kind = format!("heading_{level}");
    let mut block = json!({
        "object": "block",
        "id": "heading-block",
        "type": kind,
    });
    block[kind.as_str()] = json!({ "rich_text": text_runs(&[text]), "is_toggleable": false });
    block
}

pub fn image(url: &str) -> Value {
    json!({
        "object": "block",
        "id": "image-block",
        "type": "image",
        "image": { "type": "external", "external": { "url": url }, "caption": [] }
    })
}

/// A single-page list response as returned by the query and block-children endpoints.
pub fn list(results: Vec<Value>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "next_cursor": null,
        "has_more": false
    })
}

/// One page of a paginated list that continues at `next_cursor`.
pub fn list_page(results: Vec<Value>, next_cursor: &str) -> Value {
    json!({
        "object": "list",
        "results": results,
        "next_cursor": next_cursor,
        "has_more": true
    })
}

/// The `PATCH /v1/pages/{id}` response; Notion echoes the updated page.
pub fn updated_page(id: &str) -> Value {
    json!({ "object": "page", "id": id, "properties": {} })
}
