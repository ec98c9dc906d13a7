//! # Notion Client Integration Tests

use anyhow::Result;
use httpmock::{Method, MockServer};
use notedigest::Annotation;
use notedigest_notion::{
    build_annotation_update, flatten_blocks, NotionClient, NotionConfig, NotionError,
    TargetProperties,
};
use notedigest_test_utils::fixtures;
use serde_json::json;

fn client_for(server: &MockServer) -> Result<NotionClient> {
    let mut config = NotionConfig::new("test_token");
    config.base_url = server.base_url();
    Ok(NotionClient::new(config)?)
}

fn unprocessed_filter() -> serde_json::Value {
    json!({
        "and": [
            { "property": "요약", "rich_text": { "is_empty": true } },
            { "property": "keyword", "rich_text": { "is_empty": true } }
        ]
    })
}

#[tokio::test]
async fn test_query_unprocessed_follows_pagination() -> Result<()> {
    // --- 1. Arrange ---
    let server = MockServer::start_async().await;
    let db_id = "mock-db-id-12345";

    let first_mock = server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path(format!("/v1/databases/{db_id}/query"))
                .header("Authorization", "Bearer test_token")
                .header("Notion-Version", "2022-06-28")
                .json_body(json!({ "filter": unprocessed_filter() }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(fixtures::list_page(
                    vec![
                        fixtures::unprocessed_page("page1", "First"),
                        fixtures::unprocessed_page("page2", "Second"),
                    ],
                    "cursor-2",
                ));
        })
        .await;
    let second_mock = server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path(format!("/v1/databases/{db_id}/query"))
                .json_body(json!({ "filter": unprocessed_filter(), "start_cursor": "cursor-2" }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(fixtures::list(vec![fixtures::unprocessed_page(
                    "page3", "Third",
                )]));
        })
        .await;

    // --- 2. Act ---
    let client = client_for(&server)?;
    let pages = client.query_unprocessed(db_id).await?;

    // --- 3. Assert ---
    let ids: Vec<&str> = pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["page1", "page2", "page3"]);
    assert_eq!(pages[0].title().as_deref(), Some("First"));
    first_mock.assert_async().await;
    second_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_query_failure_is_returned_with_status() -> Result<()> {
    let server = MockServer::start_async().await;
    let query_mock = server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/v1/databases/bad-db/query");
            then.status(400)
                .header("Content-Type", "application/json")
                .body(r#"{"object":"error","status":400,"code":"validation_error","message":"Could not find property with name or id: 요약"}"#);
        })
        .await;

    let client = client_for(&server)?;
    let err = client.query_unprocessed("bad-db").await.unwrap_err();

    match err {
        NotionError::ApiError { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("validation_error"));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
    query_mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_fetch_blocks_preserves_order_and_flattens() -> Result<()> {
    let server = MockServer::start_async().await;
    let blocks_mock = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/v1/blocks/page1/children")
                .header("Notion-Version", "2022-06-28");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(fixtures::list(vec![
                    fixtures::heading(1, "Headline"),
                    fixtures::image("https://example.com/a.png"),
                    fixtures::paragraph(&["Hello", " ", "world"]),
                ]));
        })
        .await;

    let client = client_for(&server)?;
    let blocks = client.fetch_blocks("page1").await?;

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].block_type, "heading_1");
    assert_eq!(
        flatten_blocks(&blocks).as_deref(),
        Some("Headline\nHello world\n")
    );
    blocks_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_update_annotation_sends_only_the_two_properties() -> Result<()> {
    let server = MockServer::start_async().await;
    let annotation = Annotation::new("테스트 요약입니다.", "테스트,기사,내용,예시,샘플");
    let patch_mock = server
        .mock_async(|when, then| {
            when.method(Method::PATCH)
                .path("/v1/pages/page1")
                .json_body(json!({
                    "properties": {
                        "요약": { "rich_text": [
                            { "type": "text", "text": { "content": "테스트 요약입니다.", "link": null } }
                        ] },
                        "keyword": { "rich_text": [
                            { "type": "text", "text": { "content": "테스트,기사,내용,예시,샘플", "link": null } }
                        ] }
                    }
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(fixtures::updated_page("page1"));
        })
        .await;

    let client = client_for(&server)?;
    client.update_annotation("page1", &annotation).await?;

    patch_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_update_failure_is_returned() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::PATCH).path("/v1/pages/page1");
            then.status(429).body(r#"{"code":"rate_limited"}"#);
        })
        .await;

    let client = client_for(&server)?;
    let result = client
        .update_annotation("page1", &Annotation::new("s", "k"))
        .await;

    assert!(matches!(
        result,
        Err(NotionError::ApiError { status: 429, .. })
    ));
    Ok(())
}

#[test]
fn test_update_body_round_trips_parsed_strings() {
    let targets = TargetProperties::default();
    let annotation = Annotation::new("줄1\n줄2 \"quoted\"", "a, b ,c");

    let body = build_annotation_update(&targets, &annotation);

    assert_eq!(body.as_object().map(|o| o.len()), Some(1));
    let properties = body["properties"].as_object().expect("properties object");
    assert_eq!(properties.len(), 2);
    assert_eq!(
        properties["요약"]["rich_text"][0]["text"]["content"],
        "줄1\n줄2 \"quoted\""
    );
    assert_eq!(properties["keyword"]["rich_text"][0]["text"]["content"], "a, b ,c");
}

#[tokio::test]
async fn test_fetch_database_lists_property_types() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/databases/db1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "object": "database",
                    "id": "db1",
                    "title": [{ "plain_text": "Reading list" }],
                    "properties": {
                        "Name": { "id": "title", "name": "Name", "type": "title", "title": {} },
                        "요약": { "id": "s1", "name": "요약", "type": "rich_text", "rich_text": {} },
                        "keyword": { "id": "k1", "name": "keyword", "type": "rich_text", "rich_text": {} }
                    }
                }));
        })
        .await;

    let client = client_for(&server)?;
    let database = client.fetch_database("db1").await?;

    assert_eq!(database.title[0].plain_text, "Reading list");
    assert_eq!(database.properties["요약"].property_type, "rich_text");
    assert_eq!(database.properties.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_dump_dir_receives_raw_responses() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/blocks/page9/children");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(fixtures::list(vec![fixtures::paragraph(&["dumped"])]));
        })
        .await;
    let dir = tempfile::tempdir()?;
    let mut config = NotionConfig::new("test_token");
    config.base_url = server.base_url();
    config.dump_dir = Some(dir.path().to_path_buf());

    let client = NotionClient::new(config)?;
    client.fetch_blocks("page9").await?;

    let dumped: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("page-page9.json"))?)?;
    assert_eq!(
        dumped["results"][0]["paragraph"]["rich_text"][0]["plain_text"],
        "dumped"
    );
    Ok(())
}
