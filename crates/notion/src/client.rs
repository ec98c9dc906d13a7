//! # Notion Client
//!
//! Thin wrapper over the three Notion endpoints the pipeline needs, plus the database
//! lookup used by `inspect`. Every non-success response is logged with the request that
//! caused it before being returned as [`NotionError::ApiError`].

use crate::types::{Block, Database, Page, PaginatedList};
use crate::NotionError;
use notedigest::Annotation;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_SUMMARY_PROPERTY: &str = "요약";
pub const DEFAULT_KEYWORD_PROPERTY: &str = "keyword";

/// Names of the two rich-text properties that hold the annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProperties {
    pub summary: String,
    pub keywords: String,
}

impl Default for TargetProperties {
    fn default() -> Self {
        Self {
            summary: DEFAULT_SUMMARY_PROPERTY.to_string(),
            keywords: DEFAULT_KEYWORD_PROPERTY.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub token: String,
    pub version: String,
    pub base_url: String,
    pub targets: TargetProperties,
    /// When set, raw query and block responses are written here as JSON.
    pub dump_dir: Option<PathBuf>,
}

impl NotionConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            version: DEFAULT_NOTION_VERSION.to_string(),
            base_url: DEFAULT_NOTION_API_URL.to_string(),
            targets: TargetProperties::default(),
            dump_dir: None,
        }
    }
}

/// Filter selecting pages whose summary and keyword properties are both empty.
pub fn build_unprocessed_filter(targets: &TargetProperties) -> Value {
    json!({
        "and": [
            { "property": targets.summary, "rich_text": { "is_empty": true } },
            { "property": targets.keywords, "rich_text": { "is_empty": true } }
        ]
    })
}

/// Page update body that overwrites exactly the two target properties.
pub fn build_annotation_update(targets: &TargetProperties, annotation: &Annotation) -> Value {
    let rich_text = |content: &str| {
        json!({
            "rich_text": [
                { "type": "text", "text": { "content": content, "link": null } }
            ]
        })
    };

    let mut properties = serde_json::Map::new();
    properties.insert(targets.summary.clone(), rich_text(&annotation.summary));
    properties.insert(targets.keywords.clone(), rich_text(&annotation.keywords));

    json!({ "properties": properties })
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    filter: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    headers: HeaderMap,
    base_url: String,
    targets: TargetProperties,
    dump_dir: Option<PathBuf>,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self, NotionError> {
        let headers = construct_headers(&config.token, &config.version)?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            headers,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            targets: config.targets,
            dump_dir: config.dump_dir,
        })
    }

    /// Queries every page of `database_id` that still lacks an annotation, in store order.
    pub async fn query_unprocessed(&self, database_id: &str) -> Result<Vec<Page>, NotionError> {
        let url = format!("{}/v1/databases/{database_id}/query", self.base_url);
        let filter = build_unprocessed_filter(&self.targets);
        let mut raw_pages = Vec::new();
        let mut next_cursor: Option<String> = None;

        loop {
            let body = serde_json::to_value(QueryRequest {
                filter: &filter,
                start_cursor: next_cursor.as_deref(),
            })?;
            let response = self
                .http
                .post(&url)
                .headers(self.headers.clone())
                .json(&body)
                .send()
                .await?;
            let response = self
                .ensure_success(response, "query database", Some(&body))
                .await?;

            let mut list = response.json::<PaginatedList>().await?;
            raw_pages.append(&mut list.results);

            match (list.has_more, list.next_cursor) {
                (true, Some(cursor)) => next_cursor = Some(cursor),
                _ => break,
            }
        }

        self.dump("result.json", &json!({ "results": raw_pages }))
            .await;
        info!("Query returned {} unprocessed pages", raw_pages.len());
        decode_all(raw_pages)
    }

    /// Fetches the ordered child blocks of a page.
    pub async fn fetch_blocks(&self, page_id: &str) -> Result<Vec<Block>, NotionError> {
        let url = format!("{}/v1/blocks/{page_id}/children", self.base_url);
        let mut raw_blocks = Vec::new();
        let mut next_cursor: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).headers(self.headers.clone());
            if let Some(cursor) = &next_cursor {
                request = request.query(&[("start_cursor", cursor)]);
            }
            let response = request.send().await?;
            let response = self
                .ensure_success(response, "fetch page content", None)
                .await?;

            let mut list = response.json::<PaginatedList>().await?;
            raw_blocks.append(&mut list.results);

            match (list.has_more, list.next_cursor) {
                (true, Some(cursor)) => next_cursor = Some(cursor),
                _ => break,
            }
        }

        self.dump(&format!("page-{page_id}.json"), &json!({ "results": raw_blocks }))
            .await;
        debug!("Fetched {} blocks for page {}", raw_blocks.len(), page_id);
        decode_all(raw_blocks)
    }

    /// Overwrites the page's summary and keyword properties with `annotation`.
    pub async fn update_annotation(
        &self,
        page_id: &str,
        annotation: &Annotation,
    ) -> Result<(), NotionError> {
        let url = format!("{}/v1/pages/{page_id}", self.base_url);
        let body = build_annotation_update(&self.targets, annotation);
        let response = self
            .http
            .patch(&url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;
        self.ensure_success(response, "update page properties", Some(&body))
            .await?;

        info!("{} updated successfully!", page_id);
        Ok(())
    }

    /// Retrieves the database object, mainly to list its property schema.
    pub async fn fetch_database(&self, database_id: &str) -> Result<Database, NotionError> {
        let url = format!("{}/v1/databases/{database_id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?;
        let response = self
            .ensure_success(response, "fetch database info", None)
            .await?;
        response.json::<Database>().await.map_err(Into::into)
    }

    async fn ensure_success(
        &self,
        response: Response,
        context: &str,
        request_body: Option<&Value>,
    ) -> Result<Response, NotionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Error: {}", status.as_u16());
        error!("Error message: {}", body);
        error!("Request headers: {:?}", redacted_headers(&self.headers));
        error!(
            "Request body: {}",
            request_body.map(serde_json::Value::to_string).unwrap_or_default()
        );

        Err(NotionError::ApiError {
            context: context.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn dump(&self, file_name: &str, value: &Value) {
        let Some(dir) = &self.dump_dir else {
            return;
        };
        let path = dir.join(file_name);
        let result = match serde_json::to_vec_pretty(value) {
            Ok(bytes) => tokio::fs::write(&path, bytes).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = result {
            warn!("Could not write {}: {}", path.display(), e);
        }
    }
}

fn construct_headers(token: &str, version: &str) -> Result<HeaderMap, NotionError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| NotionError::InvalidConfig(format!("Invalid token: {e}")))?,
    );
    headers.insert(
        "Notion-Version",
        HeaderValue::from_str(version)
            .map_err(|e| NotionError::InvalidConfig(format!("Invalid version: {e}")))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                "Bearer <redacted>".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), shown)
        })
        .collect()
}

fn decode_all<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>, NotionError> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(NotionError::from))
        .collect()
}
