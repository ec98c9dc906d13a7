use crate::{errors::PromptError, providers::ai::AiProvider, types::GenerationParams};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use tracing::debug;

pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// --- Anthropic-specific request and response structures ---

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct AnthropicResponse {
    content: Vec<ContentSegment>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentSegment {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

// --- Anthropic Provider implementation ---

/// A provider for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
    params: GenerationParams,
}

impl Debug for AnthropicProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl AnthropicProvider {
    /// Creates a new `AnthropicProvider`.
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        params: GenerationParams,
    ) -> Result<Self, PromptError> {
        if api_key.trim().is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            params,
        })
    }

    fn headers(&self) -> Result<HeaderMap, PromptError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(self.api_key.trim())
                .map_err(|e| PromptError::InvalidHeader(format!("x-api-key: {e}")))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    /// Sends one Messages request and returns every text segment, each followed by a newline.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            system: system_prompt,
            messages: vec![AnthropicMessage {
                role: "user",
                content: user_prompt,
            }],
        };

        debug!(model = %self.model, chars = user_prompt.chars().count(), "--> Sending prompt to Anthropic");

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi {
                status: status.as_u16(),
                body,
            });
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        let mut reply = String::new();
        for segment in anthropic_response.content {
            if let ContentSegment::Text { text } = segment {
                reply.push_str(&text);
                reply.push('\n');
            }
        }

        debug!("<-- Reply from Anthropic: {}", reply);
        Ok(reply)
    }
}
