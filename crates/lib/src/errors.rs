use thiserror::Error;

/// Errors raised while talking to an AI provider or preparing its input.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error ({status}): {body}")]
    AiApi { status: u16, body: String },
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
