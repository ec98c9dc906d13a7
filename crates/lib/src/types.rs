use serde::{Deserialize, Serialize};

/// The summary and keyword list parsed out of a single model reply.
///
/// Either field may be empty when the reply did not carry the matching label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub summary: String,
    /// Comma-joined keywords, kept verbatim as the model produced them.
    pub keywords: String,
}

impl Annotation {
    pub fn new(summary: impl Into<String>, keywords: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            keywords: keywords.into(),
        }
    }

    /// True when neither label was found in the reply.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.keywords.is_empty()
    }
}

/// Decoding parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.5,
        }
    }
}
