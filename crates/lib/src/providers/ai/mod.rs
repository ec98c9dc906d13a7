pub mod anthropic;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

pub use anthropic::AnthropicProvider;

/// A trait for interacting with an AI provider.
///
/// Implementations own their decoding parameters; callers only supply the prompts.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result is the provider's textual reply with non-text content dropped.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
