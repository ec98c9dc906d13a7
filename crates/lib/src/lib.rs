//! # notedigest
//!
//! Core of the digest pipeline: an `AiProvider` abstraction with an Anthropic
//! implementation, the fixed summarization prompt, and the best-effort parser
//! that turns a model reply into an [`Annotation`].

pub mod errors;
pub mod extract;
pub mod prompts;
pub mod providers;
pub mod summarize;
pub mod types;

pub use errors::PromptError;
pub use extract::ReplyParser;
pub use summarize::Summarizer;
pub use types::{Annotation, GenerationParams};
