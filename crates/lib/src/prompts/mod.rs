//! # Prompt Templates
//!
//! Fixed prompts used by the digest pipeline.

pub mod tasks;
