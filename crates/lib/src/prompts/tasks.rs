//! # Summarization Task Prompt
//!
//! The system prompt and the output labels the reply parser looks for. The labels appear
//! verbatim in the prompt's output format, so the two must change together.

/// Label that introduces the summary section of a reply.
pub const SUMMARY_LABEL: &str = "요약:";

/// Label that introduces the comma-separated keyword list of a reply.
pub const KEYWORDS_LABEL: &str = "키워드:";

// --- Summarize & Extract Keywords ---
pub const SUMMARIZE_SYSTEM_PROMPT: &str = r#"***
You are a native and fluent Korean-English document assistant.
Extract exactly 5 keywords from the user's input and summarize it in no more than 5 sentences.
The input is usually a document such as a news story, an article or a paper.

Regardless of the language of the user's input, write the result in Korean.
Use exactly this format:
***
요약: [short summary here]

키워드: keyword1,keyword2,keyword3,keyword4,keyword5"#;
