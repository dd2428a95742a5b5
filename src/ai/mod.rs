//! Review prompts and the language-model client.

pub mod client;
pub mod prompts;

pub use client::{clean_ai_output, OpenAIClient, ReviewClient};
pub use prompts::build_review_prompt;
