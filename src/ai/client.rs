use crate::{
    config::AIConfig,
    errors::AIError,
    types::ai::{ChatMessage, OpenAIChatCompletionResponse, OpenAIChatRequest},
};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;

/// Language-model collaborator of the review pipeline.
#[async_trait]
pub trait ReviewClient: Send + Sync {
    /// Sends `prompt`, optionally with the contents of `supporting_file` as
    /// extra context, and returns the model's answer.
    async fn review(&self, prompt: &str, supporting_file: Option<&Path>) -> Result<String, AIError>;
}

/// Client for OpenAI-compatible chat completion endpoints (OpenRouter by default).
pub struct OpenAIClient {
    config: AIConfig,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(config: AIConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Helper function to execute the AI request and process the response
    async fn execute_ai_request(&self, messages: Vec<ChatMessage>) -> Result<String, AIError> {
        let request_payload = OpenAIChatRequest {
            model: self.config.model_name.clone(),
            messages,
            temperature: Some(self.config.temperature),
            stream: false,
        };

        if let Ok(json_string) = serde_json::to_string_pretty(&request_payload) {
            tracing::trace!("Sending review request:\n{}", json_string);
        }

        let mut request_builder = self.http.post(&self.config.api_url);
        if let Some(api_key) = &self.config.api_key {
            request_builder = request_builder.bearer_auth(api_key);
        } else {
            tracing::warn!("No API key configured, sending unauthenticated request");
        }

        let response = request_builder
            .json(&request_payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error connecting to API: {}", e);
                AIError::RequestFailed(e)
            })?;

        if !response.status().is_success() {
            let status_code = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body from AI response".to_string());
            tracing::error!("AI API request failed with status {}: {}", status_code, body);
            return Err(AIError::ApiResponseError(status_code, body));
        }

        let response_data = response
            .json::<OpenAIChatCompletionResponse>()
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse AI response JSON: {}", e);
                AIError::ResponseParseFailed(e)
            })?;

        let choice = response_data
            .choices
            .into_iter()
            .next()
            .ok_or(AIError::NoChoiceInResponse)?;
        let content = choice.message.content.unwrap_or_default();
        let cleaned_content = clean_ai_output(&content);
        if cleaned_content.trim().is_empty() {
            tracing::warn!("AI returned an empty message");
            return Err(AIError::EmptyMessage);
        }
        Ok(cleaned_content)
    }
}

#[async_trait]
impl ReviewClient for OpenAIClient {
    async fn review(&self, prompt: &str, supporting_file: Option<&Path>) -> Result<String, AIError> {
        let messages = build_messages(prompt, supporting_file)?;
        self.execute_ai_request(messages).await
    }
}

/// System context from the supporting file (when readable text), then the prompt.
///
/// Missing files, e.g. a path deleted by the reviewed commit, and binary
/// files are skipped.
pub fn build_messages(prompt: &str, supporting_file: Option<&Path>) -> Result<Vec<ChatMessage>, AIError> {
    let mut messages = Vec::new();

    if let Some(path) = supporting_file.filter(|p| p.is_file()) {
        match std::fs::read_to_string(path) {
            Ok(content) => messages.push(ChatMessage::system(format!(
                "This is the code from file '{}' for context and comparison:\n\n{}",
                path.display(),
                content
            ))),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::debug!("Skipping non-text supporting file {}", path.display());
            }
            Err(e) => return Err(AIError::SupportingFile(path.display().to_string(), e)),
        }
    }

    messages.push(ChatMessage::user(prompt));
    Ok(messages)
}

// Removes <think>...</think> tags and their content from a given string
lazy_static! {
    static ref RE_THINK_TAGS: Regex = Regex::new(r"(?s)<think>.*?</think>").unwrap();
}

pub fn clean_ai_output(text: &str) -> String {
    RE_THINK_TAGS.replace_all(text, "").trim().to_string()
}
