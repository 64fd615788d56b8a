//! Chat-style backends: OpenAI-compatible chat completions and Anthropic
//! messages.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use lsa_core::{ErrorInfo, LsaError};

use crate::{Completion, Provider, SamplingConfig};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const TOGETHER_BASE_URL: &str = "https://api.together.xyz";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Truncation bound for error-body context; responses can be large.
const BODY_SNIPPET_LEN: usize = 300;

fn request_error(model: &str, err: impl ToString) -> LsaError {
    LsaError::Provider(
        ErrorInfo::new("provider.request-failed", "backend request failed")
            .with_context("model", model)
            .with_hint(err.to_string()),
    )
}

fn status_error(model: &str, status: u16, body: &str) -> LsaError {
    let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
    LsaError::Provider(
        ErrorInfo::new("provider.bad-status", "backend returned an error status")
            .with_context("model", model)
            .with_context("status", status.to_string())
            .with_context("body", snippet),
    )
}

fn malformed_error(model: &str, what: &str) -> LsaError {
    LsaError::Provider(
        ErrorInfo::new("provider.malformed-response", "backend response missing fields")
            .with_context("model", model)
            .with_context("missing", what),
    )
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// OpenAI-compatible `/v1/chat/completions` backend.
///
/// Sends the system instruction plus a single user turn. Two hosted
/// providers share this wire shape; the base URL selects between them.
/// Token-level probabilities are not exposed, so confidence is always
/// unavailable.
pub struct ChatCompletionsBackend {
    client: Client,
    base_url: String,
    api_key: String,
    system_prompt: String,
}

impl ChatCompletionsBackend {
    /// Backend against an arbitrary OpenAI-compatible endpoint.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Backend against the OpenAI API.
    pub fn openai(api_key: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self::new(OPENAI_BASE_URL, api_key, system_prompt)
    }

    /// Backend against the Together API.
    pub fn together(api_key: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self::new(TOGETHER_BASE_URL, api_key, system_prompt)
    }
}

impl Provider for ChatCompletionsBackend {
    fn complete(
        &self,
        prompt: &str,
        model: &str,
        sampling: &SamplingConfig,
    ) -> Result<Completion, LsaError> {
        let request = ChatRequest {
            model,
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|err| request_error(model, err))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| request_error(model, err))?;
        if !status.is_success() {
            return Err(status_error(model, status.as_u16(), &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|err| request_error(model, err))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| malformed_error(model, "choices"))?;
        Ok(Completion {
            text: choice.message.content,
            finish_reason: choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
            confidence: None,
        })
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Anthropic `/v1/messages` backend.
///
/// The system instruction travels in its own field; authentication uses the
/// `x-api-key` header plus a pinned API version. Confidence is unavailable.
pub struct AnthropicBackend {
    client: Client,
    url: String,
    api_key: String,
    system_prompt: String,
}

impl AnthropicBackend {
    /// Backend against the Anthropic API.
    pub fn new(api_key: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: ANTHROPIC_URL.to_string(),
            api_key: api_key.into(),
            system_prompt: system_prompt.into(),
        }
    }
}

impl Provider for AnthropicBackend {
    fn complete(
        &self,
        prompt: &str,
        model: &str,
        sampling: &SamplingConfig,
    ) -> Result<Completion, LsaError> {
        let request = MessagesRequest {
            model,
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
            system: &self.system_prompt,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .map_err(|err| request_error(model, err))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| request_error(model, err))?;
        if !status.is_success() {
            return Err(status_error(model, status.as_u16(), &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|err| request_error(model, err))?;
        let text = parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| malformed_error(model, "content"))?;
        Ok(Completion {
            text,
            finish_reason: parsed.stop_reason.unwrap_or_else(|| "unknown".to_string()),
            confidence: None,
        })
    }
}
