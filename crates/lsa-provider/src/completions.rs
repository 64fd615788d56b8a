//! Completion-style backend with per-token log-probabilities.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use lsa_core::{ErrorInfo, LsaError};

use crate::{Completion, Provider, SamplingConfig};

const OPENAI_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    n: u32,
    temperature: f32,
    /// Requests log-probabilities for each output token.
    logprobs: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
    finish_reason: Option<String>,
    logprobs: Option<LogprobPayload>,
}

#[derive(Debug, Deserialize)]
struct LogprobPayload {
    text_offset: Vec<usize>,
    token_logprobs: Vec<Option<f64>>,
}

fn request_error(model: &str, err: impl ToString) -> LsaError {
    LsaError::Provider(
        ErrorInfo::new("provider.request-failed", "backend request failed")
            .with_context("model", model)
            .with_hint(err.to_string()),
    )
}

fn logprob_error(what: &str) -> LsaError {
    LsaError::Provider(
        ErrorInfo::new("provider.malformed-logprobs", "logprob payload has no valid boundary")
            .with_context("reason", what),
    )
}

/// Mean log-probability of the generated continuation.
///
/// The first output token is located as the last offset in the provider's
/// token-offset list that does not exceed the prompt's character length;
/// everything from that index onward is the continuation, everything before
/// it is prompt-internal and excluded from the mean. A payload without a
/// valid boundary fails loudly rather than guessing an index.
pub fn mean_output_logprob(
    prompt_len: usize,
    text_offset: &[usize],
    token_logprobs: &[Option<f64>],
) -> Result<f64, LsaError> {
    if text_offset.is_empty() {
        return Err(logprob_error("empty text_offset"));
    }
    if text_offset.len() != token_logprobs.len() {
        return Err(logprob_error("offset and logprob lengths differ"));
    }
    let first_output = text_offset
        .iter()
        .rposition(|&offset| offset <= prompt_len)
        .ok_or_else(|| logprob_error("no offset within prompt bounds"))?;
    let tail = &token_logprobs[first_output..];
    let mut sum = 0.0;
    for value in tail {
        match value {
            Some(logprob) => sum += logprob,
            None => return Err(logprob_error("null logprob in output range")),
        }
    }
    Ok(sum / tail.len() as f64)
}

/// Legacy `/v1/completions` backend.
///
/// Sends the raw prompt as a continuation request and reports confidence as
/// the mean log-probability of the generated tokens.
pub struct CompletionsBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CompletionsBackend {
    /// Backend against an arbitrary completions endpoint.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Backend against the OpenAI API.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(OPENAI_BASE_URL, api_key)
    }
}

impl Provider for CompletionsBackend {
    fn complete(
        &self,
        prompt: &str,
        model: &str,
        sampling: &SamplingConfig,
    ) -> Result<Completion, LsaError> {
        let request = CompletionRequest {
            model,
            prompt,
            max_tokens: sampling.max_tokens,
            n: 1,
            temperature: sampling.temperature,
            logprobs: 1,
        };

        let response = self
            .client
            .post(format!("{}/v1/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|err| request_error(model, err))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| request_error(model, err))?;
        if !status.is_success() {
            let snippet: String = body.chars().take(300).collect();
            return Err(LsaError::Provider(
                ErrorInfo::new("provider.bad-status", "backend returned an error status")
                    .with_context("model", model)
                    .with_context("status", status.as_u16().to_string())
                    .with_context("body", snippet),
            ));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|err| request_error(model, err))?;
        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            LsaError::Provider(
                ErrorInfo::new("provider.malformed-response", "backend response missing fields")
                    .with_context("model", model)
                    .with_context("missing", "choices"),
            )
        })?;
        let payload = choice
            .logprobs
            .ok_or_else(|| logprob_error("missing logprobs payload"))?;
        // Offsets count characters, not bytes; prompts may contain arrows.
        let prompt_len = prompt.chars().count();
        let confidence =
            mean_output_logprob(prompt_len, &payload.text_offset, &payload.token_logprobs)?;
        Ok(Completion {
            text: choice.text,
            finish_reason: choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
            confidence: Some(confidence),
        })
    }

    fn exposes_logprobs(&self) -> bool {
        true
    }
}
