#![deny(missing_docs)]
#![doc = "Uniform LLM backend adapters: chat-style and completion-style."]

pub mod chat;
pub mod completions;

use lsa_core::LsaError;

pub use chat::{AnthropicBackend, ChatCompletionsBackend};
pub use completions::{mean_output_logprob, CompletionsBackend};

/// Fixed sampling parameters sent with every provider call.
///
/// Decoding is fully deterministic (temperature 0) and output is bounded to
/// a small token budget; completions are single short answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Sampling temperature; 0 throughout this project.
    pub temperature: f32,
    /// Maximum output tokens per call.
    pub max_tokens: u32,
}

impl SamplingConfig {
    /// Budget used with the chat-style backends.
    pub fn chat() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 10,
        }
    }

    /// Budget used with the completion-style backend.
    pub fn completion() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 20,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::chat()
    }
}

/// One provider completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Raw completion text.
    pub text: String,
    /// Stop/finish reason reported by the backend.
    pub finish_reason: String,
    /// Mean output-token log-probability when the backend exposes it.
    pub confidence: Option<f64>,
}

/// Uniform capability implemented once per backend.
///
/// Transport, authentication and rate-limit failures are fatal for the call
/// and propagate unretried; the surrounding runner decides what to do.
pub trait Provider {
    /// Sends one prompt to one model and returns its completion.
    fn complete(
        &self,
        prompt: &str,
        model: &str,
        sampling: &SamplingConfig,
    ) -> Result<Completion, LsaError>;

    /// Whether completions carry a confidence signal. Selects the output
    /// record schema in the runner.
    fn exposes_logprobs(&self) -> bool {
        false
    }
}
