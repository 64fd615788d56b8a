//! Provider group selection and backend construction.

use std::env;
use std::error::Error;

use clap::ValueEnum;

use lsa_provider::{AnthropicBackend, ChatCompletionsBackend, CompletionsBackend, Provider};

/// Which backend family a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderGroup {
    /// OpenAI chat models.
    Gpt,
    /// Together-hosted chat models.
    Together,
    /// Anthropic chat models.
    Anthropic,
    /// Legacy OpenAI completions with log-probabilities.
    Completions,
}

impl ProviderGroup {
    /// Group label used in output file names.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderGroup::Gpt => "gpt",
            ProviderGroup::Together => "together",
            ProviderGroup::Anthropic => "anthropic",
            ProviderGroup::Completions => "completions",
        }
    }

    /// Default model list for the group.
    pub fn default_models(&self) -> Vec<String> {
        let models: &[&str] = match self {
            ProviderGroup::Gpt => &["gpt-3.5-turbo-0125", "gpt-4-0613", "gpt-4o-2024-08-06"],
            ProviderGroup::Together => &[
                "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo",
                "meta-llama/Meta-Llama-3.1-70B-Instruct-Turbo",
                "meta-llama/Meta-Llama-3.1-405B-Instruct-Turbo",
                "google/gemma-2-27b-it",
                "google/gemma-2-9b-it",
            ],
            ProviderGroup::Anthropic => &["claude-3-5-sonnet-20241022", "claude-3-sonnet-20240229"],
            ProviderGroup::Completions => &["text-davinci-003"],
        };
        models.iter().map(|model| model.to_string()).collect()
    }

    /// Environment variable holding the group's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderGroup::Gpt | ProviderGroup::Completions => "OPENAI_API_KEY",
            ProviderGroup::Together => "TOGETHER_API_KEY",
            ProviderGroup::Anthropic => "ANTHROPIC_API_KEY_LS",
        }
    }

    /// Builds the backend for this group with the given system prompt.
    /// Credentials come from the group's environment variable and live only
    /// inside the returned adapter.
    pub fn build(&self, system_prompt: &str) -> Result<Box<dyn Provider>, Box<dyn Error>> {
        let api_key = env::var(self.env_var())
            .map_err(|_| format!("{} is not set in the environment", self.env_var()))?;
        Ok(match self {
            ProviderGroup::Gpt => Box::new(ChatCompletionsBackend::openai(api_key, system_prompt)),
            ProviderGroup::Together => {
                Box::new(ChatCompletionsBackend::together(api_key, system_prompt))
            }
            ProviderGroup::Anthropic => Box::new(AnthropicBackend::new(api_key, system_prompt)),
            ProviderGroup::Completions => Box::new(CompletionsBackend::openai(api_key)),
        })
    }
}

/// The model list for a run: explicit `--model` overrides or the group
/// default.
pub fn resolve_models(group: ProviderGroup, overrides: &[String]) -> Vec<String> {
    if overrides.is_empty() {
        group.default_models()
    } else {
        overrides.to_vec()
    }
}
