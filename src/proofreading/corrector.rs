/*!
 * Correction client.
 *
 * `LlmCorrector` sends one paragraph (plus the previous corrected paragraph as
 * context) to a chat model and reports the result as a `CorrectionOutcome`.
 * It never returns an error: transport and model failures become
 * `CorrectionOutcome::Failed` and the caller decides what to keep.
 */

use async_trait::async_trait;
use log::debug;
use std::time::{Duration, Instant};

use crate::app_config::CorrectionCommonConfig;
use crate::errors::ProviderError;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::ollama::{ChatMessage, ChatRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Provider;
use super::prompts::CorrectionPrompt;

/// Result of one correction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionOutcome {
    /// The model returned usable text
    Corrected(String),
    /// The call failed; the paragraph should be kept as it was
    Failed {
        /// Human-readable cause, for logs
        reason: String,
    },
}

impl CorrectionOutcome {
    /// Whether the model produced text
    pub fn is_corrected(&self) -> bool {
        matches!(self, CorrectionOutcome::Corrected(_))
    }
}

/// Anything able to correct a paragraph given the previous one
#[async_trait]
pub trait Corrector: Send + Sync {
    /// Correct `current_paragraph`, using `previous_paragraph` (possibly empty) as context
    async fn correct(&self, previous_paragraph: &str, current_paragraph: &str) -> CorrectionOutcome;
}

/// Sampling and pacing parameters for each model call
#[derive(Debug, Clone)]
pub struct CorrectionSettings {
    /// Model identifier sent to the provider
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token budget
    pub max_tokens: u32,
    /// Pause after every call
    pub post_call_delay: Duration,
}

impl CorrectionSettings {
    /// Build settings for `model` from the shared correction config
    pub fn from_common(model: impl Into<String>, common: &CorrectionCommonConfig) -> Self {
        Self {
            model: model.into(),
            temperature: common.temperature,
            max_tokens: common.max_tokens,
            post_call_delay: Duration::from_millis(common.rate_limit_delay_ms),
        }
    }
}

/// Provider client implementation variants
#[derive(Debug, Clone)]
pub enum ProviderClient {
    /// OpenAI-compatible API (OpenAI, OpenRouter)
    OpenAI(OpenAI),
    /// Anthropic messages API
    Anthropic(Anthropic),
    /// Local Ollama server
    Ollama(Ollama),
    /// Offline mock
    Mock(MockProvider),
}

impl ProviderClient {
    /// Send `prompt` as a single user message and return the generated text
    async fn complete(
        &self,
        settings: &CorrectionSettings,
        prompt: String,
        paragraph: &str,
    ) -> Result<String, ProviderError> {
        match self {
            ProviderClient::OpenAI(client) => {
                let request = OpenAIRequest::new(&settings.model)
                    .add_message("user", prompt)
                    .temperature(settings.temperature)
                    .max_tokens(settings.max_tokens);
                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text(&response))
            }
            ProviderClient::Anthropic(client) => {
                let request = AnthropicRequest::new(&settings.model, settings.max_tokens)
                    .add_message("user", prompt)
                    .temperature(settings.temperature);
                let response = client.complete(request).await?;
                Ok(Anthropic::extract_text(&response))
            }
            ProviderClient::Ollama(client) => {
                let message = ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                };
                let request = ChatRequest::new(&settings.model, vec![message])
                    .temperature(settings.temperature)
                    .num_predict(settings.max_tokens);
                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            }
            ProviderClient::Mock(client) => {
                let request = MockRequest {
                    prompt,
                    paragraph: paragraph.to_string(),
                };
                let response = client.complete(request).await?;
                Ok(MockProvider::extract_text(&response))
            }
        }
    }
}

/// Corrector backed by a chat-completion provider
#[derive(Debug, Clone)]
pub struct LlmCorrector {
    client: ProviderClient,
    settings: CorrectionSettings,
    prompt: CorrectionPrompt,
}

impl LlmCorrector {
    /// Create a corrector using the default LaTeX prompt
    pub fn new(client: ProviderClient, settings: CorrectionSettings) -> Self {
        Self {
            client,
            settings,
            prompt: CorrectionPrompt::default(),
        }
    }

    /// Replace the prompt template
    pub fn with_prompt(mut self, prompt: CorrectionPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// The settings used for every call
    pub fn settings(&self) -> &CorrectionSettings {
        &self.settings
    }
}

#[async_trait]
impl Corrector for LlmCorrector {
    async fn correct(&self, previous_paragraph: &str, current_paragraph: &str) -> CorrectionOutcome {
        let prompt = self.prompt.render(previous_paragraph, current_paragraph);
        let started = Instant::now();

        let result = self.client.complete(&self.settings, prompt, current_paragraph).await;
        debug!("Model {} answered in {:?}", self.settings.model, started.elapsed());

        if !self.settings.post_call_delay.is_zero() {
            tokio::time::sleep(self.settings.post_call_delay).await;
        }

        match result {
            Ok(text) => match clean_response(&text) {
                Some(corrected) => CorrectionOutcome::Corrected(corrected),
                None => CorrectionOutcome::Failed {
                    reason: ProviderError::EmptyResponse.to_string(),
                },
            },
            Err(e) => CorrectionOutcome::Failed { reason: e.to_string() },
        }
    }
}

/// Offline corrector behind the `mock` selector: returns paragraphs unchanged
/// and keeps no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoCorrector;

#[async_trait]
impl Corrector for EchoCorrector {
    async fn correct(&self, _previous_paragraph: &str, current_paragraph: &str) -> CorrectionOutcome {
        CorrectionOutcome::Corrected(current_paragraph.to_string())
    }
}

/// Trim a model answer and drop one layer of surrounding double quotes.
///
/// A lone `"` counts as an empty quoted answer. Returns `None` when nothing is left.
pub fn clean_response(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = match trimmed.strip_prefix('"') {
        Some(rest) if trimmed.ends_with('"') => rest.strip_suffix('"').unwrap_or(rest),
        _ => trimmed,
    };

    if unquoted.trim().is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}
