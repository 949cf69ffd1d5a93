use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Ollama client for interacting with Ollama API
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Additional model parameters
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum number of tokens to predict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// A message in a chat exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat request for the Ollama API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model name to use
    model: String,
    /// Conversation so far
    messages: Vec<ChatMessage>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Chat response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Model that produced the answer
    #[serde(default)]
    pub model: String,
    /// The generated message
    pub message: ChatMessage,
    /// Whether generation finished
    #[serde(default)]
    pub done: bool,
}

impl ChatRequest {
    /// Create a new, non-streaming chat request
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: None,
            stream: false,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(ChatOptions::default).temperature = Some(temperature);
        self
    }

    /// Set the maximum number of generated tokens
    pub fn num_predict(mut self, num_predict: u32) -> Self {
        self.options.get_or_insert_with(ChatOptions::default).num_predict = Some(num_predict);
        self
    }
}

impl Ollama {
    /// Create a client from a base URL such as `http://localhost:11434`
    pub fn from_url(url: impl Into<String>, timeout: Duration) -> Self {
        let url = url.into();
        let base_url = if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else {
            format!("http://{}", url)
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Full URL of the chat route
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let response = self.client.post(self.chat_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        response.json::<ChatResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    fn extract_text(response: &Self::Response) -> String {
        response.message.content.clone()
    }
}
