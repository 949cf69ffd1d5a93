/*!
 * Tests for provider request building, URL handling and response parsing
 */

use serde_json::json;
use std::time::Duration;

use texproof::errors::ProviderError;
use texproof::providers::Provider;
use texproof::providers::anthropic::{Anthropic, AnthropicRequest, AnthropicResponse};
use texproof::providers::ollama::{ChatMessage, ChatRequest, ChatResponse, Ollama};
use texproof::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};

#[test]
fn test_openai_request_serialization_shouldSkipUnsetOptions() {
    let bare = serde_json::to_value(OpenAIRequest::new("gpt-4o-mini").add_message("user", "Hi")).unwrap();
    assert_eq!(bare, json!({
        "model": "gpt-4o-mini",
        "messages": [{ "role": "user", "content": "Hi" }]
    }));

    let full = serde_json::to_value(
        OpenAIRequest::new("gpt-4o-mini")
            .add_message("user", "Hi")
            .temperature(0.5)
            .max_tokens(800),
    ).unwrap();
    assert_eq!(full["temperature"], json!(0.5));
    assert_eq!(full["max_tokens"], json!(800));
}

#[test]
fn test_openai_extract_text_shouldReturnFirstChoice() {
    let response: OpenAIResponse = serde_json::from_value(json!({
        "choices": [
            { "message": { "role": "assistant", "content": "Corrected text." } },
            { "message": { "role": "assistant", "content": "Other." } }
        ],
        "usage": { "prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13 }
    })).unwrap();
    assert_eq!(OpenAI::extract_text(&response), "Corrected text.");

    let empty: OpenAIResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
    assert_eq!(OpenAI::extract_text(&empty), "");
    assert!(empty.usage.is_none());
}

#[test]
fn test_openai_completions_url_shouldHandleSlashesAndDefaults() {
    let openrouter = OpenAI::new("key", "https://openrouter.ai/api/v1/");
    assert_eq!(openrouter.completions_url(), "https://openrouter.ai/api/v1/chat/completions");

    let default = OpenAI::new("key", "");
    assert_eq!(default.completions_url(), "https://api.openai.com/v1/chat/completions");
}

#[test]
fn test_anthropic_request_serialization_shouldAlwaysSendMaxTokens() {
    let value = serde_json::to_value(
        AnthropicRequest::new("claude-3-haiku-20240307", 800)
            .system("Be brief")
            .add_message("user", "Hi"),
    ).unwrap();

    assert_eq!(value["max_tokens"], json!(800));
    assert_eq!(value["system"], json!("Be brief"));
    assert!(value.get("temperature").is_none());
}

#[test]
fn test_anthropic_extract_text_shouldJoinTextBlocks() {
    let response: AnthropicResponse = serde_json::from_value(json!({
        "content": [
            { "type": "text", "text": "First part, " },
            { "type": "tool_use" },
            { "type": "text", "text": "second part." }
        ],
        "usage": { "input_tokens": 12, "output_tokens": 5 }
    })).unwrap();

    assert_eq!(Anthropic::extract_text(&response), "First part, second part.");
}

#[test]
fn test_anthropic_messages_url_shouldAppendApiPath() {
    assert_eq!(Anthropic::new("key", "").messages_url(), "https://api.anthropic.com/v1/messages");
    assert_eq!(
        Anthropic::new("key", "https://proxy.local/").messages_url(),
        "https://proxy.local/v1/messages"
    );
}

#[test]
fn test_ollama_chat_url_withOrWithoutScheme_shouldBeAbsolute() {
    let timeout = Duration::from_secs(5);
    assert_eq!(Ollama::from_url("http://localhost:11434/", timeout).chat_url(), "http://localhost:11434/api/chat");
    assert_eq!(Ollama::from_url("gpu-box:11434", timeout).chat_url(), "http://gpu-box:11434/api/chat");
    assert_eq!(Ollama::from_url("https://ollama.example.com", timeout).chat_url(), "https://ollama.example.com/api/chat");
}

#[test]
fn test_ollama_chat_request_shouldDisableStreamingAndNestOptions() {
    let messages = vec![ChatMessage { role: "user".to_string(), content: "Hi".to_string() }];

    let bare = serde_json::to_value(ChatRequest::new("llama3.2:3b", messages.clone())).unwrap();
    assert_eq!(bare["stream"], json!(false));
    assert!(bare.get("options").is_none());

    let tuned = serde_json::to_value(
        ChatRequest::new("llama3.2:3b", messages).temperature(0.5).num_predict(800),
    ).unwrap();
    assert_eq!(tuned["options"], json!({ "temperature": 0.5, "num_predict": 800 }));
}

#[test]
fn test_ollama_extract_text_shouldReturnMessageContent() {
    let response: ChatResponse = serde_json::from_value(json!({
        "message": { "role": "assistant", "content": "Fixed." }
    })).unwrap();

    assert_eq!(Ollama::extract_text(&response), "Fixed.");
    assert!(!response.done);
}

#[test]
fn test_provider_error_fromStatus_shouldClassifyStatusCodes() {
    assert!(matches!(
        ProviderError::from_status(401, "bad key".to_string()),
        ProviderError::AuthenticationError(_)
    ));
    assert!(matches!(
        ProviderError::from_status(403, "forbidden".to_string()),
        ProviderError::AuthenticationError(_)
    ));
    assert!(matches!(
        ProviderError::from_status(429, "slow down".to_string()),
        ProviderError::RateLimitExceeded(_)
    ));
    match ProviderError::from_status(502, "bad gateway".to_string()) {
        ProviderError::ApiError { status_code, message } => {
            assert_eq!(status_code, 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
