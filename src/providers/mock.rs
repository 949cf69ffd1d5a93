/*!
 * Mock provider implementation.
 *
 * This provider never touches the network and records every request, so it
 * is meant for tests and benchmarks. It can simulate different behaviors:
 * - `MockProvider::echo()` - Always succeeds, returning the paragraph unchanged
 * - `MockProvider::quoted()` - Succeeds, but wraps the answer in double quotes
 * - `MockProvider::intermittent(n)` - Fails every Nth request
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The full rendered prompt
    pub prompt: String,
    /// The paragraph the prompt asks to correct
    pub paragraph: String,
}

/// Mock response
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The generated text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the paragraph as-is
    Echo,
    /// Returns the paragraph wrapped in double quotes
    Quoted,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock provider for offline correction
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a mock provider that returns paragraphs unchanged
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock provider that quotes its answers
    pub fn quoted() -> Self {
        Self::new(MockBehavior::Quoted)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator, used instead of echoing
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every request received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    fn answer(&self, request: &MockRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => request.paragraph.clone(),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match self.behavior {
            MockBehavior::Echo => Ok(MockResponse { text: self.answer(&request) }),

            MockBehavior::Quoted => Ok(MockResponse {
                text: format!("\"{}\"", self.answer(&request)),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(MockResponse { text: self.answer(&request) })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
