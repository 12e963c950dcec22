//! Mock provider implementation for testing.

use super::{GenerationRequest, Part, ProviderError, ProviderResponse, Role, TextProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Mock text provider for testing.
///
/// Scripted results are returned in order; once the script runs out every
/// call echoes the last user turn. Every request is recorded.
pub struct MockTextProvider {
    enabled: bool,
    delay: Option<Duration>,
    script: Mutex<VecDeque<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            delay: None,
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.push_json(value);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(Ok(ProviderResponse::text(text)));
        self
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push_json(&self, value: serde_json::Value) {
        self.push(Ok(ProviderResponse::text(value.to_string())));
    }

    pub fn push(&self, result: Result<ProviderResponse, ProviderError>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(result);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn next_scripted(&self) -> Option<Result<ProviderResponse, ProviderError>> {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(result) = self.next_scripted() {
            return result;
        }

        let prompt = request
            .contents
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .and_then(|m| {
                m.parts.iter().find_map(|p| match p {
                    Part::Text(text) => Some(text.as_str()),
                    Part::InlineData { .. } => None,
                })
            })
            .unwrap_or_default();

        Ok(ProviderResponse::text(format!("Mock response for: {}", prompt)))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
