//! Generative-language provider abstractions.
//!
//! The services never talk to a model directly: they build a
//! [`GenerationRequest`] (system instruction, role-tagged turns, response
//! schema) and hand it to a [`TextProvider`]. Gemini is the production
//! backend; [`mock::MockTextProvider`] stands in for it in tests.

pub mod gemini;
pub mod mock;
pub mod structured;

use crate::error::ErrorKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use structured::{GenerationError, SchemaError, generate_structured, parse_structured};

/// Error type for provider operations.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // A blocked or rejected prompt is reported like unusable output.
            ProviderError::ContentFiltered | ProviderError::InvalidRequest(_) => ErrorKind::Schema,
            ProviderError::NotConfigured(_)
            | ProviderError::ApiError(_)
            | ProviderError::RateLimited
            | ProviderError::NetworkError(_) => ErrorKind::Network,
        }
    }
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One piece of a message: text or raw inline media.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: Vec<u8> },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }
}

/// A role-tagged message sent to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::text(text)],
        }
    }
}

/// Generation parameters for AI requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Model override; the provider's configured model is used when `None`.
    pub model: Option<String>,

    /// Response schema. When set the provider must answer with JSON only.
    pub output_schema: Option<serde_json::Value>,
}

/// A complete provider call.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<Message>,
    pub params: GenerationParams,
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Concatenated text of the first candidate.
    pub text: Option<String>,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

impl ProviderResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: FinishReason::Complete,
        }
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Error,
}

/// Trait for text/JSON generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a response for the whole request.
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
