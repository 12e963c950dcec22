//! Strict parsing of schema-constrained provider output.
//!
//! A response either deserializes completely into the requested type or is
//! rejected; partial JSON is never salvaged.

use super::{FinishReason, GenerationRequest, ProviderError, ProviderResponse, TextProvider};
use crate::error::ErrorKind;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("provider returned no content")]
    Empty,

    #[error("provider output was truncated")]
    Truncated,

    #[error("provider output does not match the expected schema: {0}")]
    Mismatch(String),
}

/// Failure of a structured generation call.
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Provider(e) => e.kind(),
            GenerationError::Schema(_) => ErrorKind::Schema,
            GenerationError::Timeout(_) => ErrorKind::Network,
        }
    }
}

/// Deserialize the response text into `T`.
pub fn parse_structured<T: DeserializeOwned>(response: &ProviderResponse) -> Result<T, SchemaError> {
    if response.finish_reason == FinishReason::Length {
        return Err(SchemaError::Truncated);
    }

    let text = response
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(SchemaError::Empty)?;

    serde_json::from_str(text).map_err(|e| SchemaError::Mismatch(e.to_string()))
}

/// Run one provider call bounded by `timeout` and parse its output into `T`.
pub async fn generate_structured<T: DeserializeOwned>(
    provider: &dyn TextProvider,
    request: &GenerationRequest,
    timeout: Duration,
) -> Result<T, GenerationError> {
    let response = tokio::time::timeout(timeout, provider.generate(request))
        .await
        .map_err(|_| GenerationError::Timeout(timeout))??;

    let parsed = parse_structured(&response)?;
    Ok(parsed)
}
