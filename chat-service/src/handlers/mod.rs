pub mod chat;
pub mod health;
pub mod session;

pub use chat::ask_question;
pub use health::health_check;
pub use session::{analyze_file, analyze_text, analyze_url, get_session, reset_session};

use crate::session::SessionError;
use service_core::error::AppError;

/// Session failures as HTTP errors. Precondition violations are conflicts.
pub(crate) fn session_error(err: SessionError) -> AppError {
    match err {
        SessionError::NotReady(_) | SessionError::Busy | SessionError::Superseded => {
            AppError::Conflict(anyhow::anyhow!(err.to_string()))
        }
        SessionError::Timeout(_) => AppError::GatewayTimeout(err.to_string()),
        other => match other.kind() {
            Some(kind) => AppError::from_kind(kind, other.to_string()),
            None => AppError::InternalError(anyhow::anyhow!(other.to_string())),
        },
    }
}
