use crate::models::Turn;
use crate::session::{AnalysisSession, SessionFailure, SessionState};
use serde::{Deserialize, Serialize};
use service_core::acquisition::MediaKind;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeTextRequest {
    #[validate(length(min = 1, message = "Text cannot be empty"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeUrlRequest {
    #[validate(length(min = 1, message = "URL cannot be empty"))]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 4000, message = "Question must be 1-4000 characters"))]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct SourceView {
    pub description: String,
    pub media_kind: MediaKind,
}

/// Everything a client needs to render the session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    pub generation: u64,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub suggested_questions: Vec<String>,
    pub transcript: Vec<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionFailure>,
}

impl From<&AnalysisSession> for SessionView {
    fn from(session: &AnalysisSession) -> Self {
        Self {
            state: session.state(),
            generation: session.generation(),
            busy: session.is_busy(),
            source: session.source().map(|s| SourceView {
                description: s.description().to_string(),
                media_kind: s.media_kind(),
            }),
            summary: session.analysis().map(|a| a.summary.clone()),
            suggested_questions: session.suggestions().to_vec(),
            transcript: session.transcript().to_vec(),
            error: session.last_error().cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apology: Option<String>,
    pub session: SessionView,
}
