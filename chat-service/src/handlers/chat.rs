use super::session_error;
use crate::dtos::{AskRequest, AskResponse, SessionView};
use crate::session::AskOutcome;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;
use validator::Validate;

/// Ask about the analyzed source. Posting a suggested question works the same way.
///
/// A failed answer is not an HTTP error: the response carries an apology
/// and the session stays interactive.
pub async fn ask_question(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let outcome = state
        .analyst
        .ask(&payload.question)
        .await
        .map_err(session_error)?;

    let (answer, apology) = match outcome {
        AskOutcome::Answered(reply) => (Some(reply.answer), None),
        AskOutcome::Apologized { apology, .. } => (None, Some(apology)),
    };

    let session = state.analyst.session().await;
    Ok(Json(AskResponse {
        answer,
        apology,
        session: SessionView::from(&*session),
    }))
}
