use super::session_error;
use crate::dtos::{AnalyzeTextRequest, AnalyzeUrlRequest, SessionView};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Request body cap: the largest upload plus room for multipart framing.
pub const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.analyst.session().await;
    Json(SessionView::from(&*session))
}

pub async fn analyze_text(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    state
        .analyst
        .analyze_text(&payload.text)
        .await
        .map_err(session_error)?;

    let session = state.analyst.session().await;
    Ok(Json(SessionView::from(&*session)))
}

pub async fn analyze_url(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    state
        .analyst
        .analyze_url(&payload.url)
        .await
        .map_err(session_error)?;

    let session = state.analyst.session().await;
    Ok(Json(SessionView::from(&*session)))
}

pub async fn analyze_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
        })?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(anyhow::anyhow!("File too large (max 20MB)")));
        }
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload.ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!("Please select a file to analyze."))
    })?;

    state
        .analyst
        .analyze_file(&file_name, &data)
        .await
        .map_err(session_error)?;

    let session = state.analyst.session().await;
    Ok(Json(SessionView::from(&*session)))
}

pub async fn reset_session(State(state): State<AppState>) -> impl IntoResponse {
    state.analyst.reset().await;
    let session = state.analyst.session().await;
    Json(SessionView::from(&*session))
}
