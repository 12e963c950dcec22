use super::{processing_error, workspace_error};
use crate::dtos::{AddTextRequest, AddUrlRequest, DocumentView};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Request body cap: the largest upload plus room for multipart framing.
pub const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub async fn add_text_document(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<AddTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let document = state
        .processor
        .add_text(project_id, payload.name.as_deref(), &payload.text)
        .await
        .map_err(processing_error)?;

    Ok((StatusCode::CREATED, Json(DocumentView::from(&document))))
}

pub async fn add_url_document(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<AddUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let document = state
        .processor
        .add_url(project_id, &payload.url)
        .await
        .map_err(processing_error)?;

    Ok((StatusCode::CREATED, Json(DocumentView::from(&document))))
}

pub async fn upload_document(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    state
        .workspace
        .read()
        .await
        .project(project_id)
        .map_err(workspace_error)?;

    let field = loop {
        match multipart.next_field().await.map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
        })? {
            Some(field) if field.name() == Some("file") => break field,
            Some(_) => continue,
            None => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Please select a file to analyze."
                )))
            }
        }
    };

    let file_name = field.file_name().unwrap_or("unnamed").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e)))?
        .to_vec();

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(anyhow::anyhow!("File too large (max 20MB)")));
    }

    let document = state
        .processor
        .add_upload(project_id, &file_name, &content_type, data)
        .await
        .map_err(processing_error)?;

    Ok((StatusCode::CREATED, Json(DocumentView::from(&document))))
}
