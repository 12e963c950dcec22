use super::workspace_error;
use crate::dtos::{CreateProjectRequest, ProjectListResponse, ProjectView, SelectProjectRequest};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

pub async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    let workspace = state.workspace.read().await;
    Json(ProjectListResponse::from(&*workspace))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut workspace = state.workspace.write().await;
    let project = workspace
        .create_project(&payload.name)
        .map_err(workspace_error)?;

    Ok((StatusCode::CREATED, Json(ProjectView::from(project))))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let workspace = state.workspace.read().await;
    let project = workspace.project(project_id).map_err(workspace_error)?;
    Ok(Json(ProjectView::from(project)))
}

pub async fn get_active_project(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let workspace = state.workspace.read().await;
    let project = workspace.active_project().ok_or_else(|| {
        AppError::NotFound(anyhow::anyhow!(
            "No project selected. Select a project or create a new one."
        ))
    })?;
    Ok(Json(ProjectView::from(project)))
}

pub async fn select_project(
    State(state): State<AppState>,
    Json(payload): Json<SelectProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut workspace = state.workspace.write().await;
    let project = workspace
        .select(payload.project_id)
        .map_err(workspace_error)?;
    tracing::info!(project_id = %project.id, "Active project changed");
    Ok(Json(ProjectView::from(project)))
}
