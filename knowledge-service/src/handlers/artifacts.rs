use super::workspace_error;
use crate::dtos::{ArtifactsResponse, TabResponse};
use crate::models::ArtifactTab;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

pub async fn get_artifacts(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let workspace = state.workspace.read().await;
    let project = workspace.project(project_id).map_err(workspace_error)?;

    Ok(Json(ArtifactsResponse {
        project_id,
        processed_documents: project.documents.iter().filter(|d| d.processed).count(),
        artifacts: project.combined_artifacts(),
    }))
}

pub async fn get_artifact_tab(
    State(state): State<AppState>,
    Path((project_id, tab)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tab: ArtifactTab = tab
        .parse()
        .map_err(|e: String| AppError::NotFound(anyhow::anyhow!(e)))?;

    let artifacts = state
        .workspace
        .read()
        .await
        .combined_artifacts(project_id)
        .map_err(workspace_error)?;
    let items = artifacts.tab(tab);

    let body = serde_json::to_value(TabResponse {
        project_id,
        tab,
        label: tab.label(),
        count: items.len(),
        items,
    })
    .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    Ok(Json(body))
}
