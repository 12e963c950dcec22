pub mod artifacts;
pub mod documents;
pub mod health;
pub mod projects;

pub use artifacts::{get_artifact_tab, get_artifacts};
pub use documents::{add_text_document, add_url_document, upload_document};
pub use health::health_check;
pub use projects::{create_project, get_active_project, get_project, list_projects, select_project};

use crate::services::{ProcessingError, WorkspaceError};
use service_core::error::AppError;
use service_core::genai::GenerationError;

pub(crate) fn workspace_error(err: WorkspaceError) -> AppError {
    match err {
        WorkspaceError::EmptyName => AppError::BadRequest(anyhow::anyhow!(err.to_string())),
        WorkspaceError::ProjectNotFound(_) => AppError::NotFound(anyhow::anyhow!(err.to_string())),
        WorkspaceError::DocumentGone(_) => AppError::Conflict(anyhow::anyhow!(err.to_string())),
    }
}

pub(crate) fn processing_error(err: ProcessingError) -> AppError {
    match err {
        ProcessingError::Acquisition(e) => AppError::from(e),
        ProcessingError::Workspace(e) => workspace_error(e),
        ProcessingError::Generation(GenerationError::Timeout(limit)) => AppError::GatewayTimeout(
            format!("Document processing did not complete within {} seconds", limit.as_secs()),
        ),
        ProcessingError::Generation(e) => AppError::from_kind(
            e.kind(),
            "An error occurred while processing the document. Please try again.",
        ),
    }
}
