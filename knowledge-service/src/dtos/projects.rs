use crate::models::{Document, DocumentKind, IntelligenceArtifacts, Project};
use crate::services::Workspace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "Project name must be 1-200 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectProjectRequest {
    pub project_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddTextRequest {
    #[validate(length(max = 200, message = "Document name must be at most 200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Text cannot be empty"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddUrlRequest {
    #[validate(length(min = 1, message = "URL cannot be empty"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub document_count: usize,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
    pub active_project_id: Option<Uuid>,
}

impl From<&Workspace> for ProjectListResponse {
    fn from(workspace: &Workspace) -> Self {
        let active = workspace.active_id();
        Self {
            projects: workspace
                .projects()
                .iter()
                .map(|p| ProjectSummary {
                    id: p.id,
                    name: p.name.clone(),
                    document_count: p.documents.len(),
                    active: Some(p.id) == active,
                })
                .collect(),
            active_project_id: active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub id: Uuid,
    pub name: String,
    pub kind: DocumentKind,
    pub description: String,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
    pub artifacts: IntelligenceArtifacts,
}

impl From<&Document> for DocumentView {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            name: doc.name.clone(),
            kind: doc.kind,
            description: doc.source.description().to_string(),
            processed: doc.processed,
            created_at: doc.created_at,
            artifacts: doc.artifacts.clone(),
        }
    }
}

/// A project with its documents, newest first.
#[derive(Debug, Serialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub name: String,
    pub documents: Vec<DocumentView>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            documents: project.documents.iter().rev().map(DocumentView::from).collect(),
        }
    }
}
