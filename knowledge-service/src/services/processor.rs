//! Adds documents to projects and runs them through extraction.
//!
//! A document is visible as pending while its extraction call runs. The
//! workspace lock is released for the duration of the call.

use super::extraction::extraction_request;
use super::workspace::{Workspace, WorkspaceError};
use crate::models::{Document, DocumentKind, IntelligenceArtifacts, TimelineEvent, TimelineKind};
use service_core::acquisition::{self, AcquisitionError, RelayFetcher, Source};
use service_core::genai::{GenerationError, TextProvider, generate_structured};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub struct DocumentProcessor {
    workspace: Arc<RwLock<Workspace>>,
    provider: Arc<dyn TextProvider>,
    fetcher: RelayFetcher,
    model: String,
    request_timeout: Duration,
}

impl DocumentProcessor {
    pub fn new(
        workspace: Arc<RwLock<Workspace>>,
        provider: Arc<dyn TextProvider>,
        fetcher: RelayFetcher,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            workspace,
            provider,
            fetcher,
            model: model.into(),
            request_timeout,
        }
    }

    pub fn workspace(&self) -> &Arc<RwLock<Workspace>> {
        &self.workspace
    }

    pub async fn add_text(
        &self,
        project_id: Uuid,
        name: Option<&str>,
        text: &str,
    ) -> Result<Document, ProcessingError> {
        let source = acquisition::from_pasted_text(text)?;
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Pasted Text")
            .to_string();
        self.ingest(project_id, &name, DocumentKind::Text, source).await
    }

    pub async fn add_url(&self, project_id: Uuid, url: &str) -> Result<Document, ProcessingError> {
        self.workspace.read().await.project(project_id)?;

        let source = acquisition::from_url(&self.fetcher, url).await?;
        self.ingest(project_id, url.trim(), DocumentKind::Url, source).await
    }

    /// `image/*` uploads become image documents; anything else is read as text.
    pub async fn add_upload(
        &self,
        project_id: Uuid,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Document, ProcessingError> {
        let (kind, source) = if content_type.starts_with("image/") {
            (
                DocumentKind::Image,
                acquisition::from_image(file_name, content_type, bytes)?,
            )
        } else {
            (
                DocumentKind::Text,
                acquisition::from_file_bytes(file_name, &bytes)?,
            )
        };
        self.ingest(project_id, file_name, kind, source).await
    }

    async fn ingest(
        &self,
        project_id: Uuid,
        name: &str,
        kind: DocumentKind,
        source: Source,
    ) -> Result<Document, ProcessingError> {
        let request = extraction_request(name, &source, &self.model);
        let document_id = self
            .workspace
            .write()
            .await
            .insert_pending(project_id, name, kind, source)?;

        tracing::info!(
            project_id = %project_id,
            document_id = %document_id,
            name,
            model = %self.model,
            "Processing document"
        );
        let result = generate_structured::<IntelligenceArtifacts>(
            self.provider.as_ref(),
            &request,
            self.request_timeout,
        )
        .await;

        let mut workspace = self.workspace.write().await;
        match result {
            Ok(mut artifacts) => {
                artifacts.normalize();
                let created_at = workspace
                    .project(project_id)?
                    .document(document_id)
                    .map(|d| d.created_at)
                    .ok_or(WorkspaceError::DocumentGone(document_id))?;
                artifacts.timeline_events.push(TimelineEvent {
                    date: created_at.format("%Y-%m-%d").to_string(),
                    event: format!("Added {}", name),
                    kind: TimelineKind::Upload,
                });

                let document = workspace.mark_processed(project_id, document_id, artifacts)?;
                tracing::info!(document_id = %document_id, "Document processed");
                Ok(document.clone())
            }
            Err(e) => {
                tracing::warn!(document_id = %document_id, error = %e, "Document processing failed");
                workspace.remove_document(project_id, document_id);
                Err(e.into())
            }
        }
    }
}
