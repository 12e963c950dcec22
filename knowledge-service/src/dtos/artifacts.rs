use crate::models::{ArtifactTab, IntelligenceArtifacts, TabContent};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ArtifactsResponse {
    pub project_id: Uuid,
    pub processed_documents: usize,
    pub artifacts: IntelligenceArtifacts,
}

#[derive(Debug, Serialize)]
pub struct TabResponse<'a> {
    pub project_id: Uuid,
    pub tab: ArtifactTab,
    pub label: &'static str,
    pub count: usize,
    pub items: TabContent<'a>,
}
