//! In-memory projects. Nothing survives a restart.

use crate::models::{Document, DocumentKind, IntelligenceArtifacts, Project};
use service_core::acquisition::Source;
use thiserror::Error;
use uuid::Uuid;

pub const SAMPLE_PROJECTS: [&str; 2] = ["Q4 Launch Project", "API v3 Design"];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorkspaceError {
    #[error("Project name cannot be empty")]
    EmptyName,

    #[error("Project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("Document {0} is no longer part of the project")]
    DocumentGone(Uuid),
}

#[derive(Debug, Default)]
pub struct Workspace {
    projects: Vec<Project>,
    active: Option<Uuid>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample projects, with the first one active.
    pub fn with_sample_projects() -> Self {
        let mut workspace = Self::new();
        for name in SAMPLE_PROJECTS {
            workspace.projects.push(Project::new(name));
        }
        workspace.active = workspace.projects.first().map(|p| p.id);
        workspace
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn active_id(&self) -> Option<Uuid> {
        self.active
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active.and_then(|id| self.project(id).ok())
    }

    pub fn project(&self, id: Uuid) -> Result<&Project, WorkspaceError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(WorkspaceError::ProjectNotFound(id))
    }

    fn project_mut(&mut self, id: Uuid) -> Result<&mut Project, WorkspaceError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(WorkspaceError::ProjectNotFound(id))
    }

    /// Create a project from a trimmed, non-empty name and make it active.
    pub fn create_project(&mut self, name: &str) -> Result<&Project, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::EmptyName);
        }

        let project = Project::new(name);
        let id = project.id;
        self.projects.push(project);
        self.active = Some(id);
        tracing::info!(project_id = %id, name, "Project created");

        self.project(id)
    }

    pub fn select(&mut self, id: Uuid) -> Result<&Project, WorkspaceError> {
        self.project(id)?;
        self.active = Some(id);
        self.project(id)
    }

    /// Add an unprocessed document; returns its id.
    pub fn insert_pending(
        &mut self,
        project_id: Uuid,
        name: &str,
        kind: DocumentKind,
        source: Source,
    ) -> Result<Uuid, WorkspaceError> {
        let project = self.project_mut(project_id)?;
        let document = Document::pending(name, kind, source);
        let id = document.id;
        project.documents.push(document);
        Ok(id)
    }

    /// Attach artifacts to a pending document. Fails if it was removed meanwhile.
    pub fn mark_processed(
        &mut self,
        project_id: Uuid,
        document_id: Uuid,
        artifacts: IntelligenceArtifacts,
    ) -> Result<&Document, WorkspaceError> {
        let project = self.project_mut(project_id)?;
        let document = project
            .documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or(WorkspaceError::DocumentGone(document_id))?;

        document.artifacts = artifacts;
        document.processed = true;
        Ok(document)
    }

    pub fn remove_document(&mut self, project_id: Uuid, document_id: Uuid) -> bool {
        match self.project_mut(project_id) {
            Ok(project) => {
                let before = project.documents.len();
                project.documents.retain(|d| d.id != document_id);
                project.documents.len() != before
            }
            Err(_) => false,
        }
    }

    pub fn combined_artifacts(&self, project_id: Uuid) -> Result<IntelligenceArtifacts, WorkspaceError> {
        Ok(self.project(project_id)?.combined_artifacts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GlossaryTerm;
    use service_core::acquisition::from_pasted_text;

    fn source() -> Source {
        from_pasted_text(&"Meeting notes about the launch plan and its owners. ".repeat(2)).unwrap()
    }

    fn glossary(term: &str) -> IntelligenceArtifacts {
        IntelligenceArtifacts {
            glossary: vec![GlossaryTerm {
                term: term.to_string(),
                definition: "def".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn sample_workspace_activates_first_project() {
        let workspace = Workspace::with_sample_projects();
        assert_eq!(workspace.projects().len(), 2);
        assert_eq!(workspace.active_project().unwrap().name, "Q4 Launch Project");
    }

    #[test]
    fn created_project_becomes_active() {
        let mut workspace = Workspace::with_sample_projects();
        let id = workspace.create_project("  Research  ").unwrap().id;

        assert_eq!(workspace.active_id(), Some(id));
        assert_eq!(workspace.project(id).unwrap().name, "Research");
        assert_eq!(workspace.create_project("   ").unwrap_err(), WorkspaceError::EmptyName);
        assert_eq!(workspace.projects().len(), 3);
    }

    #[test]
    fn selecting_unknown_project_keeps_selection() {
        let mut workspace = Workspace::with_sample_projects();
        let before = workspace.active_id();

        let missing = Uuid::new_v4();
        assert_eq!(
            workspace.select(missing).unwrap_err(),
            WorkspaceError::ProjectNotFound(missing)
        );
        assert_eq!(workspace.active_id(), before);
    }

    #[test]
    fn combined_artifacts_skip_pending_documents_and_keep_order() {
        let mut workspace = Workspace::new();
        let project = workspace.create_project("Launch").unwrap().id;

        let first = workspace
            .insert_pending(project, "a.txt", DocumentKind::Text, source())
            .unwrap();
        let _pending = workspace
            .insert_pending(project, "b.txt", DocumentKind::Text, source())
            .unwrap();
        let third = workspace
            .insert_pending(project, "c.txt", DocumentKind::Text, source())
            .unwrap();

        workspace.mark_processed(project, third, glossary("third")).unwrap();
        workspace.mark_processed(project, first, glossary("first")).unwrap();

        let combined = workspace.combined_artifacts(project).unwrap();
        let terms: Vec<&str> = combined.glossary.iter().map(|g| g.term.as_str()).collect();
        assert_eq!(terms, vec!["first", "third"]);
    }

    #[test]
    fn removed_document_cannot_be_marked_processed() {
        let mut workspace = Workspace::new();
        let project = workspace.create_project("Launch").unwrap().id;
        let doc = workspace
            .insert_pending(project, "a.txt", DocumentKind::Text, source())
            .unwrap();

        assert!(workspace.remove_document(project, doc));
        assert!(!workspace.remove_document(project, doc));
        assert_eq!(
            workspace.mark_processed(project, doc, glossary("x")).unwrap_err(),
            WorkspaceError::DocumentGone(doc)
        );
        assert!(workspace.project(project).unwrap().documents.is_empty());
    }
}
