use super::IntelligenceArtifacts;
use chrono::{DateTime, Utc};
use serde::Serialize;
use service_core::acquisition::Source;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Image,
    Url,
}

/// A document added to a project. Artifacts stay empty until `processed`.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub kind: DocumentKind,
    pub source: Source,
    pub artifacts: IntelligenceArtifacts,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn pending(name: impl Into<String>, kind: DocumentKind, source: Source) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            source,
            artifacts: IntelligenceArtifacts::default(),
            processed: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Oldest first, in the order they were added.
    pub documents: Vec<Document>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub fn document(&self, id: Uuid) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Artifacts of processed documents, concatenated in document order.
    pub fn combined_artifacts(&self) -> IntelligenceArtifacts {
        self.documents
            .iter()
            .filter(|d| d.processed)
            .fold(IntelligenceArtifacts::default(), |mut acc, doc| {
                acc.extend_from(&doc.artifacts);
                acc
            })
    }
}
