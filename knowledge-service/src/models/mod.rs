//! Domain models for the knowledge service.

pub mod artifacts;
pub mod project;

pub use artifacts::{
    ActionItem, ArtifactTab, Decision, GlossaryTerm, IntelligenceArtifacts, PersonProfile, QaPair,
    Reference, TabContent, TimelineEvent, TimelineKind,
};
pub use project::{Document, DocumentKind, Project};
