pub mod artifacts;
pub mod projects;

pub use artifacts::{ArtifactsResponse, TabResponse};
pub use projects::{
    AddTextRequest, AddUrlRequest, CreateProjectRequest, DocumentView, ProjectListResponse,
    ProjectSummary, ProjectView, SelectProjectRequest,
};
