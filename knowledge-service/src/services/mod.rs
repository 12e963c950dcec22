pub mod extraction;
pub mod processor;
pub mod workspace;

pub use processor::{DocumentProcessor, ProcessingError};
pub use workspace::{Workspace, WorkspaceError};
