pub mod session;

pub use session::{AnalyzeTextRequest, AnalyzeUrlRequest, AskRequest, AskResponse, SessionView, SourceView};
