//! Domain models for the chat service.

pub mod analysis;
pub mod transcript;

pub use analysis::{Analysis, ChatReply};
pub use transcript::Turn;
