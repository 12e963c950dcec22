use serde::{Deserialize, Serialize};

/// Result of the initial analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Concise, neutral summary of the source.
    pub summary: String,

    /// Questions answerable from the source.
    pub suggested_questions: Vec<String>,
}

/// One answer from the chat call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub answer: String,
    pub follow_up_questions: Vec<String>,
}
