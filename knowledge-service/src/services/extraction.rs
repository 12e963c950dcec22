//! Instruction and response schema for turning one document into artifacts.

use serde_json::{Value, json};
use service_core::acquisition::{Source, SourceContent};
use service_core::genai::{GenerationParams, GenerationRequest, Message, Part, Role};

pub const EXTRACTION_INSTRUCTION: &str = "You are a knowledge analyst building an organizational memory from project documents.
From the document you are given, extract:
- decisions: each decision made, its date (or \"Unknown\") and the surrounding context;
- actionItems: each task with its assignee (\"Unassigned\" if nobody is named) and due date (\"N/A\" if none is given);
- timelineEvents: dated events, each typed as one of decision, milestone or meeting;
- people: each person mentioned, their areas of expertise and how many times they are mentioned;
- glossary: domain terms, acronyms and jargon with a short definition;
- qaPairs: questions the document answers, with their answers;
- references: links or external resources cited, with a short description.
Only use information present in the document. Return an empty list for any category with nothing to report.";

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn list_of(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": required
        }
    })
}

pub fn artifacts_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "decisions": list_of(
                json!({ "decision": string(), "date": string(), "context": string() }),
                &["decision", "date", "context"],
            ),
            "actionItems": list_of(
                json!({ "task": string(), "assignee": string(), "dueDate": string() }),
                &["task", "assignee", "dueDate"],
            ),
            "timelineEvents": list_of(
                json!({
                    "date": string(),
                    "event": string(),
                    "type": { "type": "STRING", "enum": ["decision", "milestone", "meeting"] }
                }),
                &["date", "event", "type"],
            ),
            "people": list_of(
                json!({
                    "name": string(),
                    "expertise": { "type": "ARRAY", "items": string() },
                    "mentionedIn": { "type": "INTEGER" }
                }),
                &["name", "expertise", "mentionedIn"],
            ),
            "glossary": list_of(
                json!({ "term": string(), "definition": string() }),
                &["term", "definition"],
            ),
            "qaPairs": list_of(
                json!({ "question": string(), "answer": string() }),
                &["question", "answer"],
            ),
            "references": list_of(
                json!({ "url": string(), "description": string() }),
                &["url", "description"],
            )
        },
        "required": [
            "decisions", "actionItems", "timelineEvents", "people",
            "glossary", "qaPairs", "references"
        ]
    })
}

/// One extraction call for `source`, labelled with the document name.
pub fn extraction_request(document_name: &str, source: &Source, model: &str) -> GenerationRequest {
    let header = format!("Document name: {}", document_name);
    let parts = match source.content() {
        SourceContent::Text(text) => vec![Part::text(format!("{}\n\n{}", header, text))],
        SourceContent::Image { mime_type, data } => vec![
            Part::text(header),
            Part::InlineData {
                mime_type: mime_type.clone(),
                data: data.clone(),
            },
        ],
    };

    GenerationRequest {
        system_instruction: Some(EXTRACTION_INSTRUCTION.to_string()),
        contents: vec![Message {
            role: Role::User,
            parts,
        }],
        params: GenerationParams {
            model: Some(model.to_string()),
            output_schema: Some(artifacts_schema()),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_core::acquisition::{from_image, from_pasted_text};

    #[test]
    fn schema_requires_every_category() {
        let schema = artifacts_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 7);
        assert_eq!(
            schema["properties"]["timelineEvents"]["items"]["properties"]["type"]["enum"],
            json!(["decision", "milestone", "meeting"])
        );
        assert_eq!(schema["properties"]["people"]["items"]["properties"]["mentionedIn"]["type"], "INTEGER");
    }

    #[test]
    fn text_documents_are_sent_inline_with_their_name() {
        let source = from_pasted_text(&"The launch moves to October after the board review. ".repeat(2)).unwrap();
        let request = extraction_request("notes.txt", &source, "extraction-model");

        let Part::Text(text) = &request.contents[0].parts[0] else {
            panic!("expected a text part");
        };
        assert!(text.starts_with("Document name: notes.txt\n\nThe launch moves"));
        assert_eq!(request.params.model.as_deref(), Some("extraction-model"));
    }

    #[test]
    fn images_are_sent_as_inline_data() {
        let source = from_image("whiteboard.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]).unwrap();
        let request = extraction_request("whiteboard.jpg", &source, "m");

        assert_eq!(request.contents[0].parts.len(), 2);
        assert_eq!(
            request.contents[0].parts[1],
            Part::InlineData {
                mime_type: "image/jpeg".to_string(),
                data: vec![0xFF, 0xD8, 0xFF],
            }
        );
    }
}
