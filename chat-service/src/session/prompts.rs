//! Fixed instructions and response schemas for the two calls a session makes.

use crate::models::Turn;
use serde_json::{Value, json};
use service_core::acquisition::{Source, SourceContent};
use service_core::genai::{GenerationParams, GenerationRequest, Message, Part, Role};

pub const ANALYSIS_INSTRUCTION: &str = "You are an expert content analyst. For the content you are given:
1. Read all of it carefully.
2. Write a concise, neutral summary of its main purpose and key information.
3. Propose 4-6 varied, insightful questions a curious reader might ask next. Every question must be answerable from the content itself.
Respond with one valid JSON object with exactly two keys: \"summary\" (string) and \"suggestedQuestions\" (array of strings).";

const CHAT_INSTRUCTION_HEADER: &str = "You are a helpful assistant that answers questions about one specific piece of content, using ONLY that content.
- Base every answer exclusively on the content below. Never use outside knowledge.
- Keep each answer to a single concise sentence.
- After each answer, suggest 2-3 follow-up questions that can also be answered from the content.
- If the answer is not in the content, say politely that the content does not cover it.
- Respond with one valid JSON object with exactly two keys: \"answer\" (string) and \"followUpQuestions\" (array of strings).";

pub fn analysis_schema() -> Value {
    string_and_list_schema("summary", "suggestedQuestions")
}

pub fn chat_schema() -> Value {
    string_and_list_schema("answer", "followUpQuestions")
}

fn string_and_list_schema(text_key: &str, list_key: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            text_key: { "type": "STRING" },
            list_key: { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": [text_key, list_key]
    })
}

/// Chat instruction with the source text embedded between rule lines.
pub fn chat_instruction(source: &Source) -> String {
    let body = match source.content() {
        SourceContent::Text(text) => text.as_str(),
        SourceContent::Image { .. } => "(the content is the image attached to the first message)",
    };
    format!(
        "{}\n\nHere is the content you will answer questions about:\n---\n{}\n---\n",
        CHAT_INSTRUCTION_HEADER, body
    )
}

/// The single request issued by an analysis.
pub fn analysis_request(source: &Source) -> GenerationRequest {
    let message = match source.content() {
        SourceContent::Text(text) => Message::user_text(format!("Here is the content:\n\n{}", text)),
        SourceContent::Image { mime_type, data } => Message {
            role: Role::User,
            parts: vec![
                Part::text("Here is the content:"),
                Part::InlineData {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                },
            ],
        },
    };

    GenerationRequest {
        system_instruction: Some(ANALYSIS_INSTRUCTION.to_string()),
        contents: vec![message],
        params: GenerationParams {
            output_schema: Some(analysis_schema()),
            ..Default::default()
        },
    }
}

/// A chat request carrying the whole transcript.
pub fn chat_request(source: &Source, transcript: &[Turn]) -> GenerationRequest {
    let mut contents: Vec<Message> = transcript.iter().map(Message::from).collect();

    if let (SourceContent::Image { mime_type, data }, Some(first)) =
        (source.content(), contents.first_mut())
    {
        first.parts.insert(
            0,
            Part::InlineData {
                mime_type: mime_type.clone(),
                data: data.clone(),
            },
        );
    }

    GenerationRequest {
        system_instruction: Some(chat_instruction(source)),
        contents,
        params: GenerationParams {
            output_schema: Some(chat_schema()),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_core::acquisition::{AcquisitionMode, from_pasted_text};

    #[test]
    fn schemas_require_both_keys() {
        let schema = chat_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["followUpQuestions"]["items"]["type"], "STRING");
        assert_eq!(schema["required"], json!(["answer", "followUpQuestions"]));

        assert_eq!(analysis_schema()["required"], json!(["summary", "suggestedQuestions"]));
    }

    #[test]
    fn analysis_request_sends_full_content() {
        let text = "The quarterly report covers revenue, hiring and the roadmap for next year.";
        let source = from_pasted_text(text).unwrap();
        let request = analysis_request(&source);

        assert_eq!(request.contents.len(), 1);
        assert_eq!(
            request.contents[0].parts[0],
            Part::text(format!("Here is the content:\n\n{}", text))
        );
        assert!(request.params.output_schema.is_some());
    }

    #[test]
    fn chat_request_embeds_source_and_replays_transcript() {
        let source = from_pasted_text(&"Rust has no garbage collector. ".repeat(3)).unwrap();
        let transcript = vec![
            Turn::user("Does Rust have a GC?"),
            Turn::model("No, it does not."),
            Turn::user("Why not?"),
        ];
        let request = chat_request(&source, &transcript);

        let instruction = request.system_instruction.unwrap();
        assert!(instruction.contains("---\nRust has no garbage collector."));
        let roles: Vec<Role> = request.contents.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model, Role::User]);
    }

    #[test]
    fn image_sources_travel_as_inline_data() {
        let source = Source::new(
            SourceContent::Image {
                mime_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            },
            "diagram.png",
            AcquisitionMode::Image,
        );

        let request = analysis_request(&source);
        assert!(matches!(
            &request.contents[0].parts[1],
            Part::InlineData { mime_type, .. } if mime_type == "image/png"
        ));

        let chat = chat_request(&source, &[Turn::user("What is shown?")]);
        assert!(matches!(chat.contents[0].parts[0], Part::InlineData { .. }));
    }
}
