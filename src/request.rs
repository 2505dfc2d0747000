//! Request body for POST /chat/completions

use serde::Serialize;

use crate::constants::MODALITIES;

/// Chat completion request asking for image output.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    /// Model identifier, eg `openai/gpt-5-image-mini`
    pub model: &'a str,
    /// Requested output types, always `["image", "text"]`
    pub modalities: [&'static str; 2],
    /// A single user message carrying the prompt
    pub messages: [ChatMessage<'a>; 1],
}

/// One message in the conversation.
#[derive(Serialize, Debug)]
pub struct ChatMessage<'a> {
    /// Always `user`
    pub role: &'static str,
    /// The prompt text
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Builds the request for a single prompt.
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            modalities: MODALITIES,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_expected_shape() {
        let body = serde_json::to_value(ChatRequest::new("openai/gpt-5-image", "a red fox"))
            .expect("serialize request");
        assert_eq!(
            body,
            json!({
                "model": "openai/gpt-5-image",
                "modalities": ["image", "text"],
                "messages": [{"role": "user", "content": "a red fox"}]
            })
        );
    }
}
