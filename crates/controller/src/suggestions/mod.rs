// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Free text suggestions for event names, descriptions and messaging
//!
//! Requests are passed through to a [`SuggestionEngine`] without retries or caching.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

mod chat_completions;
mod mock;

pub use chat_completions::ChatCompletionsEngine;
pub use mock::MockEngine;

const SYSTEM_PREAMBLE: &str = "You are an AI assistant for an event planning application. \
Help users create professional event names, descriptions, and messaging. \
Provide concise, actionable suggestions that are professional and engaging.";

const DEFAULT_CONTEXT: &str = "General event planning";

/// Body of `POST /ai/suggest`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SuggestionRequest {
    #[validate(length(min = 1))]
    pub prompt: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub suggestion: String,
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("inference request failed, {0}")]
    Request(#[from] reqwest::Error),
    #[error("inference API responded with status {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("inference API returned no choices")]
    EmptyResponse,
    #[error("inference API url is not a base url")]
    NotBaseUrl,
}

#[async_trait]
pub trait SuggestionEngine: Send + Sync {
    /// Complete the conversation in `messages`
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Suggestion, SuggestionError>;
}

/// Build the conversation sent to the engine
///
/// An empty or missing context falls back to general event planning.
pub fn build_messages(prompt: &str, context: Option<&str>) -> Vec<ChatMessage> {
    let context = context
        .filter(|context| !context.is_empty())
        .unwrap_or(DEFAULT_CONTEXT);

    let user_prompt = format!(
        "Context: {context}\n\
         Request: {prompt}\n\
         \n\
         Please provide 3 professional suggestions that are:\n\
         - Concise and clear\n\
         - Professional in tone\n\
         - Engaging for attendees\n\
         - Appropriate for the context"
    );

    vec![
        ChatMessage {
            role: Role::System,
            content: SYSTEM_PREAMBLE.into(),
        },
        ChatMessage {
            role: Role::User,
            content: user_prompt,
        },
    ]
}

/// Validate `request` and ask `engine` for suggestions
#[tracing::instrument(err, skip_all)]
pub async fn suggest(
    engine: &dyn SuggestionEngine,
    request: SuggestionRequest,
) -> Result<Suggestion, SuggestRequestError> {
    request.validate()?;

    let messages = build_messages(&request.prompt, request.context.as_deref());

    Ok(engine.complete(messages).await?)
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestRequestError {
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Engine(#[from] SuggestionError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn user_message_embeds_context_and_prompt() {
        let messages = build_messages("Name my launch party", Some("Product launch"));

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0]
            .content
            .starts_with("You are an AI assistant for an event planning application."));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Context: Product launch\n\
             Request: Name my launch party\n\
             \n\
             Please provide 3 professional suggestions that are:\n\
             - Concise and clear\n\
             - Professional in tone\n\
             - Engaging for attendees\n\
             - Appropriate for the context"
        );
    }

    #[test]
    fn missing_or_empty_context_falls_back() {
        for context in [None, Some("")] {
            let messages = build_messages("Anything", context);

            assert!(messages[1]
                .content
                .starts_with("Context: General event planning\nRequest: Anything\n"));
        }
    }

    #[test]
    fn roles_serialize_lowercase() {
        test_util::assert_eq_json!(
            ChatMessage {
                role: Role::System,
                content: "hi".into(),
            },
            {
                "role": "system",
                "content": "hi"
            }
        );
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected() {
        let engine = MockEngine::default();

        let result = suggest(
            &engine,
            SuggestionRequest {
                prompt: "".into(),
                context: None,
            },
        )
        .await;

        assert!(matches!(result, Err(SuggestRequestError::Validation(_))));
    }
}
