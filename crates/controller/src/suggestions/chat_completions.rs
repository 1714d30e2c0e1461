// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{ChatMessage, Suggestion, SuggestionEngine, SuggestionError};
use crate::settings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Client of an OpenAI compatible `chat/completions` API
pub struct ChatCompletionsEngine {
    base_url: Url,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,

    client: reqwest::Client,
}

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ResponseBody {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

impl ChatCompletionsEngine {
    pub fn new(
        client: reqwest::Client,
        settings: &settings::Suggestions,
    ) -> Result<Self, SuggestionError> {
        if settings.base_url.cannot_be_a_base() {
            return Err(SuggestionError::NotBaseUrl);
        }

        Ok(Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            client,
        })
    }

    fn completions_url(&self) -> Result<Url, SuggestionError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SuggestionError::NotBaseUrl)?
            .pop_if_empty()
            .extend(["chat", "completions"]);
        Ok(url)
    }
}

#[async_trait]
impl SuggestionEngine for ChatCompletionsEngine {
    #[tracing::instrument(err, skip_all, fields(model = %self.model))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Suggestion, SuggestionError> {
        let response = self
            .client
            .post(self.completions_url()?)
            .bearer_auth(&self.api_key)
            .json(&RequestBody {
                model: &self.model,
                messages: &messages,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::UnexpectedStatus { status, body });
        }

        let response: ResponseBody = response.json().await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(SuggestionError::EmptyResponse)?;

        Ok(Suggestion {
            suggestion: choice.message.content,
            model: self.model.clone(),
        })
    }
}
