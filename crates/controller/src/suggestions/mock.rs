// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{ChatMessage, Suggestion, SuggestionEngine, SuggestionError};
use async_trait::async_trait;
use rand::seq::SliceRandom;

const MOCK_MODEL: &str = "mock-ai-model";

const MOCK_SUGGESTIONS: &[&str] = &[
    "Professional networking event",
    "Team building workshop",
    "Business conference",
    "Product launch celebration",
    "Client appreciation dinner",
];

/// Development engine answering with three random picks of a fixed list
#[derive(Debug, Default, Clone)]
pub struct MockEngine;

#[async_trait]
impl SuggestionEngine for MockEngine {
    async fn complete(&self, _messages: Vec<ChatMessage>) -> Result<Suggestion, SuggestionError> {
        let mut rng = rand::thread_rng();

        let picks: Vec<&str> = (0..3)
            .filter_map(|_| MOCK_SUGGESTIONS.choose(&mut rng).copied())
            .collect();

        let mut suggestion = String::from("Here are some suggestions for your event:");
        for (i, pick) in picks.iter().enumerate() {
            suggestion.push_str(&format!("\n{}. {}", i + 1, pick));
        }

        Ok(Suggestion {
            suggestion,
            model: MOCK_MODEL.into(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn three_numbered_picks() {
        let suggestion = MockEngine.complete(vec![]).await.unwrap();

        assert_eq!(suggestion.model, "mock-ai-model");

        let mut lines = suggestion.suggestion.lines();
        assert_eq!(
            lines.next(),
            Some("Here are some suggestions for your event:")
        );

        for (i, line) in lines.enumerate() {
            let pick = line
                .strip_prefix(&format!("{}. ", i + 1))
                .expect("numbered line");
            assert!(MOCK_SUGGESTIONS.contains(&pick));
        }
        assert_eq!(suggestion.suggestion.lines().count(), 4);
    }
}
