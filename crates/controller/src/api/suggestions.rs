// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::response::{ApiError, ApiResponse};
use crate::suggestions::{self, Suggestion, SuggestionEngine, SuggestionRequest};
use actix_web::post;
use actix_web::web::{Data, Json};

/// API Endpoint *POST /ai/suggest*
///
/// Asks the configured [`SuggestionEngine`] for event suggestions. Does not require authentication.
#[post("/ai/suggest")]
pub async fn suggest(
    engine: Data<dyn SuggestionEngine>,
    body: Json<SuggestionRequest>,
) -> Result<ApiResponse<Suggestion>, ApiError> {
    let suggestion = suggestions::suggest(engine.get_ref(), body.into_inner()).await?;

    Ok(ApiResponse::new(suggestion))
}
