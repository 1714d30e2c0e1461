// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use arc_swap::ArcSwap;
use async_trait::async_trait;
use db_storage::users::UserId;
use meetbase_controller_core::api::ApiServices;
use meetbase_controller_core::auth::{IdentityVerifier, Principal, VerifyError};
use meetbase_controller_core::resources::ResourceService;
use meetbase_controller_core::settings::Settings;
use meetbase_controller_core::store::MemoryStore;
use meetbase_controller_core::suggestions::MockEngine;
use std::sync::Arc;

/// Verifier which uses the bearer token as the id of the principal
///
/// The token `rejected` is refused.
pub struct TokenIsUserId;

#[async_trait]
impl IdentityVerifier for TokenIsUserId {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        if token == "rejected" {
            return Err(VerifyError::Rejected);
        }

        Ok(Principal {
            id: UserId::from(token.to_owned()),
            email: Some(format!("{token}@example.org")),
        })
    }
}

/// Endpoint collaborators backed by the in-memory store
pub fn services(config: &str) -> ApiServices {
    let settings = Settings::from_toml(config).expect("valid test config");
    let settings = Arc::new(ArcSwap::from_pointee(settings));

    let resources = ResourceService::new(Arc::new(MemoryStore::new()), settings);

    ApiServices::new(resources, Arc::new(TokenIsUserId), Arc::new(MockEngine))
}

pub fn bearer(user: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {user}"))
}
