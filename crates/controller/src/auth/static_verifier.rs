// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{IdentityVerifier, Principal, VerifyError};
use async_trait::async_trait;
use db_storage::users::UserId;

/// Development verifier which maps every non-empty token to the same principal
#[derive(Debug, Clone)]
pub struct StaticVerifier {
    principal: Principal,
}

impl StaticVerifier {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }
}

impl Default for StaticVerifier {
    fn default() -> Self {
        Self::new(Principal {
            id: UserId::from("mock-user-id".to_owned()),
            email: Some("mock@example.com".into()),
        })
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        if token.trim().is_empty() {
            return Err(VerifyError::Rejected);
        }

        Ok(self.principal.clone())
    }
}
