// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{IdentityVerifier, Principal, VerifyError};
use async_trait::async_trait;
use db_storage::users::UserId;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// HTTP client of the hosted identity provider
///
/// Tokens are verified by asking the provider for the user they belong to.
pub struct HostedVerifier {
    base_url: Url,
    api_key: String,

    client: reqwest::Client,
}

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl HostedVerifier {
    /// Create a new verifier from all required configurations
    pub fn new(
        client: reqwest::Client,
        base_url: Url,
        api_key: String,
    ) -> Result<Self, VerifyError> {
        if base_url.cannot_be_a_base() {
            return Err(VerifyError::NotBaseUrl);
        }

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// internal url builder
    fn url<I>(&self, path_segments: I) -> Result<Url, VerifyError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VerifyError::NotBaseUrl)?
            .pop_if_empty()
            .extend(path_segments);
        Ok(url)
    }
}

#[async_trait]
impl IdentityVerifier for HostedVerifier {
    #[tracing::instrument(err, skip_all)]
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        let url = self.url(["auth", "v1", "user"])?;

        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: UserResponse = response.json().await?;

                Ok(Principal {
                    id: UserId::from(user.id),
                    email: user.email,
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(VerifyError::Rejected),
            status => Err(VerifyError::UnexpectedStatus(status)),
        }
    }
}
