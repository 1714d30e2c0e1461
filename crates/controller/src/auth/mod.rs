// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Identity verification of bearer tokens
//!
//! The controller never validates tokens itself, it hands them to an [`IdentityVerifier`]
//! which resolves them into a [`Principal`].
use async_trait::async_trait;
use db_storage::users::UserId;
use serde::Serialize;

mod hosted;
mod static_verifier;

pub use hosted::HostedVerifier;
pub use static_verifier::StaticVerifier;

/// The authenticated identity of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: UserId,
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The identity provider does not accept the token
    #[error("the access token was rejected by the identity provider")]
    Rejected,
    #[error("identity provider request failed, {0}")]
    Request(#[from] reqwest::Error),
    #[error("identity provider responded with unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    #[error("identity provider url is not a base url")]
    NotBaseUrl,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve a bearer token into the principal it was issued to
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError>;
}
