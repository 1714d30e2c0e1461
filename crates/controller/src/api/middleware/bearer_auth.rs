// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Handles principal authentication in API requests
use crate::api::response::{ApiError, AuthenticationError};
use crate::auth::{IdentityVerifier, Principal, VerifyError};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::Error;
use actix_web::http::header::Header;
use actix_web::web::Data;
use actix_web::{HttpMessage, ResponseError};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use core::future::ready;
use std::future::{Future, Ready};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// Middleware factory
///
/// Transforms into [`BearerAuthMiddleware`]
pub struct BearerAuth {
    pub verifier: Data<dyn IdentityVerifier>,
}

impl<S> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Transform = BearerAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// Authentication middleware
///
/// Whenever an API request is received, the BearerAuthMiddleware hands the bearer token to the
/// configured [`IdentityVerifier`] and provides the resulting [`Principal`] as
/// [`ReqData`](actix_web::web::ReqData) for the subsequent services.
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Data<dyn IdentityVerifier>,
}

type ResultFuture<O, E> = Pin<Box<dyn Future<Output = Result<O, E>>>>;

impl<S> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Future = ResultFuture<Self::Response, Self::Error>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let verifier = self.verifier.clone();

        let token = match Authorization::<Bearer>::parse(&req) {
            Ok(auth) => auth.into_scheme().token().trim().to_owned(),
            Err(e) => {
                log::debug!("Unable to parse bearer token, {}", e);
                String::new()
            }
        };

        if token.is_empty() {
            let error = ApiError::unauthorized()
                .with_message("Missing or malformed bearer token")
                .with_www_authenticate(AuthenticationError::MissingBearerToken);
            let response = req.into_response(error.error_response());
            return Box::pin(ready(Ok(response)));
        }

        Box::pin(async move {
            let principal = match check_access_token(verifier.get_ref(), &token).await {
                Ok(principal) => principal,
                Err(error) => return Ok(req.into_response(error.error_response())),
            };

            req.extensions_mut().insert(principal);
            service.call(req).await
        })
    }
}

/// Resolve `token` into a [`Principal`] or the 401 response for it
pub async fn check_access_token(
    verifier: &dyn IdentityVerifier,
    token: &str,
) -> Result<Principal, ApiError> {
    match verifier.verify(token).await {
        Ok(principal) => Ok(principal),
        Err(VerifyError::Rejected) => {
            log::debug!("Identity provider rejected the access token");
            Err(ApiError::unauthorized()
                .with_message("The provided access token is invalid")
                .with_www_authenticate(AuthenticationError::InvalidAccessToken))
        }
        Err(e) => {
            log::error!("Unable to verify access token, {}", e);
            Err(ApiError::unauthorized()
                .with_message("The access token could not be verified")
                .with_www_authenticate(AuthenticationError::VerificationFailed))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::StaticVerifier;
    use actix_web::http::StatusCode;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl IdentityVerifier for Unreachable {
        async fn verify(&self, _token: &str) -> Result<Principal, VerifyError> {
            Err(VerifyError::NotBaseUrl)
        }
    }

    #[tokio::test]
    async fn token_resolves_into_principal() {
        let verifier = StaticVerifier::default();

        let principal = check_access_token(&verifier, "anything").await.unwrap();

        assert_eq!(principal.id.inner(), "mock-user-id");
    }

    #[tokio::test]
    async fn verifier_failure_is_unauthorized() {
        let error = check_access_token(&Unreachable, "token").await.unwrap_err();

        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }
}
