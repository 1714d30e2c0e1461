// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! REST API of the controller
//!
//! `/`, `/health` and `/ai/suggest` are public, every other endpoint requires a bearer token
//! which is resolved into a [`Principal`](crate::auth::Principal) by the
//! [`BearerAuth`](middleware::bearer_auth::BearerAuth) middleware.
use crate::auth::IdentityVerifier;
use crate::resources::ResourceService;
use crate::suggestions::SuggestionEngine;
use actix_web::web::{self, Data};
use std::sync::Arc;

pub mod events;
pub mod guests;
pub mod middleware;
pub mod response;
pub mod status;
pub mod suggestions;

/// Collaborators shared by all endpoints
#[derive(Clone)]
pub struct ApiServices {
    pub resources: Data<ResourceService>,
    pub verifier: Data<dyn IdentityVerifier>,
    pub suggestions: Data<dyn SuggestionEngine>,
}

impl ApiServices {
    pub fn new(
        resources: ResourceService,
        verifier: Arc<dyn IdentityVerifier>,
        suggestions: Arc<dyn SuggestionEngine>,
    ) -> Self {
        Self {
            resources: Data::new(resources),
            verifier: Data::from(verifier),
            suggestions: Data::from(suggestions),
        }
    }

    /// Register all endpoints and their app data
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().error_handler(response::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(response::path_error_handler))
            .app_data(self.resources.clone())
            .app_data(self.suggestions.clone())
            .service(status::root)
            .service(status::health)
            .service(suggestions::suggest)
            .service(
                // empty scope to differentiate between auth endpoints
                web::scope("")
                    .wrap(middleware::bearer_auth::BearerAuth {
                        verifier: self.verifier.clone(),
                    })
                    .service(events::get_all)
                    .service(events::new)
                    .service(events::get)
                    .service(events::patch)
                    .service(events::delete)
                    .service(guests::get_all)
                    .service(guests::new),
            );
    }
}
