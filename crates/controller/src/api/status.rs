// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::response::ApiResponse;
use actix_web::get;
use serde::Serialize;

const SERVICE_NAME: &str = "MeetBase API";

#[derive(Debug, Serialize)]
pub struct Root {
    message: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    service: &'static str,
}

/// API Endpoint *GET /*
#[get("/")]
pub async fn root() -> ApiResponse<Root> {
    ApiResponse::new(Root {
        message: SERVICE_NAME,
        status: "running",
    })
}

/// API Endpoint *GET /health*
#[get("/health")]
pub async fn health() -> ApiResponse<Health> {
    ApiResponse::new(Health {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
