// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Response types for the REST API
//!
//! These all implement the [`Responder`](actix_web::Responder) trait.

mod error;
mod ok;

pub use error::{json_error_handler, path_error_handler, ApiError, AuthenticationError};
pub use ok::ApiResponse;

pub const CODE_INVALID_EMAIL: &str = "invalid_email";
pub const CODE_INVALID_LENGTH: &str = "invalid_length";
pub const CODE_INVALID_URL: &str = "invalid_url";
pub const CODE_INVALID_VALUE: &str = "invalid_value";
pub const CODE_MISSING_VALUE: &str = "missing_value";
pub const CODE_OUT_OF_RANGE: &str = "out_of_range";
pub const CODE_VALUE_REQUIRED: &str = "value_required";
