// Copyright 2025 The Views JSON:API Server Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the admin API.

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::registry::RegistryError;

/// Error codes for API responses
pub mod error_codes {
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const RESOURCE_CREATE_FAILED: &str = "RESOURCE_CREATE_FAILED";
    pub const RESOURCE_UPDATE_FAILED: &str = "RESOURCE_UPDATE_FAILED";
    pub const RESOURCE_DELETE_FAILED: &str = "RESOURCE_DELETE_FAILED";

    pub const CONFIG_READ_ONLY: &str = "CONFIG_READ_ONLY";
    pub const DUPLICATE_RESOURCE: &str = "DUPLICATE_RESOURCE";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// API error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Pair the response with its HTTP status code.
    pub fn with_status(self) -> (StatusCode, axum::Json<Self>) {
        let status = status_from_code(&self.code);
        (status, axum::Json(self))
    }
}

/// Convert an error code to an HTTP status code
fn status_from_code(code: &str) -> StatusCode {
    match code {
        error_codes::RESOURCE_NOT_FOUND => StatusCode::NOT_FOUND,
        error_codes::CONFIG_READ_ONLY | error_codes::DUPLICATE_RESOURCE => StatusCode::CONFLICT,
        error_codes::INVALID_REQUEST => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<RegistryError> for ErrorResponse {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::DuplicateId(_) | RegistryError::DuplicatePath { .. } => {
                ErrorResponse::new(error_codes::DUPLICATE_RESOURCE, err.to_string())
            }
            RegistryError::NotFound(_) => {
                ErrorResponse::new(error_codes::RESOURCE_NOT_FOUND, err.to_string())
            }
        }
    }
}
