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

//! Admin REST API.
//!
//! This is the operator surface for managing resource definitions and module
//! settings. Endpoints are prefixed with `/api/v1/`:
//!
//! ```text
//! /health                      - Health check (unversioned)
//! /api/v1/resources            - Resource definition CRUD
//! /api/v1/resources/{id}
//! /api/v1/settings             - Module settings
//! /api/v1/views                - View/display inventory
//! ```
//!
//! The public `/jsonapi/` endpoints are served elsewhere; see the
//! `endpoint` module.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;

pub use error::{error_codes, ErrorResponse};
pub use handlers::health_check;
pub use openapi::ApiDoc;
pub use responses::*;
pub use routes::build_admin_router;
