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

//! OpenAPI documentation for the admin API.

use utoipa::OpenApi;

use super::error::ErrorResponse;
use super::handlers;
use super::responses::{
    ApiResponseSchema, DisplayListItem, HealthResponse, ResourceLinks, ResourceListItem,
    StatusResponse, ViewListItem,
};
use crate::config::{ModuleSettings, ResourceDefinition};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::list_resources,
        handlers::get_resource,
        handlers::create_resource,
        handlers::update_resource,
        handlers::delete_resource,
        handlers::get_settings,
        handlers::update_settings,
        handlers::list_views,
    ),
    components(schemas(
        ApiResponseSchema,
        DisplayListItem,
        ErrorResponse,
        HealthResponse,
        ModuleSettings,
        ResourceDefinition,
        ResourceLinks,
        ResourceListItem,
        StatusResponse,
        ViewListItem,
    )),
    tags(
        (name = "Health", description = "Operational endpoints"),
        (name = "Resources", description = "Resource definition management"),
        (name = "Settings", description = "Module settings"),
        (name = "Views", description = "View inventory"),
    ),
    info(
        title = "Views JSON:API Server Admin API",
        description = "Management API for resource definitions and module settings",
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("OpenAPI document must serialize");
        assert!(json.contains("/api/v1/resources"));
        assert!(json.contains("/api/v1/settings"));
        assert!(json.contains("/health"));
    }
}
