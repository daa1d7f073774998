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

//! Response types for the admin API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ResourceDefinition;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status of the server
    pub status: String,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// One resource definition with its hypermedia links.
#[derive(Serialize, ToSchema)]
pub struct ResourceListItem {
    #[serde(flatten)]
    pub definition: ResourceDefinition,
    pub links: ResourceLinks,
}

/// Hypermedia links for a resource definition.
#[derive(Serialize, ToSchema)]
pub struct ResourceLinks {
    /// Link to this definition in the admin API.
    #[serde(rename = "self")]
    pub self_link: String,
    /// Link to the live public endpoint, for trying the resource out.
    pub endpoint: String,
}

/// One view with its displays, for building resource definitions.
#[derive(Serialize, ToSchema)]
pub struct ViewListItem {
    pub id: String,
    pub label: String,
    pub displays: Vec<DisplayListItem>,
}

#[derive(Serialize, ToSchema)]
pub struct DisplayListItem {
    pub id: String,
    pub title: String,
}

/// Generic API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data if successful
    pub data: Option<T>,
    /// Error message if unsuccessful
    pub error: Option<String>,
}

/// Generic API Response schema for OpenAPI documentation
#[derive(Serialize, ToSchema)]
#[schema(as = ApiResponse)]
pub struct ApiResponseSchema {
    /// Whether the request was successful
    pub success: bool,
    /// Response data if successful
    pub data: Option<serde_json::Value>,
    /// Error message if unsuccessful
    pub error: Option<String>,
}

/// Simple status message response
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    /// Status message
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
