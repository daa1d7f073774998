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

//! Admin API handler functions with OpenAPI documentation.
//!
//! Mutating handlers regenerate the projected route table before returning,
//! so endpoints never drift from their definitions, and persist the
//! configuration when persistence is enabled (failures there are logged and
//! non-fatal).

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use log::{info, warn};
use tokio::sync::RwLock;

use super::error::{error_codes, ErrorResponse};
use super::responses::{
    ApiResponse, DisplayListItem, HealthResponse, ResourceLinks, ResourceListItem, StatusResponse,
    ViewListItem,
};
use crate::config::{ModuleSettings, ResourceDefinition};
use crate::config::validation::is_machine_name;
use crate::persistence::ConfigPersistence;
use crate::registry::ResourceRegistry;
use crate::route_table::{RouteTable, ROUTE_PREFIX};
use crate::views::ViewStore;

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn resource_links(definition: &ResourceDefinition) -> ResourceLinks {
    ResourceLinks {
        self_link: format!("/api/v1/resources/{}", definition.id),
        endpoint: format!("{ROUTE_PREFIX}{}", definition.normalized_path()),
    }
}

/// Re-project the route table from the current resource set.
async fn rebuild_routes(registry: &ResourceRegistry, route_table: &RwLock<RouteTable>) {
    let resources = registry.load_all().await;
    let mut table = route_table.write().await;
    *table = RouteTable::project(&resources);
}

/// Persist configuration after a successful mutation. Persistence failures
/// are logged but do not fail the request.
async fn persist_after_operation(
    config_persistence: &Option<Arc<ConfigPersistence>>,
    operation: &str,
) {
    if let Some(persistence) = config_persistence {
        if let Err(e) = persistence.save().await {
            log::error!("Failed to persist configuration after {operation}: {e}");
        }
    }
}

fn read_only_error() -> HandlerError {
    ErrorResponse::new(
        error_codes::CONFIG_READ_ONLY,
        "Server is in read-only mode. The config file is not writable.",
    )
    .with_status()
}

/// Validate a definition before it reaches the registry.
fn validate_definition(definition: &ResourceDefinition) -> Result<(), HandlerError> {
    if !is_machine_name(&definition.id) {
        return Err(ErrorResponse::new(
            error_codes::INVALID_REQUEST,
            format!(
                "'{}' is not a valid machine name (lowercase letters, digits, underscores)",
                definition.id
            ),
        )
        .with_status());
    }
    if definition.normalized_path().is_empty() {
        return Err(ErrorResponse::new(
            error_codes::INVALID_REQUEST,
            "Resource path must not be empty",
        )
        .with_status());
    }
    if definition.label.trim().is_empty() {
        return Err(ErrorResponse::new(
            error_codes::INVALID_REQUEST,
            "Resource label must not be empty",
        )
        .with_status());
    }
    Ok(())
}

/// Warn about references the request path would answer 404 for.
async fn warn_on_broken_reference(views: &ViewStore, definition: &ResourceDefinition) {
    match views.load(&definition.view_id).await {
        None => warn!(
            "Resource '{}' references unknown view '{}'",
            definition.id, definition.view_id
        ),
        Some(view) if view.display(&definition.display_id).is_none() => warn!(
            "Resource '{}' references unknown display '{}' on view '{}'",
            definition.id, definition.display_id, definition.view_id
        ),
        Some(_) => {}
    }
}

/// Check server health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List all resource definitions
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    responses(
        (status = 200, description = "List of resource definitions", body = ApiResponse),
    ),
    tag = "Resources"
)]
pub async fn list_resources(
    Extension(registry): Extension<ResourceRegistry>,
) -> Json<ApiResponse<Vec<ResourceListItem>>> {
    let items = registry
        .load_all()
        .await
        .into_iter()
        .map(|definition| {
            let links = resource_links(&definition);
            ResourceListItem { definition, links }
        })
        .collect();

    Json(ApiResponse::success(items))
}

/// Get a resource definition by ID
#[utoipa::path(
    get,
    path = "/api/v1/resources/{id}",
    params(
        ("id" = String, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource found", body = ApiResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse),
    ),
    tag = "Resources"
)]
pub async fn get_resource(
    Extension(registry): Extension<ResourceRegistry>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ResourceListItem>>, HandlerError> {
    let definition = registry.load(&id).await.ok_or_else(|| {
        ErrorResponse::new(
            error_codes::RESOURCE_NOT_FOUND,
            format!("Resource '{id}' not found"),
        )
        .with_status()
    })?;

    let links = resource_links(&definition);
    Ok(Json(ApiResponse::success(ResourceListItem {
        definition,
        links,
    })))
}

/// Create a new resource definition
///
/// The path becomes live under `/jsonapi/` immediately; no restart is
/// needed.
#[utoipa::path(
    post,
    path = "/api/v1/resources",
    request_body = ResourceDefinition,
    responses(
        (status = 200, description = "Resource created", body = ApiResponse),
        (status = 400, description = "Invalid resource definition", body = ErrorResponse),
        (status = 409, description = "Duplicate id or path", body = ErrorResponse),
    ),
    tag = "Resources"
)]
pub async fn create_resource(
    Extension(registry): Extension<ResourceRegistry>,
    Extension(views): Extension<ViewStore>,
    Extension(route_table): Extension<Arc<RwLock<RouteTable>>>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(config_persistence): Extension<Option<Arc<ConfigPersistence>>>,
    Json(definition): Json<ResourceDefinition>,
) -> Result<Json<ApiResponse<StatusResponse>>, HandlerError> {
    if *read_only {
        return Err(read_only_error());
    }
    validate_definition(&definition)?;
    warn_on_broken_reference(&views, &definition).await;

    let id = definition.id.clone();
    registry
        .insert(definition)
        .await
        .map_err(|e| ErrorResponse::from(e).with_status())?;

    rebuild_routes(&registry, &route_table).await;
    info!("Created resource '{id}'");
    persist_after_operation(&config_persistence, "creating resource").await;

    Ok(Json(ApiResponse::success(StatusResponse {
        message: format!("Resource '{id}' created successfully"),
    })))
}

/// Update an existing resource definition
///
/// The id is immutable; the body id must match the path.
#[utoipa::path(
    put,
    path = "/api/v1/resources/{id}",
    params(
        ("id" = String, Path, description = "Resource ID")
    ),
    request_body = ResourceDefinition,
    responses(
        (status = 200, description = "Resource updated", body = ApiResponse),
        (status = 400, description = "Invalid resource definition", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse),
        (status = 409, description = "Duplicate path", body = ErrorResponse),
    ),
    tag = "Resources"
)]
pub async fn update_resource(
    Extension(registry): Extension<ResourceRegistry>,
    Extension(views): Extension<ViewStore>,
    Extension(route_table): Extension<Arc<RwLock<RouteTable>>>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(config_persistence): Extension<Option<Arc<ConfigPersistence>>>,
    Path(id): Path<String>,
    Json(definition): Json<ResourceDefinition>,
) -> Result<Json<ApiResponse<StatusResponse>>, HandlerError> {
    if *read_only {
        return Err(read_only_error());
    }
    if definition.id != id {
        return Err(ErrorResponse::new(
            error_codes::INVALID_REQUEST,
            "Resource ids are immutable; the body id must match the path",
        )
        .with_status());
    }
    validate_definition(&definition)?;
    warn_on_broken_reference(&views, &definition).await;

    registry
        .update(definition)
        .await
        .map_err(|e| ErrorResponse::from(e).with_status())?;

    rebuild_routes(&registry, &route_table).await;
    info!("Updated resource '{id}'");
    persist_after_operation(&config_persistence, "updating resource").await;

    Ok(Json(ApiResponse::success(StatusResponse {
        message: format!("Resource '{id}' updated successfully"),
    })))
}

/// Delete a resource definition
///
/// The corresponding `/jsonapi/` endpoint disappears with it.
#[utoipa::path(
    delete,
    path = "/api/v1/resources/{id}",
    params(
        ("id" = String, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource deleted", body = ApiResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse),
    ),
    tag = "Resources"
)]
pub async fn delete_resource(
    Extension(registry): Extension<ResourceRegistry>,
    Extension(route_table): Extension<Arc<RwLock<RouteTable>>>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(config_persistence): Extension<Option<Arc<ConfigPersistence>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StatusResponse>>, HandlerError> {
    if *read_only {
        return Err(read_only_error());
    }

    if registry.remove(&id).await.is_none() {
        return Err(ErrorResponse::new(
            error_codes::RESOURCE_NOT_FOUND,
            format!("Resource '{id}' not found"),
        )
        .with_status());
    }

    rebuild_routes(&registry, &route_table).await;
    info!("Deleted resource '{id}'");
    persist_after_operation(&config_persistence, "deleting resource").await;

    Ok(Json(ApiResponse::success(StatusResponse {
        message: format!("Resource '{id}' deleted successfully"),
    })))
}

/// Get the module settings
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    responses(
        (status = 200, description = "Current module settings", body = ApiResponse),
    ),
    tag = "Settings"
)]
pub async fn get_settings(
    Extension(settings): Extension<Arc<RwLock<ModuleSettings>>>,
) -> Json<ApiResponse<ModuleSettings>> {
    let snapshot = settings.read().await.clone();
    Json(ApiResponse::success(snapshot))
}

/// Replace the module settings
///
/// Takes effect on the next public request.
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    request_body = ModuleSettings,
    responses(
        (status = 200, description = "Settings updated", body = ApiResponse),
        (status = 409, description = "Server is read-only", body = ErrorResponse),
    ),
    tag = "Settings"
)]
pub async fn update_settings(
    Extension(settings): Extension<Arc<RwLock<ModuleSettings>>>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(config_persistence): Extension<Option<Arc<ConfigPersistence>>>,
    Json(new_settings): Json<ModuleSettings>,
) -> Result<Json<ApiResponse<StatusResponse>>, HandlerError> {
    if *read_only {
        return Err(read_only_error());
    }

    {
        let mut current = settings.write().await;
        *current = new_settings;
    }

    info!("Module settings updated");
    persist_after_operation(&config_persistence, "updating settings").await;

    Ok(Json(ApiResponse::success(StatusResponse {
        message: "Settings updated successfully".to_string(),
    })))
}

/// List views and their displays
///
/// Inventory for building resource definitions.
#[utoipa::path(
    get,
    path = "/api/v1/views",
    responses(
        (status = 200, description = "List of views", body = ApiResponse),
    ),
    tag = "Views"
)]
pub async fn list_views(
    Extension(views): Extension<ViewStore>,
) -> Json<ApiResponse<Vec<ViewListItem>>> {
    let items = views
        .list()
        .await
        .into_iter()
        .map(|view| ViewListItem {
            id: view.id.clone(),
            label: view.label.clone(),
            displays: view
                .displays
                .iter()
                .map(|display| DisplayListItem {
                    id: display.id.clone(),
                    title: display
                        .title
                        .clone()
                        .unwrap_or_else(|| view.label.clone()),
                })
                .collect(),
        })
        .collect();

    Json(ApiResponse::success(items))
}
