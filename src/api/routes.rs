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

//! Admin API route definitions.
//!
//! All routes are designed to be nested under `/api/v1/`.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::RwLock;

use super::handlers;
use crate::config::ModuleSettings;
use crate::persistence::ConfigPersistence;
use crate::registry::ResourceRegistry;
use crate::route_table::RouteTable;
use crate::views::ViewStore;

/// Build the admin API router.
#[allow(clippy::too_many_arguments)]
pub fn build_admin_router(
    registry: ResourceRegistry,
    views: ViewStore,
    route_table: Arc<RwLock<RouteTable>>,
    settings: Arc<RwLock<ModuleSettings>>,
    read_only: Arc<bool>,
    config_persistence: Option<Arc<ConfigPersistence>>,
) -> Router {
    Router::new()
        // Resource definition routes
        .route("/resources", get(handlers::list_resources))
        .route("/resources", post(handlers::create_resource))
        .route("/resources/:id", get(handlers::get_resource))
        .route("/resources/:id", put(handlers::update_resource))
        .route("/resources/:id", delete(handlers::delete_resource))
        // Settings routes
        .route("/settings", get(handlers::get_settings))
        .route("/settings", put(handlers::update_settings))
        // View inventory
        .route("/views", get(handlers::list_views))
        .layer(Extension(registry))
        .layer(Extension(views))
        .layer(Extension(route_table))
        .layer(Extension(settings))
        .layer(Extension(read_only))
        .layer(Extension(config_persistence))
}
