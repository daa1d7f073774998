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

use anyhow::Result;
use axum::{extract::Extension, routing::get, Router};
use log::{error, info, warn};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::config::{load_config_file, ServerConfig};
use crate::endpoint;
use crate::jsonapi::JsonApiManager;
use crate::persistence::ConfigPersistence;
use crate::registry::ResourceRegistry;
use crate::resource_types::ResourceTypeRegistry;
use crate::route_table::RouteTable;
use crate::views::{DataProvider, StaticDataProvider, ViewStore};

pub struct ViewsJsonApiServer {
    config: ServerConfig,
    config_path: Option<PathBuf>,
    read_only: Arc<bool>,
    host: String,
    port: u16,
}

impl ViewsJsonApiServer {
    /// Create a new server from a configuration file.
    pub fn new(config_path: PathBuf, port_override: Option<u16>) -> Result<Self> {
        let config = load_config_file(&config_path)?;

        // Read-only mode is ONLY entered when the config file is not
        // writable. persist_config: false still allows API mutations, they
        // just do not survive a restart.
        let file_writable = Self::check_write_access(&config_path);
        let read_only = !file_writable;

        if !file_writable {
            warn!("Config file is not writable. Admin API in READ-ONLY mode.");
        } else if !config.server.persist_config {
            info!("Persistence disabled by configuration (persistConfig: false).");
            warn!("Admin API modifications will not persist across restarts.");
        } else {
            info!("Persistence ENABLED. Admin API modifications will be saved to the config file.");
        }

        let host = config.server.host.clone();
        let port = port_override.unwrap_or(config.server.port);

        Ok(Self {
            config,
            config_path: Some(config_path),
            read_only: Arc::new(read_only),
            host,
            port,
        })
    }

    /// Create a server from an in-memory configuration (programmatic mode:
    /// no file, no persistence, never read-only).
    pub fn from_config(config: ServerConfig) -> Self {
        let host = config.server.host.clone();
        let port = config.server.port;
        Self {
            config,
            config_path: None,
            read_only: Arc::new(false),
            host,
            port,
        }
    }

    /// Check if we have write access to the config file.
    fn check_write_access(path: &PathBuf) -> bool {
        OpenOptions::new().append(true).open(path).is_ok()
    }

    /// Assemble the complete application router: the public `/jsonapi/`
    /// surface, the admin API, and the Swagger UI.
    pub fn router(&self) -> Router {
        let registry = ResourceRegistry::new(self.config.resources.clone());
        let views = ViewStore::new(self.config.views.clone());
        let resource_types = Arc::new(ResourceTypeRegistry::new(
            self.config.resource_types.clone(),
        ));
        let provider: Arc<dyn DataProvider> =
            Arc::new(StaticDataProvider::new(self.config.datasets.clone()));
        let settings = Arc::new(RwLock::new(self.config.settings.clone()));
        let route_table = Arc::new(RwLock::new(RouteTable::project(&self.config.resources)));
        let server_settings = Arc::new(self.config.server.clone());

        let manager = Arc::new(JsonApiManager::new(
            views.clone(),
            registry.clone(),
            resource_types,
            provider,
            self.config.server.granted_permissions.clone(),
        ));

        let config_persistence = match &self.config_path {
            Some(path) if !*self.read_only && self.config.server.persist_config => {
                Some(Arc::new(ConfigPersistence::new(
                    path.clone(),
                    self.config.server.clone(),
                    settings.clone(),
                    registry.clone(),
                    views.clone(),
                    self.config.datasets.clone(),
                    self.config.resource_types.clone(),
                )))
            }
            _ => None,
        };

        let admin_router = api::build_admin_router(
            registry,
            views,
            route_table.clone(),
            settings.clone(),
            self.read_only.clone(),
            config_persistence,
        );

        Router::new()
            // Health check at root level (operational endpoint, not versioned)
            .route("/health", get(api::health_check))
            // Public resource endpoints, resolved through the route table
            .route("/jsonapi/*path", get(endpoint::serve_resource))
            // Admin API under /api/v1
            .nest("/api/v1", admin_router)
            // Swagger UI and OpenAPI spec
            .merge(
                SwaggerUi::new("/api/v1/docs").url("/api/v1/openapi.json", api::ApiDoc::openapi()),
            )
            .layer(Extension(manager))
            .layer(Extension(route_table))
            .layer(Extension(settings))
            .layer(Extension(server_settings))
            .layer(CorsLayer::permissive())
    }

    #[allow(clippy::print_stdout)]
    pub async fn run(self) -> Result<()> {
        println!("Starting Views JSON:API Server");
        if let Some(config_file) = &self.config_path {
            println!("  Config file: {}", config_file.display());
        }
        println!("  API Port: {}", self.port);
        println!(
            "  Log level: {}",
            std::env::var("RUST_LOG").unwrap_or_else(|_| self.config.server.log_level.clone())
        );
        info!("Initializing Views JSON:API Server");
        info!(
            "Loaded {} resource(s), {} view(s), {} dataset(s)",
            self.config.resources.len(),
            self.config.views.len(),
            self.config.datasets.len()
        );

        let app = self.router();

        let addr = format!("{}:{}", self.host, self.port);
        info!("Starting web API on {addr}");
        info!("Public endpoints available at http://{addr}/jsonapi/");
        info!("Admin API available at http://{addr}/api/v1/");
        info!("Swagger UI available at http://{addr}/api/v1/docs/");

        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Web API server error: {e}");
            }
        });

        info!("Views JSON:API Server started successfully on port {}", self.port);

        // Wait for shutdown signal
        tokio::signal::ctrl_c().await?;

        info!("Shutting down Views JSON:API Server");

        Ok(())
    }
}
