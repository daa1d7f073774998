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

//! Standalone server exposing configured views as read-only JSON:API-shaped
//! HTTP endpoints.
//!
//! Administrators define *resources* - named bindings of a view display to a
//! URL path - in a configuration file or through the admin REST API. At
//! request time the server loads the view, executes it with
//! query-string-driven filter/sort/pagination overrides, and serializes the
//! result rows into a `data`/`meta`/`links` envelope.

pub mod api;
pub mod config;
pub mod endpoint;
pub mod jsonapi;
pub mod persistence;
pub mod registry;
pub mod resource_types;
pub mod route_table;
pub mod server;
pub mod views;

// Main exports for library users
pub use config::{
    load_config_file, save_config_file, ModuleSettings, ResourceDefinition, ServerConfig,
    ServerSettings,
};
pub use jsonapi::{Document, JsonApiManager, RequestContext, RequestParameters};
pub use registry::ResourceRegistry;
pub use route_table::{RouteTable, RouteTarget};
pub use server::ViewsJsonApiServer;
