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

//! Typed configuration structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{self, ValidationError};
use crate::resource_types::ResourceType;
use crate::views::{Dataset, ViewDefinition};

/// Top-level server configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub settings: ModuleSettings,
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
    #[serde(default)]
    pub views: Vec<ViewDefinition>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub resource_types: Vec<ResourceType>,
}

impl ServerConfig {
    /// Semantic validation: identifier formats, uniqueness invariants, and
    /// referential checks. Broken references are logged, not fatal; a stale
    /// resource already answers 404 at request time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_semantics(self)
    }
}

/// Process-level settings (`server:` block).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// When false, admin mutations are accepted but never written back.
    #[serde(default = "default_true")]
    pub persist_config: bool,
    /// Permission grants evaluated against projected route requirements.
    #[serde(default = "default_permissions")]
    pub granted_permissions: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_permissions() -> Vec<String> {
    vec![crate::route_table::ROUTE_PERMISSION.to_string()]
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            persist_config: true,
            granted_permissions: default_permissions(),
        }
    }
}

/// Module-wide formatter settings (`settings:` block), editable at runtime
/// through the admin API.
///
/// Only `include_view_metadata` is consumed by the formatter today. The
/// remaining knobs are kept for config compatibility; see DESIGN.md.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSettings {
    #[serde(default = "default_true")]
    pub include_view_metadata: bool,
    #[serde(default)]
    pub preserve_field_names: bool,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age: u32,
    #[serde(default)]
    pub filter_mapping: bool,
    #[serde(default = "default_true")]
    pub include_entity_links: bool,
}

fn default_cache_max_age() -> u32 {
    3600
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            include_view_metadata: true,
            preserve_field_names: false,
            cache_enabled: true,
            cache_max_age: default_cache_max_age(),
            filter_mapping: false,
            include_entity_links: true,
        }
    }
}

/// Binding of a view display to a public URL path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Machine name, immutable after creation.
    pub id: String,
    pub label: String,
    pub view_id: String,
    pub display_id: String,
    /// URL segment appended to the fixed `/jsonapi/` prefix. Unique across
    /// all resources.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceDefinition {
    /// Path with surrounding slashes stripped, the form routes are keyed on.
    pub fn normalized_path(&self) -> String {
        self.path.trim_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_deserializes_with_defaults() {
        let config: ServerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_level, "info");
        assert!(config.server.persist_config);
        assert_eq!(config.server.granted_permissions, vec!["access content"]);
        assert!(config.resources.is_empty());
    }

    #[test]
    fn module_settings_defaults_match_schema() {
        let settings = ModuleSettings::default();
        assert!(settings.include_view_metadata);
        assert!(!settings.preserve_field_names);
        assert!(settings.cache_enabled);
        assert_eq!(settings.cache_max_age, 3600);
        assert!(!settings.filter_mapping);
        assert!(settings.include_entity_links);
    }

    #[test]
    fn resource_path_is_normalized_for_routing() {
        let resource = ResourceDefinition {
            id: "articles".to_string(),
            label: "Articles".to_string(),
            view_id: "content_listing".to_string(),
            display_id: "default".to_string(),
            path: "/views/articles/".to_string(),
            description: None,
        };
        assert_eq!(resource.normalized_path(), "views/articles");
    }

    #[test]
    fn config_uses_camel_case_keys() {
        let yaml = r#"
server:
  logLevel: debug
  grantedPermissions: ["access content"]
settings:
  includeViewMetadata: false
  cacheMaxAge: 60
resources:
  - id: articles
    label: Articles
    viewId: content_listing
    displayId: default
    path: views/articles
"#;
        let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert!(!config.settings.include_view_metadata);
        assert_eq!(config.settings.cache_max_age, 60);
        assert_eq!(config.resources[0].view_id, "content_listing");
    }
}
