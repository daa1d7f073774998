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

//! Configuration validation.
//!
//! Two layers:
//! 1. Raw-value validation against known-field tables, catching typos that
//!    serde defaults would otherwise swallow silently.
//! 2. Semantic validation of the typed config: machine-name identifiers,
//!    unique resource ids, unique resource paths, and (warn-only)
//!    referential checks against views and datasets.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use super::types::ServerConfig;

lazy_static! {
    static ref MACHINE_NAME: Regex = Regex::new(r"^[a-z0-9_]+$").expect("Invalid regex pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown field '{field}' in {context}. Valid fields: {valid_fields}")]
    UnknownField {
        field: String,
        context: String,
        valid_fields: String,
    },

    #[error("Resource '{0}' is not a valid machine name (lowercase letters, digits, underscores)")]
    InvalidMachineName(String),

    #[error("Duplicate resource id '{0}'")]
    DuplicateResourceId(String),

    #[error("Resources '{first}' and '{second}' share the path '{path}'")]
    DuplicateResourcePath {
        first: String,
        second: String,
        path: String,
    },

    #[error("Resource '{0}' has an empty path")]
    EmptyResourcePath(String),

    #[error("Multiple validation errors:\n{}", .0.join("\n"))]
    Multiple(Vec<String>),
}

/// Known fields for the top-level configuration.
const ROOT_FIELDS: &[&str] = &[
    "server",
    "settings",
    "resources",
    "views",
    "datasets",
    "resourceTypes",
];

const SERVER_FIELDS: &[&str] = &[
    "host",
    "port",
    "logLevel",
    "persistConfig",
    "grantedPermissions",
];

const SETTINGS_FIELDS: &[&str] = &[
    "includeViewMetadata",
    "preserveFieldNames",
    "cacheEnabled",
    "cacheMaxAge",
    "filterMapping",
    "includeEntityLinks",
];

const RESOURCE_FIELDS: &[&str] = &["id", "label", "viewId", "displayId", "path", "description"];

const VIEW_FIELDS: &[&str] = &["id", "label", "provider", "tags", "displays"];

const DISPLAY_FIELDS: &[&str] = &[
    "id", "title", "fields", "filters", "sorts", "pager", "access",
];

const FIELD_FIELDS: &[&str] = &["id", "label", "column", "exclude"];

const FILTER_FIELDS: &[&str] = &["id", "column", "operator", "value", "exposed", "identifier"];

const SORT_FIELDS: &[&str] = &["id", "column", "direction", "exposed"];

const PAGER_FIELDS: &[&str] = &["enabled", "itemsPerPage", "offset"];

/// Validate a raw configuration value for unknown fields.
pub fn validate_raw(value: &serde_yaml::Value) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if let Some(map) = value.as_mapping() {
        validate_fields(map, ROOT_FIELDS, "configuration", &mut errors);

        if let Some(server) = map.get("server").and_then(|v| v.as_mapping()) {
            validate_fields(server, SERVER_FIELDS, "server settings", &mut errors);
        }
        if let Some(settings) = map.get("settings").and_then(|v| v.as_mapping()) {
            validate_fields(settings, SETTINGS_FIELDS, "module settings", &mut errors);
        }
        if let Some(resources) = map.get("resources").and_then(|v| v.as_sequence()) {
            for (i, resource) in resources.iter().enumerate() {
                if let Some(map) = resource.as_mapping() {
                    let id = map.get("id").and_then(|v| v.as_str()).unwrap_or("unknown");
                    let context = format!("resource[{i}] (id={id})");
                    validate_fields(map, RESOURCE_FIELDS, &context, &mut errors);
                }
            }
        }
        if let Some(views) = map.get("views").and_then(|v| v.as_sequence()) {
            for (i, view) in views.iter().enumerate() {
                validate_view(view, i, &mut errors);
            }
        }
    }

    aggregate(errors)
}

fn validate_view(view: &serde_yaml::Value, index: usize, errors: &mut Vec<String>) {
    let Some(map) = view.as_mapping() else {
        return;
    };
    let id = map.get("id").and_then(|v| v.as_str()).unwrap_or("unknown");
    let context = format!("view[{index}] (id={id})");
    validate_fields(map, VIEW_FIELDS, &context, errors);

    let Some(displays) = map.get("displays").and_then(|v| v.as_sequence()) else {
        return;
    };
    for (d, display) in displays.iter().enumerate() {
        let Some(display_map) = display.as_mapping() else {
            continue;
        };
        let display_context = format!("{context} display[{d}]");
        validate_fields(display_map, DISPLAY_FIELDS, &display_context, errors);

        validate_handler_list(display_map, "fields", FIELD_FIELDS, &display_context, errors);
        validate_handler_list(
            display_map,
            "filters",
            FILTER_FIELDS,
            &display_context,
            errors,
        );
        validate_handler_list(display_map, "sorts", SORT_FIELDS, &display_context, errors);
        if let Some(pager) = display_map.get("pager").and_then(|v| v.as_mapping()) {
            validate_fields(
                pager,
                PAGER_FIELDS,
                &format!("{display_context} pager"),
                errors,
            );
        }
    }
}

fn validate_handler_list(
    display: &serde_yaml::Mapping,
    key: &str,
    valid_fields: &[&str],
    context: &str,
    errors: &mut Vec<String>,
) {
    if let Some(handlers) = display.get(key).and_then(|v| v.as_sequence()) {
        for (i, handler) in handlers.iter().enumerate() {
            if let Some(map) = handler.as_mapping() {
                validate_fields(map, valid_fields, &format!("{context} {key}[{i}]"), errors);
            }
        }
    }
}

fn validate_fields(
    map: &serde_yaml::Mapping,
    valid_fields: &[&str],
    context: &str,
    errors: &mut Vec<String>,
) {
    let valid_set: HashSet<&str> = valid_fields.iter().copied().collect();

    for key in map.keys() {
        if let Some(key_str) = key.as_str() {
            if !valid_set.contains(key_str) {
                errors.push(format!(
                    "Unknown field '{key_str}' in {context}. Valid fields: {valid_fields:?}"
                ));
            }
        }
    }
}

/// Semantic validation of the typed configuration.
pub fn validate_semantics(config: &ServerConfig) -> Result<(), ValidationError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut seen_paths: HashMap<String, &str> = HashMap::new();

    for resource in &config.resources {
        if !is_machine_name(&resource.id) {
            return Err(ValidationError::InvalidMachineName(resource.id.clone()));
        }
        if !seen_ids.insert(&resource.id) {
            return Err(ValidationError::DuplicateResourceId(resource.id.clone()));
        }
        let path = resource.normalized_path();
        if path.is_empty() {
            return Err(ValidationError::EmptyResourcePath(resource.id.clone()));
        }
        if let Some(first) = seen_paths.insert(path.clone(), &resource.id) {
            return Err(ValidationError::DuplicateResourcePath {
                first: first.to_string(),
                second: resource.id.clone(),
                path,
            });
        }

        // Broken references produce a 404 at request time; surface them
        // early but keep the config loadable.
        match config.views.iter().find(|v| v.id == resource.view_id) {
            None => warn!(
                "Resource '{}' references unknown view '{}'",
                resource.id, resource.view_id
            ),
            Some(view) if view.display(&resource.display_id).is_none() => warn!(
                "Resource '{}' references unknown display '{}' on view '{}'",
                resource.id, resource.display_id, resource.view_id
            ),
            Some(_) => {}
        }
    }

    let dataset_ids: HashSet<&str> = config.datasets.iter().map(|d| d.id.as_str()).collect();
    for view in &config.views {
        if !dataset_ids.contains(view.provider.as_str()) {
            warn!(
                "View '{}' references unknown dataset '{}'",
                view.id, view.provider
            );
        }
    }

    Ok(())
}

/// Whether an identifier is a valid machine name.
pub fn is_machine_name(id: &str) -> bool {
    MACHINE_NAME.is_match(id)
}

fn aggregate(errors: Vec<String>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else if errors.len() == 1 {
        Err(ValidationError::UnknownField {
            field: errors[0].clone(),
            context: String::new(),
            valid_fields: String::new(),
        })
    } else {
        Err(ValidationError::Multiple(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceDefinition;

    fn resource(id: &str, path: &str) -> ResourceDefinition {
        ResourceDefinition {
            id: id.to_string(),
            label: id.to_string(),
            view_id: "content_listing".to_string(),
            display_id: "default".to_string(),
            path: path.to_string(),
            description: None,
        }
    }

    #[test]
    fn unknown_root_field_is_rejected() {
        let value: serde_yaml::Value = serde_yaml::from_str("serverr:\n  port: 1").unwrap();
        let err = validate_raw(&value).unwrap_err();
        assert!(err.to_string().contains("serverr"));
    }

    #[test]
    fn unknown_nested_fields_are_aggregated() {
        let yaml = r#"
server:
  prot: 8080
settings:
  includeViewMetadta: true
"#;
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let err = validate_raw(&value).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("prot"));
        assert!(message.contains("includeViewMetadta"));
    }

    #[test]
    fn known_fields_pass_raw_validation() {
        let yaml = r#"
server:
  host: 0.0.0.0
  port: 8080
resources:
  - id: articles
    label: Articles
    viewId: content_listing
    displayId: default
    path: views/articles
views:
  - id: content_listing
    label: Content
    provider: content
    displays:
      - id: default
        fields:
          - id: title
        filters:
          - id: status
            column: status
            exposed: true
        sorts:
          - id: created
            column: created
            exposed: true
        pager:
          enabled: true
          itemsPerPage: 5
"#;
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        validate_raw(&value).unwrap();
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let config = ServerConfig {
            resources: vec![resource("a", "views/shared"), resource("b", "/views/shared")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateResourcePath { .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let config = ServerConfig {
            resources: vec![resource("a", "views/a"), resource("a", "views/b")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateResourceId(_)));
    }

    #[test]
    fn machine_name_format_is_enforced() {
        let config = ServerConfig {
            resources: vec![resource("Not-A-Machine-Name", "views/a")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidMachineName(_)));

        assert!(is_machine_name("articles_2024"));
        assert!(!is_machine_name("Articles"));
        assert!(!is_machine_name("articles-2024"));
        assert!(!is_machine_name(""));
    }

    #[test]
    fn broken_references_do_not_fail_validation() {
        let config = ServerConfig {
            resources: vec![resource("a", "views/a")],
            ..Default::default()
        };
        // View 'content_listing' does not exist; only a warning.
        config.validate().unwrap();
    }
}
