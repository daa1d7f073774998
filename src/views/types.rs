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

//! View and display definition types.
//!
//! These structures are deserialized from the `views:` block of the server
//! configuration and are read-only at request time.

use serde::{Deserialize, Serialize};

/// A named query definition with one or more displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinition {
    /// Machine name of the view.
    pub id: String,
    /// Human-readable label, used as the fallback title.
    pub label: String,
    /// Dataset the view queries.
    pub provider: String,
    /// Free-form tags. Emitted as cache tags on responses.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Execution modes of this view.
    pub displays: Vec<DisplayDefinition>,
}

impl ViewDefinition {
    pub fn display(&self, display_id: &str) -> Option<&DisplayDefinition> {
        self.displays.iter().find(|d| d.id == display_id)
    }

    /// Cache tags invalidated when this view definition changes.
    pub fn cache_tags(&self) -> Vec<String> {
        let mut tags = vec![format!("view:{}", self.id)];
        tags.extend(self.tags.iter().cloned());
        tags
    }
}

/// A named execution mode of a view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayDefinition {
    pub id: String,
    /// Display title, surfaced in response metadata.
    #[serde(default)]
    pub title: Option<String>,
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,
    #[serde(default)]
    pub sorts: Vec<SortDefinition>,
    #[serde(default)]
    pub pager: PagerSettings,
    #[serde(default)]
    pub access: AccessRule,
}

/// A field rendered into the `attributes` of each resource object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Machine name, used as the attribute key.
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Underlying row column. Defaults to the field id.
    #[serde(default)]
    pub column: Option<String>,
    /// Excluded fields never appear in output.
    #[serde(default)]
    pub exclude: bool,
}

impl FieldDefinition {
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.id)
    }
}

/// A filter handler. Exposed filters accept request-time input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefinition {
    pub id: String,
    /// Underlying real column. `filter[...]` parameters match against this.
    pub column: String,
    #[serde(default)]
    pub operator: FilterOperator,
    /// Configured value. `None` leaves the filter inactive until exposed
    /// input arrives.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub exposed: bool,
    /// Exposed input key. Defaults to the column name.
    #[serde(default)]
    pub identifier: Option<String>,
}

impl FilterDefinition {
    pub fn identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or(&self.column)
    }
}

/// Comparison operator applied by a filter handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterOperator {
    #[default]
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
}

/// A sort handler. Exposed sorts accept request-time direction overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortDefinition {
    pub id: String,
    /// Underlying real column. `sort` tokens match against this.
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub exposed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Row-windowing configuration for a display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_items_per_page() -> u32 {
    10
}

impl Default for PagerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            items_per_page: default_items_per_page(),
            offset: 0,
        }
    }
}

/// Access rule for a display.
///
/// Denial is deliberately indistinguishable from a missing display at the
/// HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessRule {
    #[default]
    Allow,
    Deny,
    /// Requires the named permission to be granted in the server settings.
    #[serde(untagged)]
    Permission(String),
}
