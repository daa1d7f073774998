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

//! Per-request view execution.
//!
//! An [`ExecutableView`] binds one display of a view definition and carries
//! the transient request state: exposed filter input, sort direction
//! overrides, and the pager. It is created at request start and discarded
//! after formatting.

use std::cmp::Ordering;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::pager::Pager;
use super::provider::{DataProvider, DatasetRow};
use super::types::{
    AccessRule, DisplayDefinition, FieldDefinition, FilterOperator, SortDirection, ViewDefinition,
};

/// An executed row. Same shape as the provider row; ordering is the
/// execution order.
pub type ResultRow = DatasetRow;

/// A view bound to one of its displays, ready to execute.
#[derive(Debug)]
pub struct ExecutableView {
    definition: Arc<ViewDefinition>,
    display: DisplayDefinition,
    current_display: String,
    /// Raw exposed input, keyed by the filter's expose identifier.
    exposed_input: IndexMap<String, String>,
    /// Working sort directions, index-aligned with the display's sorts.
    sort_directions: Vec<SortDirection>,
    pager: Pager,
}

impl ExecutableView {
    /// Evaluate display access.
    ///
    /// A missing display and a denied display are both `false`; callers must
    /// not distinguish the two.
    pub fn access(definition: &ViewDefinition, display_id: &str, granted: &[String]) -> bool {
        match definition.display(display_id) {
            None => false,
            Some(display) => match &display.access {
                AccessRule::Allow => true,
                AccessRule::Deny => false,
                AccessRule::Permission(permission) => granted.iter().any(|g| g == permission),
            },
        }
    }

    /// Bind a display, producing the execution context.
    pub fn bind(definition: Arc<ViewDefinition>, display_id: &str) -> Option<Self> {
        let display = definition.display(display_id)?.clone();
        let pager = Pager::from_settings(&display.pager);
        let sort_directions = display.sorts.iter().map(|s| s.direction).collect();
        Some(Self {
            definition,
            display,
            current_display: display_id.to_string(),
            exposed_input: IndexMap::new(),
            sort_directions,
            pager,
        })
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn current_display(&self) -> &str {
        &self.current_display
    }

    /// Display title, falling back to the view label.
    pub fn title(&self) -> &str {
        self.display
            .title
            .as_deref()
            .unwrap_or(&self.definition.label)
    }

    pub fn definition(&self) -> &ViewDefinition {
        &self.definition
    }

    /// Visible (non-excluded) fields, in display order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.display.fields.iter().filter(|f| !f.exclude)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    /// Set raw exposed input on the first exposed filter whose underlying
    /// column matches. Returns whether a handler matched.
    pub fn apply_exposed_filter(&mut self, column: &str, value: &str) -> bool {
        for filter in &self.display.filters {
            if filter.exposed && filter.column == column {
                self.exposed_input
                    .insert(filter.identifier().to_string(), value.to_string());
                return true;
            }
        }
        false
    }

    /// Override the direction of the first exposed sort whose underlying
    /// column matches. Returns whether a handler matched.
    pub fn apply_sort_override(&mut self, column: &str, direction: SortDirection) -> bool {
        for (index, sort) in self.display.sorts.iter().enumerate() {
            if sort.exposed && sort.column == column {
                self.sort_directions[index] = direction;
                return true;
            }
        }
        false
    }

    /// Run the query: fetch, filter, sort, window.
    ///
    /// Provider failures propagate unclassified.
    pub async fn execute(&mut self, provider: &dyn DataProvider) -> anyhow::Result<Vec<ResultRow>> {
        let mut rows = provider.fetch(&self.definition.provider).await?;

        for filter in &self.display.filters {
            let effective = if filter.exposed {
                self.exposed_input
                    .get(filter.identifier())
                    .cloned()
                    .or_else(|| filter.value.clone())
            } else {
                filter.value.clone()
            };
            if let Some(value) = effective {
                rows.retain(|row| {
                    filter_matches(row.values.get(&filter.column), filter.operator, &value)
                });
            }
        }

        if !self.display.sorts.is_empty() {
            let keys: Vec<(String, SortDirection)> = self
                .display
                .sorts
                .iter()
                .zip(&self.sort_directions)
                .map(|(sort, direction)| (sort.column.clone(), *direction))
                .collect();
            rows.sort_by(|a, b| {
                for (column, direction) in &keys {
                    let ordering = compare_values(a.values.get(column), b.values.get(column));
                    let ordering = match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
        }

        if self.pager.use_pager() {
            self.pager.set_total_items(rows.len() as u32);
            let offset = self.pager.offset() as usize;
            rows = if offset >= rows.len() {
                Vec::new()
            } else {
                rows.split_off(offset)
            };
            let limit = self.pager.items_per_page() as usize;
            if limit > 0 {
                rows.truncate(limit);
            }
        }

        Ok(rows)
    }
}

/// Render a column value the way it appears in output attributes.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn filter_matches(value: Option<&Value>, operator: FilterOperator, raw: &str) -> bool {
    let rendered = value.map(render_value).unwrap_or_default();
    match operator {
        FilterOperator::Equals => loose_eq(&rendered, raw),
        FilterOperator::NotEquals => !loose_eq(&rendered, raw),
        FilterOperator::Contains => rendered.contains(raw),
        FilterOperator::GreaterThan => numeric_cmp(&rendered, raw) == Some(Ordering::Greater),
        FilterOperator::GreaterThanOrEqual => {
            matches!(
                numeric_cmp(&rendered, raw),
                Some(Ordering::Greater | Ordering::Equal)
            )
        }
        FilterOperator::LessThan => numeric_cmp(&rendered, raw) == Some(Ordering::Less),
        FilterOperator::LessThanOrEqual => {
            matches!(
                numeric_cmp(&rendered, raw),
                Some(Ordering::Less | Ordering::Equal)
            )
        }
    }
}

/// Equality with numeric coercion, so `filter[status]=1` matches a numeric
/// `status: 1` column.
fn loose_eq(rendered: &str, raw: &str) -> bool {
    if rendered == raw {
        return true;
    }
    matches!(numeric_cmp(rendered, raw), Some(Ordering::Equal))
}

fn numeric_cmp(a: &str, b: &str) -> Option<Ordering> {
    let a: f64 = a.trim().parse().ok()?;
    let b: f64 = b.trim().parse().ok()?;
    a.partial_cmp(&b)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => {
            let a = a.map(render_value).unwrap_or_default();
            let b = b.map(render_value).unwrap_or_default();
            a.cmp(&b)
        }
    }
}
