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

//! View-to-document processing.

use std::sync::Arc;

use log::debug;

use super::envelope::{
    Document, DocumentMeta, Link, Links, ResourceObject, ViewMeta, VIEW_RESULT_TYPE,
};
use super::params::RequestParameters;
use crate::config::ModuleSettings;
use crate::registry::ResourceRegistry;
use crate::resource_types::ResourceTypeRegistry;
use crate::route_table::ROUTE_PREFIX;
use crate::views::executable::render_value;
use crate::views::{DataProvider, ExecutableView, ResultRow, ViewStore};

/// Request-scoped context the processor cannot derive on its own.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Scheme and authority of the incoming request, no trailing slash.
    pub base_url: String,
}

/// Classified request failures.
///
/// Everything except [`RequestError::Execution`] maps to HTTP 404. A denied
/// display raises the same error as a missing one so callers cannot probe
/// for existence.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Resource '{0}' not found")]
    ResourceNotFound(String),

    #[error("View '{0}' not found")]
    ViewNotFound(String),

    #[error("Display '{display_id}' not found on view '{view_id}'")]
    DisplayNotFound {
        view_id: String,
        display_id: String,
    },

    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}

impl RequestError {
    pub fn is_not_found(&self) -> bool {
        !matches!(self, RequestError::Execution(_))
    }
}

/// Record of how request overrides were applied.
///
/// Unmatched parameters are ignored by design; this trace is the diagnostic
/// channel that keeps the ignoring observable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTrace {
    pub matched_filters: Vec<String>,
    pub ignored_filters: Vec<String>,
    pub matched_sorts: Vec<String>,
    pub ignored_sorts: Vec<String>,
    pub pager_applied: bool,
    pub pager_ignored: bool,
    /// Rows dropped for lacking a registered resource type.
    pub skipped_rows: usize,
}

impl OverrideTrace {
    pub fn is_clean(&self) -> bool {
        self.ignored_filters.is_empty()
            && self.ignored_sorts.is_empty()
            && !self.pager_ignored
            && self.skipped_rows == 0
    }
}

/// The request processor service.
pub struct JsonApiManager {
    views: ViewStore,
    resources: ResourceRegistry,
    resource_types: Arc<ResourceTypeRegistry>,
    provider: Arc<dyn DataProvider>,
    granted_permissions: Vec<String>,
}

impl JsonApiManager {
    pub fn new(
        views: ViewStore,
        resources: ResourceRegistry,
        resource_types: Arc<ResourceTypeRegistry>,
        provider: Arc<dyn DataProvider>,
        granted_permissions: Vec<String>,
    ) -> Self {
        Self {
            views,
            resources,
            resource_types,
            provider,
            granted_permissions,
        }
    }

    /// Cache tags for a response serving the given resource and view.
    pub async fn cache_tags(&self, resource_id: &str, view_id: &str) -> Vec<String> {
        let mut tags = vec![format!("views_jsonapi:{resource_id}")];
        if let Some(view) = self.views.load(view_id).await {
            tags.extend(view.cache_tags());
        }
        tags
    }

    /// Load a view and bind the display, access-checked.
    ///
    /// Missing view, missing display, and denied display all fail NotFound.
    pub async fn get_view(
        &self,
        view_id: &str,
        display_id: &str,
    ) -> Result<ExecutableView, RequestError> {
        let definition = self
            .views
            .load(view_id)
            .await
            .ok_or_else(|| RequestError::ViewNotFound(view_id.to_string()))?;

        if !ExecutableView::access(&definition, display_id, &self.granted_permissions) {
            return Err(RequestError::DisplayNotFound {
                view_id: view_id.to_string(),
                display_id: display_id.to_string(),
            });
        }

        ExecutableView::bind(definition, display_id).ok_or_else(|| RequestError::DisplayNotFound {
            view_id: view_id.to_string(),
            display_id: display_id.to_string(),
        })
    }

    /// Process one request end to end.
    pub async fn handle(
        &self,
        view_id: &str,
        display_id: &str,
        resource_id: &str,
        params: &RequestParameters,
        ctx: &RequestContext,
        settings: &ModuleSettings,
    ) -> Result<(Document, OverrideTrace), RequestError> {
        // The resource lookup guards against stale routes pointing at
        // deleted definitions.
        if self.resources.load(resource_id).await.is_none() {
            return Err(RequestError::ResourceNotFound(resource_id.to_string()));
        }

        let mut view = self.get_view(view_id, display_id).await?;
        self.process_view(&mut view, params, ctx, settings).await
    }

    /// Apply overrides, execute, and format the bound view.
    pub async fn process_view(
        &self,
        view: &mut ExecutableView,
        params: &RequestParameters,
        ctx: &RequestContext,
        settings: &ModuleSettings,
    ) -> Result<(Document, OverrideTrace), RequestError> {
        let mut trace = apply_request_overrides(view, params);

        let rows = view.execute(self.provider.as_ref()).await?;

        let data = self.materialize_rows(view, &rows, &mut trace);

        if !trace.is_clean() {
            debug!(
                "Best-effort request handling on view '{}': ignored filters {:?}, ignored sorts {:?}, pager ignored: {}, rows skipped: {}",
                view.id(),
                trace.ignored_filters,
                trace.ignored_sorts,
                trace.pager_ignored,
                trace.skipped_rows,
            );
        }

        let document = self.build_document(view, data, ctx, settings).await;
        Ok((document, trace))
    }

    /// Turn executed rows into resource objects.
    ///
    /// Entity rows whose resource type is unregistered are dropped without
    /// error. Non-entity rows use the literal `view-result` type and their
    /// ordinal in the executed result as the id.
    fn materialize_rows(
        &self,
        view: &ExecutableView,
        rows: &[ResultRow],
        trace: &mut OverrideTrace,
    ) -> Vec<ResourceObject> {
        let mut data = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let (type_name, id) = match &row.entity {
                Some(entity) => {
                    match self.resource_types.get(&entity.entity_type, &entity.bundle) {
                        Some(resource_type) => (
                            resource_type.type_name().to_string(),
                            entity.uuid.to_string(),
                        ),
                        None => {
                            trace.skipped_rows += 1;
                            continue;
                        }
                    }
                }
                None => (VIEW_RESULT_TYPE.to_string(), index.to_string()),
            };

            let attributes = view
                .visible_fields()
                .map(|field| {
                    let value = row
                        .values
                        .get(field.column())
                        .map(render_value)
                        .unwrap_or_default();
                    (field.id.clone(), value)
                })
                .collect();

            data.push(ResourceObject {
                type_name,
                id,
                attributes,
            });
        }

        data
    }

    async fn build_document(
        &self,
        view: &ExecutableView,
        data: Vec<ResourceObject>,
        ctx: &RequestContext,
        settings: &ModuleSettings,
    ) -> Document {
        let meta = DocumentMeta {
            count: data.len(),
            view: settings.include_view_metadata.then(|| ViewMeta {
                id: view.id().to_string(),
                display: view.current_display().to_string(),
                title: view.title().to_string(),
            }),
        };

        let links = if view.pager().use_pager() {
            self.pagination_links(view, ctx).await
        } else {
            None
        };

        Document { data, meta, links }
    }

    /// Build pagination links from the pager state.
    ///
    /// The base URL comes from the resource bound to this view/display pair;
    /// with several candidates the lowest id wins, so links are stable.
    async fn pagination_links(&self, view: &ExecutableView, ctx: &RequestContext) -> Option<Links> {
        let pager = view.pager();
        let current_page = pager.current_page();
        let items_per_page = pager.items_per_page();
        let total_pages = pager.total_pages();

        let candidates = self
            .resources
            .load_by_view_display(view.id(), view.current_display())
            .await;
        let resource = candidates.first()?;

        let base_url = format!(
            "{}{}{}",
            ctx.base_url,
            ROUTE_PREFIX,
            resource.normalized_path()
        );
        let link = |offset: u32| Link {
            href: format!("{base_url}?page[offset]={offset}&page[limit]={items_per_page}"),
        };

        Some(Links {
            self_link: link(current_page * items_per_page),
            first: link(0),
            last: (total_pages > 0).then(|| link((total_pages - 1) * items_per_page)),
            prev: (current_page > 0).then(|| link((current_page - 1) * items_per_page)),
            next: (total_pages > 0 && current_page + 1 < total_pages)
                .then(|| link((current_page + 1) * items_per_page)),
        })
    }
}

/// Apply request overrides in fixed order: filters, then pagination, then
/// sort. The order is independent of query-string order because each
/// override class is matched by parameter name.
fn apply_request_overrides(view: &mut ExecutableView, params: &RequestParameters) -> OverrideTrace {
    let mut trace = OverrideTrace::default();

    for filter in &params.filters {
        // The operator segment was parsed but is not applied.
        if view.apply_exposed_filter(&filter.field, &filter.value) {
            trace.matched_filters.push(filter.field.clone());
        } else {
            trace.ignored_filters.push(filter.field.clone());
        }
    }

    if params.page_offset.is_some() || params.page_limit.is_some() {
        if view.pager().use_pager() {
            if let Some(offset) = params.page_offset {
                view.pager_mut().set_offset(offset);
            }
            if let Some(limit) = params.page_limit {
                view.pager_mut().set_items_per_page(limit);
            }
            trace.pager_applied = true;
        } else {
            trace.pager_ignored = true;
        }
    }

    for sort in &params.sorts {
        if view.apply_sort_override(&sort.field, sort.direction) {
            trace.matched_sorts.push(sort.field.clone());
        } else {
            trace.ignored_sorts.push(sort.field.clone());
        }
    }

    trace
}
