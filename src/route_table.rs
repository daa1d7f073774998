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

//! Route projection.
//!
//! The route table is built from the full set of resource definitions: one
//! GET endpoint per resource under the fixed `/jsonapi/` prefix. The mapping
//! to view/display/resource is carried as static route metadata; nothing is
//! parsed out of the URL path itself. The table must be re-projected whenever
//! a resource definition is added, edited, or removed, otherwise deployed
//! endpoints and definitions drift out of sync.

use indexmap::IndexMap;

use crate::config::ResourceDefinition;

/// Permission required by every projected route.
pub const ROUTE_PERMISSION: &str = "access content";

/// URL prefix all projected routes live under.
pub const ROUTE_PREFIX: &str = "/jsonapi/";

/// Static metadata carried by one projected route.
///
/// Identifiers are plain strings; they are handed to the request processor
/// verbatim, never resolved into richer objects on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub resource_id: String,
    pub view_id: String,
    pub display_id: String,
    pub permission: &'static str,
}

/// Projected route set, keyed by normalized resource path.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: IndexMap<String, RouteTarget>,
}

impl RouteTable {
    /// Project one route per resource definition.
    ///
    /// Duplicate paths are last-write-wins here; validation upstream rejects
    /// them before they can reach the projector.
    pub fn project(resources: &[ResourceDefinition]) -> Self {
        let mut routes = IndexMap::new();
        for resource in resources {
            routes.insert(
                resource.normalized_path(),
                RouteTarget {
                    resource_id: resource.id.clone(),
                    view_id: resource.view_id.clone(),
                    display_id: resource.display_id.clone(),
                    permission: ROUTE_PERMISSION,
                },
            );
        }
        Self { routes }
    }

    /// Look up the target for a request path (the part after `/jsonapi/`).
    pub fn lookup(&self, path: &str) -> Option<&RouteTarget> {
        self.routes.get(path.trim_matches('/'))
    }

    /// Full endpoint path (including prefix) for a resource, if projected.
    pub fn endpoint_path(&self, resource_id: &str) -> Option<String> {
        self.routes
            .iter()
            .find(|(_, target)| target.resource_id == resource_id)
            .map(|(path, _)| format!("{ROUTE_PREFIX}{path}"))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
