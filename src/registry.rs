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

//! Registry of resource definitions.
//!
//! This is the runtime counterpart of the `resources:` config block,
//! supporting dynamic create/update/delete through the admin API. Reads are
//! request-path hot; writes happen only from admin mutations.

use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ResourceDefinition;

/// Error raised by registry mutations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Resource '{0}' already exists")]
    DuplicateId(String),

    #[error("Path '{path}' is already used by resource '{resource_id}'")]
    DuplicatePath { path: String, resource_id: String },

    #[error("Resource '{0}' not found")]
    NotFound(String),
}

#[derive(Clone, Default)]
pub struct ResourceRegistry {
    resources: Arc<RwLock<IndexMap<String, ResourceDefinition>>>,
}

impl ResourceRegistry {
    pub fn new(definitions: Vec<ResourceDefinition>) -> Self {
        let resources = definitions.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            resources: Arc::new(RwLock::new(resources)),
        }
    }

    pub async fn load(&self, id: &str) -> Option<ResourceDefinition> {
        let resources = self.resources.read().await;
        resources.get(id).cloned()
    }

    /// All definitions, in insertion order.
    pub async fn load_all(&self) -> Vec<ResourceDefinition> {
        let resources = self.resources.read().await;
        resources.values().cloned().collect()
    }

    /// Definitions bound to the given view and display.
    ///
    /// Multiple resources may point at one view/display pair; the result is
    /// ordered by resource id so callers taking the first match are
    /// deterministic.
    pub async fn load_by_view_display(
        &self,
        view_id: &str,
        display_id: &str,
    ) -> Vec<ResourceDefinition> {
        let resources = self.resources.read().await;
        let mut matches: Vec<ResourceDefinition> = resources
            .values()
            .filter(|r| r.view_id == view_id && r.display_id == display_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches
    }

    /// Insert a new definition. Rejects duplicate ids and duplicate paths.
    pub async fn insert(&self, definition: ResourceDefinition) -> Result<(), RegistryError> {
        let mut resources = self.resources.write().await;
        if resources.contains_key(&definition.id) {
            return Err(RegistryError::DuplicateId(definition.id));
        }
        if let Some(existing) = resources
            .values()
            .find(|r| r.normalized_path() == definition.normalized_path())
        {
            return Err(RegistryError::DuplicatePath {
                path: definition.path,
                resource_id: existing.id.clone(),
            });
        }
        resources.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Replace an existing definition. The id is immutable; the path must
    /// stay unique.
    pub async fn update(&self, definition: ResourceDefinition) -> Result<(), RegistryError> {
        let mut resources = self.resources.write().await;
        if !resources.contains_key(&definition.id) {
            return Err(RegistryError::NotFound(definition.id));
        }
        if let Some(existing) = resources
            .values()
            .find(|r| r.id != definition.id && r.normalized_path() == definition.normalized_path())
        {
            return Err(RegistryError::DuplicatePath {
                path: definition.path,
                resource_id: existing.id.clone(),
            });
        }
        resources.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Option<ResourceDefinition> {
        let mut resources = self.resources.write().await;
        resources.shift_remove(id)
    }

    pub async fn contains(&self, id: &str) -> bool {
        let resources = self.resources.read().await;
        resources.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        let resources = self.resources.read().await;
        resources.len()
    }

    pub async fn is_empty(&self) -> bool {
        let resources = self.resources.read().await;
        resources.is_empty()
    }
}
