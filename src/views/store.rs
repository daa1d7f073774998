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

//! Registry of view definitions.
//!
//! Definitions are read-only within a request; the store exists to hand out
//! cheap `Arc` clones to concurrent request handlers.

use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::ViewDefinition;

#[derive(Clone, Default)]
pub struct ViewStore {
    views: Arc<RwLock<IndexMap<String, Arc<ViewDefinition>>>>,
}

impl ViewStore {
    pub fn new(definitions: Vec<ViewDefinition>) -> Self {
        let views = definitions
            .into_iter()
            .map(|v| (v.id.clone(), Arc::new(v)))
            .collect();
        Self {
            views: Arc::new(RwLock::new(views)),
        }
    }

    /// Load a view definition by id.
    pub async fn load(&self, view_id: &str) -> Option<Arc<ViewDefinition>> {
        let views = self.views.read().await;
        views.get(view_id).cloned()
    }

    pub async fn contains(&self, view_id: &str) -> bool {
        let views = self.views.read().await;
        views.contains_key(view_id)
    }

    /// All definitions, in configuration order.
    pub async fn list(&self) -> Vec<Arc<ViewDefinition>> {
        let views = self.views.read().await;
        views.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        let views = self.views.read().await;
        views.len()
    }

    pub async fn is_empty(&self) -> bool {
        let views = self.views.read().await;
        views.is_empty()
    }
}
