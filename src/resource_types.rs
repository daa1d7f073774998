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

//! Resource-type naming.
//!
//! Maps an entity type and bundle to the public type name used in output
//! objects. Rows whose entity has no registered resource type are dropped
//! from output entirely.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One configured `(entity_type, bundle) -> type_name` record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    pub entity_type: String,
    pub bundle: String,
    pub type_name: String,
}

impl ResourceType {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Lookup table over the configured resource types.
#[derive(Default)]
pub struct ResourceTypeRegistry {
    types: HashMap<(String, String), ResourceType>,
}

impl ResourceTypeRegistry {
    pub fn new(records: Vec<ResourceType>) -> Self {
        let types = records
            .into_iter()
            .map(|r| ((r.entity_type.clone(), r.bundle.clone()), r))
            .collect();
        Self { types }
    }

    pub fn get(&self, entity_type: &str, bundle: &str) -> Option<&ResourceType> {
        self.types
            .get(&(entity_type.to_string(), bundle.to_string()))
    }
}
