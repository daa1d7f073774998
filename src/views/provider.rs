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

//! Data providers supplying rows to view execution.
//!
//! A provider failure is an unclassified error: it propagates out of view
//! execution and surfaces as a generic server error.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identity of the content entity backing a row, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub entity_type: String,
    pub bundle: String,
    pub uuid: Uuid,
}

/// One raw row as supplied by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRow {
    /// Backing entity, absent for non-entity rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityRef>,
    /// Column values. Nulls render as empty strings downstream.
    pub values: Map<String, Value>,
}

/// A named collection of rows, defined in the `datasets:` config block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: String,
    #[serde(default)]
    pub rows: Vec<DatasetRow>,
}

/// Source of rows for view execution.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch all rows of the named dataset, in storage order.
    async fn fetch(&self, dataset: &str) -> anyhow::Result<Vec<DatasetRow>>;
}

/// In-memory provider backed by config-defined datasets.
pub struct StaticDataProvider {
    datasets: IndexMap<String, Dataset>,
}

impl StaticDataProvider {
    pub fn new(datasets: Vec<Dataset>) -> Self {
        let datasets = datasets.into_iter().map(|d| (d.id.clone(), d)).collect();
        Self { datasets }
    }

    pub fn dataset_ids(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect()
    }
}

#[async_trait]
impl DataProvider for StaticDataProvider {
    async fn fetch(&self, dataset: &str) -> anyhow::Result<Vec<DatasetRow>> {
        match self.datasets.get(dataset) {
            Some(d) => Ok(d.rows.clone()),
            None => Err(anyhow::anyhow!("Dataset '{dataset}' is not defined")),
        }
    }
}
