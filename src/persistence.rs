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

//! Configuration persistence.
//!
//! Snapshots the live registries back into a [`ServerConfig`] and writes it
//! to the config file after successful admin mutations. Views, datasets, and
//! resource types are file-managed and pass through unchanged; resources and
//! settings reflect runtime state.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;

use crate::config::{
    save_config_file, ConfigError, ModuleSettings, ServerConfig, ServerSettings,
};
use crate::registry::ResourceRegistry;
use crate::resource_types::ResourceType;
use crate::views::{Dataset, ViewStore};

pub struct ConfigPersistence {
    path: PathBuf,
    server: ServerSettings,
    settings: Arc<RwLock<ModuleSettings>>,
    registry: ResourceRegistry,
    views: ViewStore,
    datasets: Vec<Dataset>,
    resource_types: Vec<ResourceType>,
}

impl ConfigPersistence {
    pub fn new(
        path: PathBuf,
        server: ServerSettings,
        settings: Arc<RwLock<ModuleSettings>>,
        registry: ResourceRegistry,
        views: ViewStore,
        datasets: Vec<Dataset>,
        resource_types: Vec<ResourceType>,
    ) -> Self {
        Self {
            path,
            server,
            settings,
            registry,
            views,
            datasets,
            resource_types,
        }
    }

    /// Assemble the current configuration state.
    pub async fn snapshot(&self) -> ServerConfig {
        ServerConfig {
            server: self.server.clone(),
            settings: self.settings.read().await.clone(),
            resources: self.registry.load_all().await,
            views: self
                .views
                .list()
                .await
                .iter()
                .map(|view| (**view).clone())
                .collect(),
            datasets: self.datasets.clone(),
            resource_types: self.resource_types.clone(),
        }
    }

    /// Write the current state to the config file.
    pub async fn save(&self) -> Result<(), ConfigError> {
        let config = self.snapshot().await;
        save_config_file(&config, &self.path)?;
        debug!("Configuration saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_file, ResourceDefinition};
    use tempfile::NamedTempFile;

    fn resource(id: &str, path: &str) -> ResourceDefinition {
        ResourceDefinition {
            id: id.to_string(),
            label: id.to_string(),
            view_id: "v".to_string(),
            display_id: "d".to_string(),
            path: path.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn save_reflects_registry_mutations() {
        let temp_file = NamedTempFile::new().unwrap();
        let registry = ResourceRegistry::default();
        let persistence = ConfigPersistence::new(
            temp_file.path().to_path_buf(),
            ServerSettings::default(),
            Arc::new(RwLock::new(ModuleSettings::default())),
            registry.clone(),
            ViewStore::default(),
            Vec::new(),
            Vec::new(),
        );

        registry.insert(resource("articles", "views/articles")).await.unwrap();
        persistence.save().await.unwrap();

        let reloaded = load_config_file(temp_file.path()).unwrap();
        assert_eq!(reloaded.resources.len(), 1);
        assert_eq!(reloaded.resources[0].id, "articles");

        registry.remove("articles").await;
        persistence.save().await.unwrap();

        let reloaded = load_config_file(temp_file.path()).unwrap();
        assert!(reloaded.resources.is_empty());
    }

    #[tokio::test]
    async fn save_reflects_settings_changes() {
        let temp_file = NamedTempFile::new().unwrap();
        let settings = Arc::new(RwLock::new(ModuleSettings::default()));
        let persistence = ConfigPersistence::new(
            temp_file.path().to_path_buf(),
            ServerSettings::default(),
            settings.clone(),
            ResourceRegistry::default(),
            ViewStore::default(),
            Vec::new(),
            Vec::new(),
        );

        settings.write().await.include_view_metadata = false;
        persistence.save().await.unwrap();

        let reloaded = load_config_file(temp_file.path()).unwrap();
        assert!(!reloaded.settings.include_view_metadata);
    }
}
