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

//! Configuration loading with automatic environment variable interpolation.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::env_interpolation;
use super::types::ServerConfig;
use super::validation::{self, ValidationError};

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Deserialize YAML with environment variable interpolation applied first.
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Deserialize JSON with environment variable interpolation applied first.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load and validate a [`ServerConfig`] from a file.
///
/// Reads the file, interpolates environment variables, parses as YAML with a
/// JSON fallback, then runs unknown-field and semantic validation.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)?;

    let interpolated = env_interpolation::interpolate(&content)?;

    let config = match serde_yaml::from_str::<ServerConfig>(&interpolated) {
        Ok(config) => config,
        Err(yaml_err) => match serde_json::from_str::<ServerConfig>(&interpolated) {
            Ok(config) => config,
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path_ref.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                });
            }
        },
    };

    // serde_yaml parses both accepted formats, so the raw unknown-field
    // check runs on a single representation.
    if let Ok(raw) = serde_yaml::from_str::<serde_yaml::Value>(&interpolated) {
        validation::validate_raw(&raw)?;
    }

    config.validate()?;

    Ok(config)
}

/// Save a [`ServerConfig`] to a file in YAML format.
///
/// Interpolated values are written as-is; `${...}` references are not
/// reconstructed.
pub fn save_config_file<P: AsRef<Path>>(config: &ServerConfig, path: P) -> Result<(), ConfigError> {
    let content = serde_yaml::to_string(config)?;
    Ok(fs::write(path, content)?)
}
