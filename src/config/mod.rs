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

//! Configuration management.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Automatic environment variable interpolation
//! - YAML and JSON file loading with save-back
//! - Unknown-field and semantic validation
//!
//! # Environment Variable Interpolation
//!
//! All config loading functions interpolate environment variables using
//! POSIX-style syntax:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - variable with default value
//!
//! # Configuration File Example
//!
//! ```yaml
//! server:
//!   host: "${SERVER_HOST:-0.0.0.0}"
//!   port: "${SERVER_PORT:-8080}"
//!   logLevel: "${LOG_LEVEL:-info}"
//!
//! settings:
//!   includeViewMetadata: true
//!
//! resources:
//!   - id: articles
//!     label: Published articles
//!     viewId: content_listing
//!     displayId: default
//!     path: views/articles
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use loader::{from_json_str, from_yaml_str, load_config_file, save_config_file, ConfigError};
pub use types::{ModuleSettings, ResourceDefinition, ServerConfig, ServerSettings};
pub use validation::ValidationError;
