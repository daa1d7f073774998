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

//! Environment variable interpolation for configuration files.
//!
//! POSIX-style syntax, applied to the raw file content before parsing:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - variable with a default when unset or empty

use lazy_static::lazy_static;
use regex::Regex;
use std::env;

/// Cap on interpolated output size.
const MAX_INTERPOLATED_LENGTH: usize = 10_000_000; // 10MB

lazy_static! {
    /// Captures: 1 = variable name (POSIX: `[A-Za-z_][A-Za-z0-9_]*`),
    /// 3 = default value when the `:-` form is used.
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("Invalid regex pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Interpolated result exceeds maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Replace every `${...}` reference in `input` with its environment value.
///
/// Only well-formed references are touched; there is no recursive expansion
/// and no code execution. An unset variable without a default is an error.
///
/// # Examples
///
/// ```
/// use views_jsonapi_server::config::env_interpolation::interpolate;
/// use std::env;
///
/// env::set_var("LISTEN_HOST", "localhost");
///
/// let result = interpolate("host: ${LISTEN_HOST}\nport: ${LISTEN_PORT:-8080}").unwrap();
/// assert_eq!(result, "host: localhost\nport: 8080");
/// ```
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut result = String::with_capacity(input.len());
    let mut last_match_end = 0;

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let full_match = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        let var_name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let default_value = caps.get(3).map(|m| m.as_str());

        result.push_str(&input[last_match_end..full_match.start()]);

        let value = match env::var(var_name) {
            Ok(val) if !val.is_empty() => val,
            Ok(_) | Err(env::VarError::NotPresent) => match default_value {
                Some(default) => default.to_string(),
                None => {
                    return Err(InterpolationError::MissingVariable {
                        name: var_name.to_string(),
                    });
                }
            },
            Err(env::VarError::NotUnicode(_)) => {
                return Err(InterpolationError::MissingVariable {
                    name: format!("{var_name} (contains invalid Unicode)"),
                });
            }
        };

        result.push_str(&value);
        last_match_end = full_match.end();

        if result.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }

    result.push_str(&input[last_match_end..]);

    if result.len() > MAX_INTERPOLATED_LENGTH {
        return Err(InterpolationError::ResultTooLarge);
    }

    Ok(result)
}
