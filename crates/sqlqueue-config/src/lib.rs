// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for sqlqueue.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `SQLQUEUE_*` environment variable overrides, and
//! miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use sqlqueue_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("queue file: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::ConfigError;
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{SqlQueueConfig, StorageConfig, SyncMode};

/// Name given to TOML passed as a string in diagnostics.
const INLINE_SOURCE: &str = "<inline>";

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<SqlQueueConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &collect_toml_sources())),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Unknown-key errors point into `toml_content`, named `<inline>`.
pub fn load_and_validate_str(toml_content: &str) -> Result<SqlQueueConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = [(INLINE_SOURCE.to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read every config file that exists, for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        Some((path.display().to_string(), content))
    })
    .collect()
}
