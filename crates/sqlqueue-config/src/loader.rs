// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sqlqueue.toml` > `~/.config/sqlqueue/sqlqueue.toml` >
//! `/etc/sqlqueue/sqlqueue.toml` with environment variable overrides via `SQLQUEUE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::model::SqlQueueConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sqlqueue/sqlqueue.toml";

/// Config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "sqlqueue.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sqlqueue/sqlqueue.toml` (system-wide)
/// 3. `~/.config/sqlqueue/sqlqueue.toml` (user XDG config)
/// 4. `./sqlqueue.toml` (local directory)
/// 5. `SQLQUEUE_*` environment variables
pub fn load_config() -> Result<SqlQueueConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<SqlQueueConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlQueueConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SqlQueueConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlQueueConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SqlQueueConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/sqlqueue/sqlqueue.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("sqlqueue").join(LOCAL_CONFIG_FILE))
}

/// Environment provider mapping `SQLQUEUE_STORAGE_BUSY_TIMEOUT_MS` to
/// `storage.busy_timeout_ms`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names
/// themselves contain underscores. `map` sees the key in its original case,
/// so it is lowercased before the section prefix is rewritten.
fn env_provider() -> Env {
    Env::prefixed("SQLQUEUE_").map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replacen("storage_", "storage.", 1)
            .into()
    })
}
