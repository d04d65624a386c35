// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for a3update.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (Arma 3 app ids, api.steampowered.com, 5 retries)
//! 2. a3update.toml (--config)
//! 3. A3UPDATE_* env vars
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! A3UPDATE_STEAM__API_KEY=abc     → steam.api_key = "abc"
//! A3UPDATE_PATHS__INSTALL=/srv/a3 → paths.install = "/srv/a3"
//! A3UPDATE_MODS__HANDLE_KEYS=true → mods.handle_keys = true
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{A3SyncConfig, HtmlPresetConfig, ModsConfig, SteamConfig, SwiftyConfig};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "a3update.toml";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "A3UPDATE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub steam: SteamConfig,
    pub mods: ModsConfig,
    pub paths: PathsConfig,
    pub a3sync: A3SyncConfig,
    pub html_preset: HtmlPresetConfig,
    pub swifty: SwiftyConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use a3update::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("a3update.toml")
    ///     .with_env_prefix("A3UPDATE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML file plus `A3UPDATE_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// does not match the `Config` structure or lacks required keys.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder()
            .add_toml_file(path)
            .with_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure or lacks required keys.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the API key, a required path or
    /// a field of an active publisher is missing, and a
    /// `ConfigError::InvalidValue` if `steam.retries` is zero.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.steam.api_key.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "steam".to_string(),
                key: "api_key".to_string(),
            }
            .into());
        }
        if self.steam.retries == 0 {
            return Err(ConfigError::InvalidValue {
                section: "steam".to_string(),
                key: "retries".to_string(),
                message: "at least one attempt is required".to_string(),
            }
            .into());
        }

        self.paths.resolve(self.steam.game_appid)?;
        types::validate_publishers(&self.a3sync, &self.html_preset, &self.swifty)
    }

    /// Serialize to TOML, as written by the setup wizard.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Format configuration options for display.
    ///
    /// Output is sorted by key and aligned on `=`. The API key is shown as
    /// `[hidden]`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_steam_options(&mut options);
        self.format_mods_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_publisher_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_steam_options(&self, options: &mut BTreeMap<String, String>) {
        if !self.steam.api_key.is_empty() {
            options.insert("steam.api_key".into(), "[hidden]".into());
        }
        options.insert("steam.api_url".into(), self.steam.api_url.clone());
        options.insert(
            "steam.game_appid".into(),
            self.steam.game_appid.to_string(),
        );
        options.insert(
            "steam.server_appid".into(),
            self.steam.server_appid.to_string(),
        );
        options.insert("steam.cdlc".into(), join(&self.steam.cdlc));
        options.insert("steam.retries".into(), self.steam.retries.to_string());
    }

    fn format_mods_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("mods.collections".into(), join(&self.mods.collections));
        options.insert(
            "mods.handle_keys".into(),
            self.mods.handle_keys.to_string(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.steamcmd".into(), fmt_path(self.paths.steamcmd.as_ref()));
        options.insert("paths.install".into(), fmt_path(self.paths.install.as_ref()));
        options.insert("paths.mods".into(), fmt_path(self.paths.mods.as_ref()));
        options.insert("paths.workshop".into(), fmt_path(self.paths.workshop.as_ref()));
        options.insert(
            "paths.external_addons".into(),
            fmt_path(self.paths.external_addons.as_ref()),
        );
        options.insert("paths.keys".into(), fmt_path(self.paths.keys.as_ref()));
    }

    fn format_publisher_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("a3sync.active".into(), self.a3sync.active.to_string());
        if self.a3sync.active {
            options.insert("a3sync.jar".into(), fmt_path(self.a3sync.jar.as_ref()));
            options.insert(
                "a3sync.repo_name".into(),
                self.a3sync.repo_name.clone().unwrap_or_default(),
            );
            options.insert(
                "a3sync.directory".into(),
                fmt_path(self.a3sync.directory.as_ref()),
            );
        }

        options.insert(
            "html_preset.active".into(),
            self.html_preset.active.to_string(),
        );
        if self.html_preset.active {
            options.insert(
                "html_preset.path".into(),
                fmt_path(self.html_preset.path.as_ref()),
            );
            options.insert(
                "html_preset.name".into(),
                self.html_preset.name.clone().unwrap_or_default(),
            );
        }

        options.insert("swifty.active".into(), self.swifty.active.to_string());
        if self.swifty.active {
            options.insert("swifty.cli".into(), fmt_path(self.swifty.cli.as_ref()));
            options.insert(
                "swifty.repo_json".into(),
                fmt_path(self.swifty.repo_json.as_ref()),
            );
            options.insert(
                "swifty.output".into(),
                fmt_path(self.swifty.output.as_ref()),
            );
        }
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
