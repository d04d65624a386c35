// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: SteamConfig, ModsConfig, PathsConfig,
//!         A3SyncConfig, HtmlPresetConfig, SwiftyConfig
//! PublishedFileId: u64 newtype, accepts 123 or "123"
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Arma 3 app id, owner of every workshop item we download.
pub const ARMA3_APPID: u32 = 107_410;
/// Arma 3 Dedicated Server app id.
pub const ARMA3_SERVER_APPID: u32 = 233_780;
/// Default Steam Web API endpoint.
pub const STEAM_API_URL: &str = "https://api.steampowered.com";

/// A Steam Workshop published file id.
///
/// The Web API sends ids as decimal strings while the config file stores
/// integers; both deserialize into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublishedFileId(u64);

impl PublishedFileId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PublishedFileId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PublishedFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for PublishedFileId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Serialize for PublishedFileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for PublishedFileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = PublishedFileId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a published file id as integer or decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(PublishedFileId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                u64::try_from(v)
                    .map(PublishedFileId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// `[steam]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SteamConfig {
    /// Steam Web API key (<https://steamcommunity.com/dev/apikey>).
    pub api_key: String,
    /// Base URL of the Web API.
    pub api_url: String,
    /// App id owning the workshop items.
    pub game_appid: u32,
    /// Dedicated server app id.
    pub server_appid: u32,
    /// Creator DLC app ids installed next to the server.
    pub cdlc: Vec<u32>,
    /// Attempts per SteamCMD command.
    pub retries: u32,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: STEAM_API_URL.to_string(),
            game_appid: ARMA3_APPID,
            server_appid: ARMA3_SERVER_APPID,
            cdlc: Vec::new(),
            retries: 5,
        }
    }
}

/// `[mods]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModsConfig {
    /// Workshop collections to expand into the mod list.
    pub collections: Vec<PublishedFileId>,
    /// Link each mod's bikeys into the server key directory.
    pub handle_keys: bool,
}

/// `[a3sync]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct A3SyncConfig {
    pub active: bool,
    /// Path to `ArmA3Sync.jar`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jar: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    /// Shared directory the repository is built from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl A3SyncConfig {
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `jar` is not set.
    pub fn jar(&self) -> Result<&Path> {
        require("a3sync", "jar", self.jar.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `repo_name` is not set.
    pub fn repo_name(&self) -> Result<&str> {
        require("a3sync", "repo_name", self.repo_name.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `directory` is not set.
    pub fn directory(&self) -> Result<&Path> {
        require("a3sync", "directory", self.directory.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.active {
            self.jar()?;
            self.repo_name()?;
            self.directory()?;
        }
        Ok(())
    }
}

/// `[html_preset]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlPresetConfig {
    pub active: bool,
    /// Output `.html` file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Preset name shown in the Arma 3 Launcher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl HtmlPresetConfig {
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `path` is not set.
    pub fn path(&self) -> Result<&Path> {
        require("html_preset", "path", self.path.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `name` is not set.
    pub fn name(&self) -> Result<&str> {
        require("html_preset", "name", self.name.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.active {
            self.path()?;
            self.name()?;
        }
        Ok(())
    }
}

/// `[swifty]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwiftyConfig {
    pub active: bool,
    /// Path to `swifty-cli.exe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cli: Option<PathBuf>,
    /// Repository definition (`repo.json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_json: Option<PathBuf>,
    /// Directory the built repository is written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl SwiftyConfig {
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `cli` is not set.
    pub fn cli(&self) -> Result<&Path> {
        require("swifty", "cli", self.cli.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `repo_json` is not set.
    pub fn repo_json(&self) -> Result<&Path> {
        require("swifty", "repo_json", self.repo_json.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `output` is not set.
    pub fn output(&self) -> Result<&Path> {
        require("swifty", "output", self.output.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.active {
            self.cli()?;
            self.repo_json()?;
            self.output()?;
        }
        Ok(())
    }
}

/// Checks every active publisher section for its required keys.
pub(super) fn validate_publishers(
    a3sync: &A3SyncConfig,
    html_preset: &HtmlPresetConfig,
    swifty: &SwiftyConfig,
) -> Result<()> {
    a3sync.validate()?;
    html_preset.validate()?;
    swifty.validate()
}

fn require<'a, T: ?Sized>(section: &str, key: &str, value: Option<&'a T>) -> Result<&'a T> {
    value.ok_or_else(|| {
        ConfigError::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        }
        .into()
    })
}
