// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! steamcmd/                      SteamCMD install
//! install/                       dedicated server
//!   keys/                        (keys)
//!   @mod_name/ -> links
//! mods/                          SteamCMD force_install_dir for items
//!   steamapps/workshop/content/<game_appid>/<id>/   (workshop)
//!   external/                    (external_addons)
//! ```
//!
//! `steamcmd`, `install` and `mods` are required; the rest derive from them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Directory layout of the server host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// SteamCMD installation directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steamcmd: Option<PathBuf>,
    /// Arma 3 server installation directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<PathBuf>,
    /// SteamCMD install directory for workshop items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<PathBuf>,
    /// Workshop content directory (default: `mods/steamapps/workshop/content/<game_appid>`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop: Option<PathBuf>,
    /// Directory for addons that do not come from the workshop (default: `mods/external`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_addons: Option<PathBuf>,
    /// Server key directory (default: `install/keys`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<PathBuf>,
}

impl PathsConfig {
    /// Make every path absolute and fill in the derived ones.
    ///
    /// Relative paths are resolved against the current working directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `steamcmd`, `install` or `mods`
    /// is not set, or an error if the working directory cannot be read.
    pub fn resolve(&mut self, game_appid: u32) -> Result<()> {
        let steamcmd = absolute(self.steamcmd()?)?;
        let install = absolute(self.install()?)?;
        let mods = absolute(self.mods()?)?;

        let derive = |path: &Option<PathBuf>, parent: &Path, default: &Path| -> Result<PathBuf> {
            match path {
                Some(p) => absolute(p),
                None => Ok(parent.join(default)),
            }
        };

        let workshop_default: PathBuf = ["steamapps", "workshop", "content"]
            .iter()
            .collect::<PathBuf>()
            .join(game_appid.to_string());

        self.workshop = Some(derive(&self.workshop, &mods, &workshop_default)?);
        self.external_addons = Some(derive(&self.external_addons, &mods, Path::new("external"))?);
        self.keys = Some(derive(&self.keys, &install, Path::new("keys"))?);
        self.steamcmd = Some(steamcmd);
        self.install = Some(install);
        self.mods = Some(mods);

        Ok(())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the path is not set.
    pub fn steamcmd(&self) -> Result<&Path> {
        required("steamcmd", self.steamcmd.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the path is not set.
    pub fn install(&self) -> Result<&Path> {
        required("install", self.install.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the path is not set.
    pub fn mods(&self) -> Result<&Path> {
        required("mods", self.mods.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the paths were never resolved.
    pub fn workshop(&self) -> Result<&Path> {
        required("workshop", self.workshop.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the paths were never resolved.
    pub fn external_addons(&self) -> Result<&Path> {
        required("external_addons", self.external_addons.as_deref())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the paths were never resolved.
    pub fn keys(&self) -> Result<&Path> {
        required("keys", self.keys.as_deref())
    }
}

fn required<'a>(key: &str, path: Option<&'a Path>) -> Result<&'a Path> {
    path.ok_or_else(|| {
        ConfigError::MissingKey {
            section: "paths".to_string(),
            key: key.to_string(),
        }
        .into()
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        ConfigError::InvalidValue {
            section: "paths".to_string(),
            key: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
