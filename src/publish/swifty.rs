// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Swifty repository builder.
//!
//! ```text
//! repo.json (basePath) --> wipe basePath/@*, basePath/optional/@*, output/*
//!                      --> mirror mods into basePath
//!                      --> [mono] swifty-cli create repo.json output
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use super::{Publisher, mirror_mods};
use crate::config::Config;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::mods::ModDescriptor;
use crate::mods::mirror::{clear_dir, remove_published_mods};
use crate::tools::{BoxFuture, ToolContext};

/// Mono runtime used to start `swifty-cli.exe` off Windows.
pub const MONO: &str = "mono";

/// Subdirectory of `basePath` holding optional mods.
pub const OPTIONAL_DIR: &str = "optional";

/// Swifty repository definition (`repo.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftyRepo {
    pub repo_name: String,
    pub base_path: PathBuf,
    #[serde(default)]
    pub icon_image_path: String,
    #[serde(default)]
    pub repo_image_path: String,
    #[serde(default)]
    pub client_parameters: String,
    #[serde(default)]
    pub repo_basic_authentication: BasicAuthentication,
    #[serde(default)]
    pub required_mods: Vec<ModPattern>,
    #[serde(default)]
    pub optional_mods: Vec<ModPattern>,
    #[serde(default)]
    pub servers: Vec<SwiftyServer>,
}

/// Empty strings mean no authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuthentication {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModPattern {
    pub mod_name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftyServer {
    pub name: String,
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub battle_eye: bool,
}

impl SwiftyRepo {
    /// A repository publishing every `@*` folder in `base_path` as required
    /// and every `optional/@*` folder as optional.
    #[must_use]
    pub fn new(repo_name: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_name: repo_name.into(),
            base_path: base_path.into(),
            icon_image_path: "icon.png".to_string(),
            repo_image_path: "repo.png".to_string(),
            client_parameters: "-skipIntro".to_string(),
            repo_basic_authentication: BasicAuthentication::default(),
            required_mods: vec![ModPattern {
                mod_name: "@*".to_string(),
                enabled: true,
            }],
            optional_mods: vec![ModPattern {
                mod_name: format!("{OPTIONAL_DIR}/@*"),
                enabled: false,
            }],
            servers: Vec::new(),
        }
    }

    /// Reads `repo.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a repo definition.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid Swifty repo definition {}", path.display()))
    }

    /// Pretty-printed JSON as written by the setup wizard.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn optional_path(&self) -> PathBuf {
        self.base_path.join(OPTIONAL_DIR)
    }
}

/// Rebuilds the Swifty repository from the current mod set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftyPublisher;

impl SwiftyPublisher {
    /// `[mono] <cli> create <repo.json> <output>`
    ///
    /// # Errors
    ///
    /// Returns an error if a `[swifty]` path is missing.
    pub fn build_command(config: &Config) -> Result<ProcessBuilder> {
        let cli = config.swifty.cli()?;
        let builder = if cfg!(windows) {
            ProcessBuilder::new(cli)
        } else {
            ProcessBuilder::new(MONO).arg(cli)
        };
        Ok(builder
            .name("swifty")
            .arg("create")
            .arg(config.swifty.repo_json()?)
            .arg(config.swifty.output()?)
            .inherit_stdio())
    }

    async fn run(ctx: &ToolContext, mods: &[ModDescriptor]) -> Result<()> {
        let config = ctx.config();
        let repo = SwiftyRepo::load(config.swifty.repo_json()?).await?;
        let output = config.swifty.output()?;
        let build = Self::build_command(config)?;

        if ctx.is_dry_run() {
            info!(
                base = %repo.base_path.display(),
                output = %output.display(),
                "[dry-run] Would clear Swifty repository"
            );
        } else {
            remove_published_mods(&repo.base_path).await?;
            remove_published_mods(&repo.optional_path()).await?;
            clear_dir(output).await?;
        }

        mirror_mods(ctx, mods, &repo.base_path).await?;

        if ctx.is_dry_run() {
            info!(cmd = %build.command_line(), "[dry-run] Would build Swifty repository");
            return Ok(());
        }

        build.run().await?;
        info!(repo = %repo.repo_name, output = %output.display(), "Swifty repository built");
        Ok(())
    }
}

impl Publisher for SwiftyPublisher {
    fn name(&self) -> &'static str {
        "swifty"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.swifty.active
    }

    fn publish<'a>(
        &'a self,
        ctx: &'a ToolContext,
        mods: &'a [ModDescriptor],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(Self::run(ctx, mods))
    }
}
