// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! SteamCMD driver.
//!
//! ```text
//! Bootstrap         download archive --> tar -xf --> steamcmd +quit
//! Login             steamcmd +login <user> [***] +quit
//! AppUpdate         steamcmd +force_install_dir <install> +login ..
//!                            +app_update <appid> [validate] +quit
//! WorkshopDownload  steamcmd +force_install_dir <mods> +login ..
//!                            +workshop_download_item <game> <id> [validate] +quit
//! ```
//!
//! Every run except the bootstrap is attempted up to `steam.retries` times.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::{debug, info, warn};

use super::{BoxFuture, Tool, ToolContext};
use crate::config::types::PublishedFileId;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{A3Error, ProcessError, Result};
use crate::net::Downloader;

/// Valve's CDN directory holding the SteamCMD installers.
pub const INSTALLER_BASE_URL: &str = "https://steamcdn-a.akamaihd.net/client/installer/";

#[cfg(windows)]
const EXECUTABLE: &str = "steamcmd.exe";
#[cfg(not(windows))]
const EXECUTABLE: &str = "steamcmd.sh";

#[cfg(windows)]
const ARCHIVE: &str = "steamcmd.zip";
#[cfg(not(windows))]
const ARCHIVE: &str = "steamcmd_linux.tar.gz";

/// SteamCMD exits with 7 after it updated itself on first start.
const SELF_UPDATE_EXIT_CODE: i32 = 7;

/// Path of the SteamCMD entry point inside `dir`.
#[must_use]
pub fn executable(dir: &Path) -> PathBuf {
    dir.join(EXECUTABLE)
}

/// Steam account used for `+login`.
#[derive(Clone, PartialEq, Eq)]
pub struct SteamCredentials {
    username: String,
    password: Option<String>,
}

impl SteamCredentials {
    pub const ANONYMOUS: &'static str = "anonymous";

    #[must_use]
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password: password.filter(|p| !p.is_empty()),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Self::ANONYMOUS, None)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.username.eq_ignore_ascii_case(Self::ANONYMOUS)
    }

    #[must_use]
    pub const fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

impl std::fmt::Debug for SteamCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Default for SteamCredentials {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteamCmdOperation {
    /// Install SteamCMD if its executable is missing.
    #[default]
    Bootstrap,
    /// Log in once so cached credentials and Steam Guard are settled.
    Login,
    AppUpdate {
        app_id: u32,
    },
    WorkshopDownload {
        item: PublishedFileId,
    },
}

#[derive(Debug, Clone)]
pub struct SteamCmdTool {
    credentials: SteamCredentials,
    validate: bool,
    operation: SteamCmdOperation,
}

impl SteamCmdTool {
    #[must_use]
    pub fn new(credentials: SteamCredentials) -> Self {
        Self {
            credentials,
            validate: true,
            operation: SteamCmdOperation::Bootstrap,
        }
    }

    #[must_use]
    pub const fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    #[must_use]
    pub const fn bootstrap_op(mut self) -> Self {
        self.operation = SteamCmdOperation::Bootstrap;
        self
    }

    #[must_use]
    pub const fn login_op(mut self) -> Self {
        self.operation = SteamCmdOperation::Login;
        self
    }

    #[must_use]
    pub const fn app_update_op(mut self, app_id: u32) -> Self {
        self.operation = SteamCmdOperation::AppUpdate { app_id };
        self
    }

    #[must_use]
    pub const fn workshop_download_op(mut self, item: PublishedFileId) -> Self {
        self.operation = SteamCmdOperation::WorkshopDownload { item };
        self
    }

    #[must_use]
    pub const fn operation(&self) -> SteamCmdOperation {
        self.operation
    }

    fn with_login(&self, builder: ProcessBuilder) -> ProcessBuilder {
        let builder = builder.arg("+login").arg(&self.credentials.username);
        match &self.credentials.password {
            Some(password) => builder.secret_arg(password),
            None => builder,
        }
    }

    /// Builds the SteamCMD invocation for the current operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a required `[paths]` entry is missing.
    pub fn command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let config = ctx.config();
        let steamcmd = executable(config.paths.steamcmd()?);
        let base = ProcessBuilder::new(&steamcmd).name("steamcmd").inherit_stdio();

        let builder = match self.operation {
            SteamCmdOperation::Bootstrap => base
                .arg("+quit")
                .success_codes([0, SELF_UPDATE_EXIT_CODE]),
            SteamCmdOperation::Login => self
                .with_login(base.flag(ProcessFlags::INTERACTIVE))
                .arg("+quit"),
            SteamCmdOperation::AppUpdate { app_id } => {
                let builder = base
                    .arg("+force_install_dir")
                    .arg(config.paths.install()?);
                let builder = self
                    .with_login(builder)
                    .arg("+app_update")
                    .arg(app_id.to_string());
                self.finish(builder)
            }
            SteamCmdOperation::WorkshopDownload { item } => {
                let builder = base
                    .arg("+force_install_dir")
                    .arg(config.paths.mods()?);
                let builder = self
                    .with_login(builder)
                    .arg("+workshop_download_item")
                    .arg(config.steam.game_appid.to_string())
                    .arg(item.to_string());
                self.finish(builder)
            }
        };
        Ok(builder)
    }

    fn finish(&self, builder: ProcessBuilder) -> ProcessBuilder {
        let builder = if self.validate {
            builder.arg("validate")
        } else {
            builder
        };
        builder.arg("+quit")
    }

    async fn do_bootstrap(&self, ctx: &ToolContext) -> Result<()> {
        let dir = ctx.config().paths.steamcmd()?;
        let steamcmd = executable(dir);

        if fs::try_exists(&steamcmd).await.unwrap_or(false) {
            debug!(path = %steamcmd.display(), "SteamCMD already installed");
            return Ok(());
        }

        let url = format!("{INSTALLER_BASE_URL}{ARCHIVE}");
        let archive = dir.join(ARCHIVE);

        if ctx.is_dry_run() {
            info!(
                url = %url,
                dir = %dir.display(),
                "[dry-run] Would install SteamCMD"
            );
            return Ok(());
        }

        info!(dir = %dir.display(), "installing SteamCMD");
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create directory {}", dir.display()))?;

        Downloader::new().url(&url).file(&archive).download().await?;

        ProcessBuilder::new("tar")
            .arg("-xf")
            .arg(&archive)
            .arg("-C")
            .arg(dir)
            .capture_stderr()
            .run()
            .await
            .context("failed to unpack SteamCMD")?;

        fs::remove_file(&archive)
            .await
            .with_context(|| format!("failed to remove {}", archive.display()))?;

        self.command(ctx)?
            .run()
            .await
            .context("SteamCMD first start failed")?;

        info!(path = %steamcmd.display(), "SteamCMD installed");
        Ok(())
    }

    async fn do_retried(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.command(ctx)?;

        if ctx.is_dry_run() {
            info!(cmd = %builder.command_line(), "[dry-run] Would run SteamCMD");
            return Ok(());
        }

        run_with_retries(&builder, ctx.config().steam.retries).await
    }
}

/// Runs `builder` until it succeeds, at most `attempts` times.
///
/// # Errors
///
/// Returns [`ProcessError::RetriesExhausted`] if every attempt failed.
pub async fn run_with_retries(builder: &ProcessBuilder, attempts: u32) -> Result<()> {
    let command = builder.command_line();
    let attempts = attempts.max(1);

    for attempt in 1..=attempts {
        match builder.clone().run().await {
            Ok(_) => return Ok(()),
            Err(e) => warn!(
                attempt,
                attempts,
                cmd = %command,
                error = %e,
                "SteamCMD attempt failed"
            ),
        }
    }

    Err(A3Error::from(ProcessError::RetriesExhausted { command, attempts }).into())
}

impl Tool for SteamCmdTool {
    fn name(&self) -> &'static str {
        "steamcmd"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                SteamCmdOperation::Bootstrap => self.do_bootstrap(ctx).await,
                SteamCmdOperation::Login
                | SteamCmdOperation::AppUpdate { .. }
                | SteamCmdOperation::WorkshopDownload { .. } => self.do_retried(ctx).await,
            }
        })
    }
}
