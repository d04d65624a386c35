// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! ArmA3Sync repository builder.

use tracing::info;

use super::{Publisher, mirror_mods};
use crate::config::Config;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::mods::ModDescriptor;
use crate::mods::mirror::remove_published_mods;
use crate::tools::{BoxFuture, ToolContext};

/// Java launcher used for the ArmA3Sync jar.
pub const JAVA: &str = "java";

/// Rebuilds the ArmA3Sync repository from the current mod set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arma3SyncPublisher;

impl Arma3SyncPublisher {
    /// `java -jar <jar> -build <repo name>`
    ///
    /// # Errors
    ///
    /// Returns an error if `a3sync.jar` or `a3sync.repo_name` is missing.
    pub fn build_command(config: &Config) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(JAVA)
            .name("arma3sync")
            .arg("-jar")
            .arg(config.a3sync.jar()?)
            .arg("-build")
            .arg(config.a3sync.repo_name()?)
            .inherit_stdio())
    }

    async fn run(ctx: &ToolContext, mods: &[ModDescriptor]) -> Result<()> {
        let config = ctx.config();
        let directory = config.a3sync.directory()?;
        let build = Self::build_command(config)?;

        if ctx.is_dry_run() {
            info!(
                directory = %directory.display(),
                "[dry-run] Would remove published mods"
            );
        } else {
            remove_published_mods(directory).await?;
        }

        mirror_mods(ctx, mods, directory).await?;

        if ctx.is_dry_run() {
            info!(cmd = %build.command_line(), "[dry-run] Would build ArmA3Sync repository");
            return Ok(());
        }

        build.run().await?;
        info!(repo = config.a3sync.repo_name()?, "ArmA3Sync repository built");
        Ok(())
    }
}

impl Publisher for Arma3SyncPublisher {
    fn name(&self) -> &'static str {
        "arma3sync"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.a3sync.active
    }

    fn publish<'a>(
        &'a self,
        ctx: &'a ToolContext,
        mods: &'a [ModDescriptor],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(Self::run(ctx, mods))
    }
}
