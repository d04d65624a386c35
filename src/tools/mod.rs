// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool abstractions for external programs.
//!
//! ```text
//! cmd::update --> ToolContext --> Tool::run --> ProcessBuilder
//!                  (config, dry-run)            steamcmd, java, mono
//! ```

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;

pub mod steamcmd;

pub use futures_util::future::BoxFuture;

/// Context provided to tools and publishers during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// When true, tools log what they would do without making changes.
    dry_run: bool,

    config: Arc<Config>,
}

impl ToolContext {
    #[must_use]
    pub const fn new(config: Arc<Config>, dry_run: bool) -> Self {
        Self { dry_run, config }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// An operation backed by an external program.
///
/// Implementations respect [`ToolContext::is_dry_run`] and only log the
/// command they would run.
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "steamcmd").
    fn name(&self) -> &'static str;

    /// Executes the tool's operation.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
