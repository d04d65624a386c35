// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Downstream artifacts regenerated after every mod update.
//!
//! ```text
//! [ModDescriptor] --> ArmA3Sync   wipe @*  -> mirror -> java -jar <jar> -build <repo>
//!                 --> HtmlPreset  render preset.html.hbs -> <path>
//!                 --> Swifty      wipe @*  -> mirror -> [mono] swifty-cli create
//! ```
//!
//! Publishers run in that order and only when their section is `active`.

pub mod arma3sync;
pub mod html_preset;
pub mod swifty;

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::mods::ModDescriptor;
use crate::mods::mirror::mirror_tree;
use crate::tools::{BoxFuture, ToolContext};

pub use arma3sync::Arma3SyncPublisher;
pub use html_preset::HtmlPresetPublisher;
pub use swifty::SwiftyPublisher;

/// A consumer of the resolved mod set.
pub trait Publisher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the publisher's config section is active.
    fn enabled(&self, config: &Config) -> bool;

    fn publish<'a>(
        &'a self,
        ctx: &'a ToolContext,
        mods: &'a [ModDescriptor],
    ) -> BoxFuture<'a, Result<()>>;
}

/// All publishers, in the order they run.
#[must_use]
pub fn publishers() -> Vec<Box<dyn Publisher>> {
    vec![
        Box::new(Arma3SyncPublisher),
        Box::new(HtmlPresetPublisher),
        Box::new(SwiftyPublisher),
    ]
}

/// Runs every enabled publisher.
///
/// # Errors
///
/// Returns the first publisher error; later publishers do not run.
pub async fn publish_all(ctx: &ToolContext, mods: &[ModDescriptor]) -> Result<()> {
    for publisher in publishers() {
        if !publisher.enabled(ctx.config()) {
            continue;
        }
        info!(publisher = publisher.name(), mods = mods.len(), "publishing");
        publisher.publish(ctx, mods).await?;
    }
    Ok(())
}

/// Mirrors each mod's workshop download into `root/<folder name>`.
pub(crate) async fn mirror_mods(
    ctx: &ToolContext,
    mods: &[ModDescriptor],
    root: &Path,
) -> Result<()> {
    let workshop = ctx.config().paths.workshop()?;

    for descriptor in mods {
        let src = workshop.join(descriptor.id().to_string());
        let dst = root.join(descriptor.folder_name());

        if ctx.is_dry_run() {
            info!(
                src = %src.display(),
                dst = %dst.display(),
                "[dry-run] Would mirror mod"
            );
            continue;
        }

        mirror_tree(&src, &dst).await?;
    }
    Ok(())
}
