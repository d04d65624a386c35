// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update command implementation.
//!
//! ```text
//! config --> SteamCMD bootstrap + login
//!        --> app_update server, CDLC          (unless --no-update)
//!        --> clear key links                  (mods.handle_keys)
//!        --> collections -> items -> mods
//!        --> per mod: download, mirror, keys
//!        --> publishers
//! ```

use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::{Catalog, SteamCatalog, resolve_collections, resolve_mods};
use crate::cli::global::GlobalOptions;
use crate::cli::prompt::Prompter;
use crate::cli::update::UpdateArgs;
use crate::cmd::setup::{locate_config, run_setup};
use crate::config::Config;
use crate::error::Result;
use crate::mods::ModDescriptor;
use crate::mods::keys::{clear_key_links, link_keys};
use crate::mods::mirror::mirror_tree;
use crate::publish::publish_all;
use crate::tools::steamcmd::{SteamCmdTool, SteamCredentials};
use crate::tools::{Tool, ToolContext};

/// Switches of one update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    pub validate: bool,
    pub no_update: bool,
}

impl From<&UpdateArgs> for UpdateOptions {
    fn from(args: &UpdateArgs) -> Self {
        Self {
            validate: args.should_validate(),
            no_update: args.no_update,
        }
    }
}

/// Main handler for the default command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be found, loaded or
/// validated, or if any step of the run fails.
pub async fn run_update_command(
    args: &UpdateArgs,
    global: &GlobalOptions,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let config_path = if args.setup {
        run_setup(&global.config, prompter).await?;
        global.config.clone()
    } else {
        locate_config(&global.config, prompter).await?
    };

    let config = Config::from_file(&config_path)?;
    let credentials = resolve_credentials(args, prompter)?;
    let catalog = SteamCatalog::from_config(&config.steam)?;
    let ctx = ToolContext::new(Arc::new(config), global.dry);

    let mods = run_update(&ctx, &credentials, UpdateOptions::from(args), &catalog).await?;
    info!(mods = mods.len(), "Finished");
    Ok(())
}

/// Credentials from the command line, asking for the password of a named
/// account that has none.
///
/// # Errors
///
/// Returns an error if the password prompt gets no answer.
pub fn resolve_credentials(
    args: &UpdateArgs,
    prompter: &mut dyn Prompter,
) -> Result<SteamCredentials> {
    let credentials = SteamCredentials::new(&args.username, args.password.clone());
    if credentials.is_anonymous() || credentials.has_password() {
        return Ok(credentials);
    }

    let password = prompter.password(&format!("Steam password for {}", args.username))?;
    Ok(SteamCredentials::new(&args.username, Some(password)))
}

/// Runs the update sequence and returns the mods that were processed.
///
/// # Errors
///
/// Returns the first SteamCMD, catalog, filesystem or publisher error.
pub async fn run_update(
    ctx: &ToolContext,
    credentials: &SteamCredentials,
    options: UpdateOptions,
    catalog: &dyn Catalog,
) -> Result<Vec<ModDescriptor>> {
    let config = ctx.config();
    let steamcmd = SteamCmdTool::new(credentials.clone()).validate(options.validate);

    info!("Checking SteamCMD install");
    steamcmd.clone().bootstrap_op().run(ctx).await?;
    steamcmd.clone().login_op().run(ctx).await?;

    if !options.no_update {
        info!("Updating apps");
        let app_ids = std::iter::once(config.steam.server_appid)
            .chain(config.steam.cdlc.iter().copied());
        for app_id in app_ids {
            info!(app_id, "updating app");
            steamcmd.clone().app_update_op(app_id).run(ctx).await?;
        }
    }

    let handle_keys = config.mods.handle_keys;
    let keys_dir = config.paths.keys()?;
    if handle_keys {
        if ctx.is_dry_run() {
            info!(dir = %keys_dir.display(), "[dry-run] Would remove key links");
        } else {
            let removed = clear_key_links(keys_dir).await?;
            info!(removed, dir = %keys_dir.display(), "removed key links");
        }
    }

    info!("Updating mods");
    let items = resolve_collections(catalog, &config.mods.collections).await?;
    let mods = resolve_mods(catalog, &items).await?;

    let install = config.paths.install()?;
    let workshop = config.paths.workshop()?;

    for descriptor in &mods {
        info!(
            name = descriptor.name(),
            id = %descriptor.id(),
            "updating mod"
        );

        if !options.no_update {
            steamcmd
                .clone()
                .workshop_download_op(descriptor.id())
                .run(ctx)
                .await?;
        }

        let src = workshop.join(descriptor.id().to_string());
        let dst = install.join(descriptor.folder_name());

        if ctx.is_dry_run() {
            info!(
                src = %src.display(),
                dst = %dst.display(),
                "[dry-run] Would mirror mod"
            );
            continue;
        }

        mirror_tree(&src, &dst).await?;

        if handle_keys {
            let report = link_keys(&src, keys_dir).await?;
            if report.is_empty() {
                warn!(name = descriptor.name(), "no bikeys found");
            }
        }
    }

    publish_all(ctx, &mods).await?;
    Ok(mods)
}
