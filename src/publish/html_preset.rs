// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arma 3 Launcher preset (`Mods / Preset / Import`).

use anyhow::Context;
use handlebars::Handlebars;
use serde::Serialize;
use tokio::fs;
use tracing::info;

use super::Publisher;
use crate::config::Config;
use crate::error::Result;
use crate::mods::ModDescriptor;
use crate::tools::{BoxFuture, ToolContext};

const TEMPLATE: &str = include_str!("preset.html.hbs");

/// Value of the `arma:Type` meta tag.
const PRESET_TYPE: &str = "Modpack";

#[derive(Debug, Serialize)]
struct PresetData<'a> {
    preset_type: &'static str,
    name: &'a str,
    mods: Vec<PresetMod<'a>>,
}

#[derive(Debug, Serialize)]
struct PresetMod<'a> {
    name: &'a str,
    url: String,
}

/// Renders the preset HTML. Display names are HTML-escaped.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_preset(name: &str, mods: &[ModDescriptor]) -> Result<String> {
    let data = PresetData {
        preset_type: PRESET_TYPE,
        name,
        mods: mods
            .iter()
            .map(|m| PresetMod {
                name: m.name(),
                url: m.workshop_url(),
            })
            .collect(),
    };

    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .render_template(TEMPLATE, &data)
        .context("failed to render launcher preset")
}

/// Writes the launcher preset to `html_preset.path`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPresetPublisher;

impl HtmlPresetPublisher {
    async fn run(ctx: &ToolContext, mods: &[ModDescriptor]) -> Result<()> {
        let preset = &ctx.config().html_preset;
        let path = preset.path()?;
        let html = render_preset(preset.name()?, mods)?;

        if ctx.is_dry_run() {
            info!(
                path = %path.display(),
                mods = mods.len(),
                "[dry-run] Would write launcher preset"
            );
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(path, html)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!(path = %path.display(), mods = mods.len(), "launcher preset written");
        Ok(())
    }
}

impl Publisher for HtmlPresetPublisher {
    fn name(&self) -> &'static str {
        "html_preset"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.html_preset.active
    }

    fn publish<'a>(
        &'a self,
        ctx: &'a ToolContext,
        mods: &'a [ModDescriptor],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(Self::run(ctx, mods))
    }
}
