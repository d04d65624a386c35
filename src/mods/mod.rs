// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod descriptors and the on-disk republishing of downloaded mods.
//!
//! ```text
//! "ACE3 Compat - RHS"  --normalize_folder_name-->  "@ace3_compat_-_rhs"
//! "Addons/ACE_Main.PBO" --normalize_entry_name-->  "addons" / "ace_main.pbo"
//!
//! workshop/<id>/              install/@folder_name/
//!   Addons/                     addons/
//!     ACE_Main.PBO   <----        ace_main.pbo  (symlink)
//!   Keys/ACE_3.bikey <----    keys/ace_3.bikey  (symlink, handle_keys)
//! ```

pub mod keys;
pub mod mirror;


use anyhow::Context;
use regex::Regex;
use std::sync::OnceLock;

use crate::config::types::PublishedFileId;
use crate::error::Result;

/// Prefix Arma 3 expects on mod folders.
pub const MOD_PREFIX: char = '@';

/// Compiles `pattern` once and caches it in `cell`.
fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern)
        .with_context(|| format!("failed to compile file name pattern {pattern}"))?;
    Ok(cell.get_or_init(|| re))
}

fn invalid_chars() -> Result<&'static Regex> {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r#"[<>:"/\\|?*\x00-\x1f\x7f]"#)
}

fn whitespace_runs() -> Result<&'static Regex> {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r"\s+")
}

/// Turns a workshop title into the folder name a mod is published under.
///
/// Lowercases, collapses whitespace runs to `_`, replaces characters that are
/// invalid in file names with `_` and prefixes a single `@`. Applying it to
/// its own output returns the same string.
///
/// # Errors
///
/// Returns an error if the name patterns fail to compile.
pub fn normalize_folder_name(display_name: &str) -> Result<String> {
    let lower = display_name.trim().to_lowercase();
    let spaced = whitespace_runs()?.replace_all(&lower, "_");
    let safe = invalid_chars()?.replace_all(&spaced, "_");
    Ok(format!("{MOD_PREFIX}{}", safe.trim_start_matches(MOD_PREFIX)))
}

/// Name of a single mirrored file or directory: lowercase, invalid characters
/// replaced, whitespace kept.
///
/// # Errors
///
/// Returns an error if the name pattern fails to compile.
pub fn normalize_entry_name(name: &str) -> Result<String> {
    Ok(invalid_chars()?
        .replace_all(&name.to_lowercase(), "_")
        .into_owned())
}

/// One workshop mod as resolved for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDescriptor {
    name: String,
    folder_name: String,
    id: PublishedFileId,
}

impl ModDescriptor {
    /// Builds a descriptor from the workshop title.
    ///
    /// A title that normalizes to a bare `@` falls back to `@<id>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name patterns fail to compile.
    pub fn new(name: impl Into<String>, id: PublishedFileId) -> Result<Self> {
        let name = name.into();
        let mut folder_name = normalize_folder_name(&name)?;
        if folder_name.len() == MOD_PREFIX.len_utf8() {
            folder_name = format!("{MOD_PREFIX}{id}");
        }
        Ok(Self {
            name,
            folder_name,
            id,
        })
    }

    /// Workshop title as shown to players.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory name under the install dir, e.g. `@cba_a3`.
    #[must_use]
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// Workshop item id.
    #[must_use]
    pub const fn id(&self) -> PublishedFileId {
        self.id
    }

    /// Steam Workshop page of this mod.
    #[must_use]
    pub fn workshop_url(&self) -> String {
        format!(
            "https://steamcommunity.com/sharedfiles/filedetails/?id={}",
            self.id
        )
    }
}
