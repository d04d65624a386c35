// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive first-run setup.
//!
//! ```text
//! SteamCMD dir -> server dir -> mod dir -> external addon dir
//!   -> CDLC ids -> collection ids -> handle keys -> API key
//!   -> [ArmA3Sync] -> [Swifty] -> [HTML preset]
//!   -> create directories -> write a3update.toml (atomic)
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::info;

use crate::cli::prompt::{Prompter, ask_existing_file, ask_list, ask_parsed};
use crate::config::Config;
use crate::config::types::{A3SyncConfig, HtmlPresetConfig, SwiftyConfig};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{A3Result, Result, SetupError};
use crate::publish::arma3sync::JAVA;
use crate::publish::swifty::{MONO, SwiftyRepo, SwiftyServer};

const DEFAULT_STEAMCMD_DIR: &str = "SteamCMD";
const DEFAULT_INSTALL_DIR: &str = "server";
const DEFAULT_MODS_DIR: &str = "mods";
const DEFAULT_EXTERNAL_DIR: &str = "mods/external";
const DEFAULT_SERVER_PORT: &str = "2302";

/// Returns `path` if it exists, otherwise offers to create it through the
/// wizard or asks for an existing file.
///
/// # Errors
///
/// Returns an error if the wizard fails or input ends.
pub async fn locate_config(path: &Path, prompter: &mut dyn Prompter) -> Result<PathBuf> {
    if fs::try_exists(path).await.unwrap_or(false) {
        return Ok(path.to_path_buf());
    }

    let question = format!(
        "No configuration found at {}, do you wish to create a new one?",
        path.display()
    );
    if prompter.confirm(&question, true)? {
        run_setup(path, prompter).await?;
        return Ok(path.to_path_buf());
    }

    ask_existing_file(prompter, "Enter path to a3update.toml", None)
}

/// Runs the wizard and writes the result to `path`.
///
/// # Errors
///
/// Returns an error if input ends, a required tool is missing, a directory
/// cannot be created or the file cannot be written.
pub async fn run_setup(path: &Path, prompter: &mut dyn Prompter) -> Result<Config> {
    let config = build_config(prompter).await?;
    write_config(&config, path)?;
    prompter.notice(&format!("Wrote configuration to {}", path.display()))?;
    info!(path = %path.display(), "configuration written");
    Ok(config)
}

/// Asks every question and creates the directories the answers name.
///
/// # Errors
///
/// See [`run_setup`].
pub async fn build_config(prompter: &mut dyn Prompter) -> Result<Config> {
    let mut config = Config::default();

    let steamcmd = ask_dir(prompter, "Enter install path for SteamCMD", DEFAULT_STEAMCMD_DIR)?;
    let install = ask_dir(prompter, "Enter install path for the Arma server", DEFAULT_INSTALL_DIR)?;
    let mods = ask_dir(prompter, "Enter Steam install path for mods", DEFAULT_MODS_DIR)?;
    let external = ask_dir(
        prompter,
        "Enter directory to search for external addons",
        DEFAULT_EXTERNAL_DIR,
    )?;

    config.steam.cdlc = ask_list(prompter, "List of CDLC app ids, separated by spaces")?;
    config.mods.collections = ask_list(prompter, "List of collections, separated by spaces")?;
    config.mods.handle_keys = prompter.confirm("Handle bikey files automatically?", false)?;
    config.steam.api_key = prompter.input(
        "Enter Steam API key (https://steamcommunity.com/dev/apikey)",
        None,
    )?;

    for dir in [&steamcmd, &install, &mods, &external] {
        create_dir(dir).await?;
    }

    config.a3sync = setup_a3sync(prompter).await?;
    config.swifty = setup_swifty(prompter, &mods).await?;
    config.html_preset = setup_html_preset(prompter)?;

    config.paths.steamcmd = Some(steamcmd);
    config.paths.install = Some(install);
    config.paths.mods = Some(mods);
    config.paths.external_addons = Some(external);

    Ok(config)
}

/// Looks up `tool` on `PATH`.
///
/// # Errors
///
/// Returns [`SetupError::MissingTool`] with `hint` if it is not found.
pub fn require_tool(tool: &str, hint: &str) -> A3Result<PathBuf> {
    ProcessBuilder::find(tool).ok_or_else(|| {
        SetupError::MissingTool {
            tool: tool.to_string(),
            hint: hint.to_string(),
        }
        .into()
    })
}

/// Writes `config` as TOML through a temporary file in the target directory.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub fn write_config(config: &Config, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    file.write_all(config.to_toml()?.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

async fn setup_a3sync(prompter: &mut dyn Prompter) -> Result<A3SyncConfig> {
    if !prompter.confirm("Use ArmA3Sync?", false)? {
        return Ok(A3SyncConfig::default());
    }

    let java = require_tool(JAVA, "ArmA3Sync needs a Java runtime on PATH")?;
    let jar = absolute(&ask_existing_file(prompter, "Enter path to ArmA3Sync.jar", None)?)?;

    if !prompter.confirm(
        "Have you created an ArmA3Sync repo? Answer no to open the ArmA3Sync console",
        true,
    )? {
        prompter.notice("When prompted select \"NEW\" from the list of options to create a new repo")?;
        ProcessBuilder::new(&java)
            .name("arma3sync")
            .arg("-jar")
            .arg(&jar)
            .arg("-console")
            .flag(ProcessFlags::INTERACTIVE)
            .inherit_stdio()
            .run()
            .await
            .context("ArmA3Sync console failed")?;
    }

    let repo_name = prompter.input("Enter ArmA3Sync repo name", None)?;
    let directory = ask_dir(prompter, "Enter path to the shared directory", "a3sync")?;
    create_dir(&directory).await?;

    Ok(A3SyncConfig {
        active: true,
        jar: Some(jar),
        repo_name: Some(repo_name),
        directory: Some(directory),
    })
}

async fn setup_swifty(prompter: &mut dyn Prompter, mods: &Path) -> Result<SwiftyConfig> {
    if !prompter.confirm("Use Swifty?", false)? {
        return Ok(SwiftyConfig::default());
    }

    if !cfg!(windows) {
        require_tool(MONO, "Swifty needs mono-complete off Windows")?;
    }

    let cli = absolute(&ask_existing_file(
        prompter,
        "Enter path to swifty-cli.exe",
        Some("swifty-cli.exe"),
    )?)?;
    let repo_json = absolute(Path::new(
        &prompter.input("Enter output path for the Swifty repo.json", Some("repo.json"))?,
    ))?;
    let output = ask_dir(prompter, "Enter output path for the repo", "swifty")?;
    create_dir(&output).await?;

    let base_path = mods.join("swifty");
    let mut repo = SwiftyRepo::new(prompter.input("Enter repo name", None)?, &base_path);
    create_dir(&repo.optional_path()).await?;

    repo.repo_basic_authentication.username =
        prompter.input("FTP username (leave blank if no authentication)", Some(""))?;
    repo.repo_basic_authentication.password =
        prompter.password("FTP password (leave blank if no authentication)")?;

    let servers: u32 = ask_parsed(prompter, "Number of servers to add", "0")?;
    for _ in 0..servers {
        repo.servers.push(SwiftyServer {
            name: prompter.input("Enter server name", None)?,
            address: prompter.input("Enter server address", None)?,
            port: ask_parsed(prompter, "Enter server port", DEFAULT_SERVER_PORT)?,
            password: prompter.input("Enter server password", Some(""))?,
            battle_eye: prompter.confirm("Use BattlEye?", false)?,
        });
    }

    if let Some(parent) = repo_json.parent() {
        create_dir(parent).await?;
    }
    fs::write(&repo_json, repo.to_json()?)
        .await
        .with_context(|| format!("failed to write {}", repo_json.display()))?;
    prompter.notice(&format!("Wrote Swifty configuration to {}", repo_json.display()))?;

    Ok(SwiftyConfig {
        active: true,
        cli: Some(cli),
        repo_json: Some(repo_json),
        output: Some(output),
    })
}

fn setup_html_preset(prompter: &mut dyn Prompter) -> Result<HtmlPresetConfig> {
    if !prompter.confirm("Generate an Arma 3 Launcher preset?", false)? {
        return Ok(HtmlPresetConfig::default());
    }

    let name = prompter.input("Enter preset name", None)?;
    let default = absolute(Path::new(&default_preset_file(&name)))?;
    let path = absolute(Path::new(&prompter.input(
        "Enter output path for the preset .html",
        Some(&default.display().to_string()),
    )?))?;

    Ok(HtmlPresetConfig {
        active: true,
        path: Some(path),
        name: Some(name),
    })
}

/// `My Modpack` -> `my_modpack.html`
#[must_use]
pub fn default_preset_file(name: &str) -> String {
    format!("{}.html", name.to_lowercase().replace(' ', "_"))
}

fn ask_dir(prompter: &mut dyn Prompter, question: &str, default: &str) -> Result<PathBuf> {
    let path = prompter.path(question, default)?;
    absolute(&path)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("invalid path {}", path.display()))
}

async fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create directory {}", dir.display()))
}
