// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the default update run.

use clap::Args;

use crate::tools::steamcmd::SteamCredentials;

#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    /// Validate apps and workshop items (default).
    #[arg(long = "validate", overrides_with = "no_validate")]
    pub validate: bool,

    /// Skip SteamCMD validation.
    #[arg(long = "no-validate", overrides_with = "validate")]
    pub no_validate: bool,

    /// Username used for Steam.
    #[arg(
        short = 'u',
        long = "username",
        env = "STEAM_USERNAME",
        default_value = SteamCredentials::ANONYMOUS
    )]
    pub username: String,

    /// Password used for Steam, prompted for when a named user has none.
    #[arg(
        short = 'p',
        long = "password",
        env = "STEAM_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Skips updating Arma and mods; links and publishers still run.
    #[arg(short = 'n', long = "no-update")]
    pub no_update: bool,

    /// Runs the interactive setup first.
    #[arg(short = 's', long = "setup")]
    pub setup: bool,
}

impl UpdateArgs {
    /// Whether SteamCMD should pass `validate`.
    ///
    /// `overrides_with` leaves at most one of the two flags set.
    #[must_use]
    pub const fn should_validate(&self) -> bool {
        self.validate || !self.no_validate
    }
}
