// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   (none) update | Version | Options
//! ```

use std::process::ExitCode;

use a3update::cli::global::GlobalOptions;
use a3update::cli::prompt::LinePrompter;
use a3update::cli::{self, Command};
use a3update::cmd::config::{run_options_command, run_version_command};
use a3update::cmd::update::run_update_command;
use a3update::config::Config;
use a3update::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let _log_guard = match init_logging(&cli.global.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            run_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        None => {
            let mut prompter = LinePrompter::stdio();
            run_update_command(&cli.update, &cli.global, &mut prompter).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(global: &GlobalOptions) -> a3update::error::Result<Config> {
    Config::from_file(&global.config).map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
