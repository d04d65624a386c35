// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()   args, stdio, stdin (null | inherit)
//!   |
//!   v
//! spawn() --> run_child() --> exit code in success_codes?
//!   |
//!   v
//! ProcessOutput { exit_code, stderr }
//! ```

use crate::error::{A3Error, ProcessError, Result};
use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Full command line for logging, with secret arguments masked.
    pub fn command_line(&self) -> String {
        let mut cmd = self.program().display().to_string();
        for (index, arg) in self.args_slice().iter().enumerate() {
            let shown = if self.is_redacted(index) {
                "***"
            } else {
                arg.as_str()
            };
            if shown.contains(' ') {
                let _ = write!(cmd, " \"{shown}\"");
            } else {
                let _ = write!(cmd, " {shown}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a code outside the success set.
    /// - IO error occurs during output streaming.
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let mut child = command
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })
            .map_err(A3Error::from)?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child).await?;

        if !self.success_code_set().contains(&output.exit_code()) {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(A3Error::from(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            })
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if self.process_flags().contains(ProcessFlags::INTERACTIVE) {
            command.stdin(Stdio::inherit());
        } else {
            command.stdin(Stdio::null());
        }

        command.stdout(Self::stdio_from_flags(self.stdout_config()));
        command.stderr(Self::stdio_from_flags(self.stderr_config()));
        command.kill_on_drop(true);

        command
    }

    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else {
            Stdio::piped()
        }
    }
}
