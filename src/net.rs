// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP plumbing shared by the SteamCMD bootstrap and the Steam Web API client.
//!
//! ```text
//! global_client()  OnceLock<reqwest::Client>, keep-alive pool
//!        |
//!        +--> catalog::SteamCatalog   (POST form, JSON)
//!        |
//!        +--> Downloader::new()
//!               .url() .file() .silent()
//!               .download()
//!                  |
//!                  v
//!             Bar     [#####>    ] 2MiB/4MiB
//!             Spinner * 2MiB @ 1MiB/s
//!             Silent  (tests)
//! ```

use crate::error::{A3Result, NetworkError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::OnceLock;
use tokio::io::AsyncWriteExt;

/// Removes a partially written file on drop unless [`keep`](Self::keep) was called.
struct PartialFileGuard {
    path: PathBuf,
    keep: bool,
}

impl PartialFileGuard {
    const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Process-wide HTTP client.
///
/// Falls back to a default client if the configured one cannot be built.
pub fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("a3update-rs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} @ {binary_bytes_per_sec} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bytes} @ {binary_bytes_per_sec}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
        })
        .clone()
}

/// Async HTTP file downloader.
///
/// # Example
/// ```ignore
/// use a3update::net::Downloader;
///
/// Downloader::new()
///     .url("https://steamcdn-a.akamaihd.net/client/installer/steamcmd_linux.tar.gz")
///     .file("/srv/steamcmd/steamcmd_linux.tar.gz")
///     .download()
///     .await?;
/// ```
pub struct Downloader {
    client: Client,
    url: Option<String>,
    output_file: Option<PathBuf>,
    show_progress: bool,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            url: None,
            output_file: None,
            show_progress: true,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Disable the progress bar.
    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.show_progress = false;
        self
    }

    fn create_progress_bar(&self, total_size: u64) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        if total_size == 0 {
            let pb = ProgressBar::new_spinner();
            pb.set_style(spinner_style());
            Some(pb)
        } else {
            let pb = ProgressBar::new(total_size);
            pb.set_style(bar_style());
            Some(pb)
        }
    }

    /// Download to the configured file.
    ///
    /// The file is removed again if the transfer fails part way.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No URL or output file is configured.
    /// - The request fails or returns a non-success status code.
    /// - The output file cannot be created or written to.
    pub async fn download(&self) -> A3Result<()> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| NetworkError::InvalidUrl("no URL provided".to_string()))?;
        let output = self
            .output_file
            .as_ref()
            .ok_or_else(|| NetworkError::DownloadFailed {
                url: url.clone(),
                message: "no output file specified".to_string(),
            })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.clone(),
            }
            .into());
        }

        let total_size = response.content_length().unwrap_or(0);
        let progress_bar = self.create_progress_bar(total_size);

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!(
                        "failed to create parent directory {}: {e}",
                        parent.display()
                    ),
                })?;
        }

        let mut file =
            tokio::fs::File::create(output)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to create output file {}: {e}", output.display()),
                })?;

        let mut guard = PartialFileGuard::new(output.clone());
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(NetworkError::Reqwest)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to write to {}: {e}", output.display()),
                })?;

            if let Some(pb) = &progress_bar {
                pb.inc(chunk.len() as u64);
            }
        }

        file.flush()
            .await
            .map_err(|e| NetworkError::DownloadFailed {
                url: url.clone(),
                message: format!("failed to flush {}: {e}", output.display()),
            })?;

        guard.keep();

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        Ok(())
    }
}
