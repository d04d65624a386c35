// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                A3Error (8 bytes)
//!                       |
//!   +-------+-------+---+---+-------+------+
//!   |       |       |       |       |      |
//!   v       v       v       v       v      v
//! Catalog   Net    Cfg    Proc     Fs    Setup
//!   Box     Box    Box    Box      Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Catalog  MalformedResponse, MissingApiKey
//!   Network  Reqwest, HttpError, DownloadFailed, InvalidUrl
//!   Config   ParseError, MissingKey, InvalidValue
//!   Process  SpawnFailed, NonZeroExit, RetriesExhausted
//!   Fs       NotFound, WalkFailed
//!   Setup    MissingTool, NoInput
//!
//! All variants boxed => A3Error is one pointer plus tag.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`A3Error`].
pub type A3Result<T> = std::result::Result<T, A3Error>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum A3Error {
    /// Steam Web API returned something unusable.
    #[error("catalog error: {0}")]
    Catalog(#[from] Box<CatalogError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Interactive setup error.
    #[error("setup error: {0}")]
    Setup(#[from] Box<SetupError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for A3Error {
                fn from(err: $error) -> Self {
                    A3Error::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    CatalogError => Catalog,
    NetworkError => Network,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    SetupError => Setup,
}

// --- Catalog Errors ---

/// Steam Web API payload errors.
///
/// A missing envelope or a short result list is *not* an error; the resolver
/// logs those and carries on with the partial data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The response body could not be decoded as JSON.
    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    /// No API key was configured.
    #[error("no Steam Web API key configured")]
    MissingApiKey,
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Every attempt of a retried command failed.
    #[error("'{command}' failed after {attempts} attempts")]
    RetriesExhausted { command: String, attempts: u32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Some entries below `path` could not be read during a walk.
    #[error("{errors} unreadable entries below '{path}'")]
    WalkFailed { path: String, errors: usize },
}

// --- Setup Errors ---

/// First-run setup errors.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A third-party tool required by the chosen options is unavailable.
    #[error("{tool} is required but was not found: {hint}")]
    MissingTool { tool: String, hint: String },

    /// Stdin closed while a question was pending.
    #[error("no answer given for '{question}'")]
    NoInput { question: String },
}

#[cfg(test)]
mod tests;
