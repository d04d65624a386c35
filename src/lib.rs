// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!          args, prompts       update / setup / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, A3UPDATE_* env    |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             catalog       tools    publish
//!           Steam Web API  SteamCMD  ArmA3Sync / preset / Swifty
//!                 |           |        |
//!                 +-----+-----+--------+
//!                       v
//!                     mods   names, mirror, keys
//!
//!   +-----------------------------------------+
//!   |  core   process builder/runner, net     |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod catalog;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod mods;
pub mod net;
pub mod publish;
pub mod tools;
pub mod utility;
