// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Steam Workshop catalog: collection lookup and item details.
//!
//! ```text
//! [collection ids]
//!        |
//!        v
//! GetCollectionDetails ----> children
//!        ^                      |
//!        |  filetype 2          | filetype 0
//!        +----------------------+------------> [item ids] (dedup, first wins)
//!                                                   |
//!                                                   v
//!                                   GetPublishedFileDetails
//!                                                   |
//!                                                   v
//!                                          [ModDescriptor]
//! ```
//!
//! The [`Catalog`] trait is the seam between the resolver and HTTP;
//! [`SteamCatalog`] talks to the real Web API.

pub mod client;
pub mod resolver;

#[cfg(test)]
mod tests;

use futures_util::future::BoxFuture;
use serde::Deserialize;

use crate::config::types::PublishedFileId;
use crate::error::Result;

pub use client::SteamCatalog;
pub use resolver::{resolve_collections, resolve_mods};

/// Child `filetype` of a plain workshop item.
pub const FILETYPE_ITEM: u32 = 0;
/// Child `filetype` of a nested collection.
pub const FILETYPE_COLLECTION: u32 = 2;

/// `{"response": {...}}` wrapper every Web API reply comes in.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub response: Option<T>,
}

/// Payload of `ISteamRemoteStorage/GetCollectionDetails`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionDetailsResponse {
    #[serde(default)]
    pub resultcount: usize,
    #[serde(default)]
    pub collectiondetails: Vec<CollectionDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDetails {
    pub publishedfileid: PublishedFileId,
    #[serde(default)]
    pub result: i32,
    #[serde(default)]
    pub children: Vec<CollectionChild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionChild {
    pub publishedfileid: PublishedFileId,
    #[serde(default)]
    pub sortorder: u32,
    pub filetype: u32,
}

/// Payload of `ISteamRemoteStorage/GetPublishedFileDetails`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishedFileDetailsResponse {
    #[serde(default)]
    pub resultcount: usize,
    #[serde(default)]
    pub publishedfiledetails: Vec<PublishedFileDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishedFileDetails {
    pub publishedfileid: PublishedFileId,
    #[serde(default)]
    pub result: i32,
    /// Absent for deleted, hidden and failed entries.
    pub title: Option<String>,
}

/// Read access to the workshop catalog.
///
/// `Ok(None)` means the reply had no `response` envelope. Callers treat that
/// as an empty, partial answer rather than a failure.
pub trait Catalog: Send + Sync {
    fn collection_details<'a>(
        &'a self,
        ids: &'a [PublishedFileId],
    ) -> BoxFuture<'a, Result<Option<CollectionDetailsResponse>>>;

    fn published_file_details<'a>(
        &'a self,
        ids: &'a [PublishedFileId],
    ) -> BoxFuture<'a, Result<Option<PublishedFileDetailsResponse>>>;
}
