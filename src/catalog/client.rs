// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Steam Web API client for `ISteamRemoteStorage`.

use futures_util::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::{Catalog, CollectionDetailsResponse, Envelope, PublishedFileDetailsResponse};
use crate::config::types::{PublishedFileId, SteamConfig};
use crate::error::{A3Result, CatalogError, NetworkError, Result};
use crate::net::global_client;

const COLLECTION_DETAILS: &str = "ISteamRemoteStorage/GetCollectionDetails/v1/";
const PUBLISHED_FILE_DETAILS: &str = "ISteamRemoteStorage/GetPublishedFileDetails/v1/";

/// [`Catalog`] backed by the Steam Web API.
#[derive(Debug, Clone)]
pub struct SteamCatalog {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SteamCatalog {
    /// Creates a client for `base_url` (e.g. `https://api.steampowered.com`).
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: global_client().clone(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Creates a client from the `[steam]` section.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingApiKey`] if no key is configured.
    pub fn from_config(steam: &SteamConfig) -> A3Result<Self> {
        if steam.api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey.into());
        }
        Ok(Self::new(&steam.api_url, &steam.api_key))
    }

    fn endpoint(&self, method: &str) -> A3Result<Url> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|url| url.join(method))
            .map_err(|e| NetworkError::InvalidUrl(format!("{base}{method}: {e}")).into())
    }

    /// Form body `key=..&<count_field>=N&publishedfileids[i]=..`.
    fn form_body(&self, url: &Url, count_field: &str, ids: &[PublishedFileId]) -> String {
        let mut encoder = url.clone();
        encoder.set_query(None);
        {
            let mut pairs = encoder.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair(count_field, &ids.len().to_string());
            for (i, id) in ids.iter().enumerate() {
                pairs.append_pair(&format!("publishedfileids[{i}]"), &id.to_string());
            }
        }
        encoder.query().unwrap_or_default().to_string()
    }

    async fn post<T: DeserializeOwned>(
        &self,
        method: &str,
        count_field: &str,
        ids: &[PublishedFileId],
    ) -> A3Result<Option<T>> {
        let url = self.endpoint(method)?;
        debug!(endpoint = method, count = ids.len(), "querying Steam Web API");

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(self.form_body(&url, count_field, ids))
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response.text().await.map_err(NetworkError::Reqwest)?;
        trace!(endpoint = method, body = %body, "response");

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| CatalogError::MalformedResponse {
                endpoint: method.to_string(),
                message: e.to_string(),
            })?;
        Ok(envelope.response)
    }
}

impl Catalog for SteamCatalog {
    fn collection_details<'a>(
        &'a self,
        ids: &'a [PublishedFileId],
    ) -> BoxFuture<'a, Result<Option<CollectionDetailsResponse>>> {
        Box::pin(async move {
            Ok(self
                .post(COLLECTION_DETAILS, "collectioncount", ids)
                .await?)
        })
    }

    fn published_file_details<'a>(
        &'a self,
        ids: &'a [PublishedFileId],
    ) -> BoxFuture<'a, Result<Option<PublishedFileDetailsResponse>>> {
        Box::pin(async move {
            Ok(self
                .post(PUBLISHED_FILE_DETAILS, "itemcount", ids)
                .await?)
        })
    }
}
