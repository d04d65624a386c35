// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use futures_util::future::BoxFuture;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::{Catalog, FILETYPE_COLLECTION, FILETYPE_ITEM};
use crate::config::types::PublishedFileId;
use crate::error::Result;
use crate::mods::ModDescriptor;

/// Accumulated state of one resolution run.
#[derive(Default)]
struct Resolution {
    items: Vec<PublishedFileId>,
    seen_items: HashSet<PublishedFileId>,
    expanded: HashSet<PublishedFileId>,
}

impl Resolution {
    fn push_item(&mut self, id: PublishedFileId) {
        if self.seen_items.insert(id) {
            self.items.push(id);
        }
    }
}

/// Expands `collections` into the flat list of workshop item ids they
/// contain, recursing into nested collections.
///
/// Items keep the order in which they were first discovered; later
/// occurrences are dropped. A collection already expanded in this run is
/// skipped with a warning, so cyclic catalogs terminate.
///
/// # Errors
///
/// Returns an error if a catalog request fails.
pub async fn resolve_collections(
    catalog: &dyn Catalog,
    collections: &[PublishedFileId],
) -> Result<Vec<PublishedFileId>> {
    let mut state = Resolution::default();
    let mut requested = HashSet::new();
    let roots: Vec<_> = collections
        .iter()
        .copied()
        .filter(|id| requested.insert(*id))
        .collect();

    if !roots.is_empty() {
        expand(catalog, roots, &mut state).await?;
    }
    Ok(state.items)
}

fn expand<'a>(
    catalog: &'a dyn Catalog,
    ids: Vec<PublishedFileId>,
    state: &'a mut Resolution,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(async move {
        let Some(response) = catalog.collection_details(&ids).await? else {
            warn!(
                collections = ?ids,
                "collection details reply has no response envelope"
            );
            return Ok(());
        };

        if response.collectiondetails.len() < ids.len() {
            warn!(
                requested = ids.len(),
                received = response.collectiondetails.len(),
                "collection details reply is incomplete"
            );
        }

        for collection in response.collectiondetails {
            // A root nested in an earlier root was already expanded in place.
            if !state.expanded.insert(collection.publishedfileid) {
                debug!(collection = %collection.publishedfileid, "collection already expanded");
                continue;
            }
            info!(collection = %collection.publishedfileid, "processing collection");

            for child in collection.children {
                match child.filetype {
                    FILETYPE_ITEM => state.push_item(child.publishedfileid),
                    FILETYPE_COLLECTION => {
                        if state.expanded.contains(&child.publishedfileid) {
                            warn!(
                                collection = %child.publishedfileid,
                                parent = %collection.publishedfileid,
                                "collection already expanded, skipping"
                            );
                        } else {
                            expand(catalog, vec![child.publishedfileid], state).await?;
                        }
                    }
                    other => warn!(
                        filetype = other,
                        published_file = %child.publishedfileid,
                        "unknown filetype, skipping"
                    ),
                }
            }
        }
        Ok(())
    })
}

/// Looks up the workshop titles of `ids` and builds one [`ModDescriptor`]
/// per titled entry, in reply order.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn resolve_mods(
    catalog: &dyn Catalog,
    ids: &[PublishedFileId],
) -> Result<Vec<ModDescriptor>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let Some(response) = catalog.published_file_details(ids).await? else {
        warn!(count = ids.len(), "file details reply has no response envelope");
        return Ok(Vec::new());
    };

    if response.publishedfiledetails.len() < ids.len() {
        warn!(
            requested = ids.len(),
            received = response.publishedfiledetails.len(),
            "file details reply is incomplete"
        );
    }

    let mut mods = Vec::with_capacity(response.publishedfiledetails.len());
    for details in response.publishedfiledetails {
        match details.title {
            Some(title) => mods.push(ModDescriptor::new(title, details.publishedfileid)?),
            None => warn!(
                published_file = %details.publishedfileid,
                result = details.result,
                "workshop item has no title, skipping"
            ),
        }
    }
    Ok(mods)
}
