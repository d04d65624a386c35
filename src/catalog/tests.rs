// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::mods::ModDescriptor;
use crate::tools::test_utils::run_with_logs;
use std::collections::HashMap;
use std::sync::Mutex;

fn id(n: u64) -> PublishedFileId {
    PublishedFileId::new(n)
}

/// In-memory catalog: collection id -> children as `(id, filetype)`.
#[derive(Default)]
struct FakeCatalog {
    collections: HashMap<u64, Vec<(u64, u32)>>,
    titles: HashMap<u64, Option<String>>,
    drop_envelope: bool,
    requests: Mutex<Vec<Vec<u64>>>,
}

impl FakeCatalog {
    fn collection(mut self, id: u64, children: &[(u64, u32)]) -> Self {
        self.collections.insert(id, children.to_vec());
        self
    }

    fn title(mut self, id: u64, title: Option<&str>) -> Self {
        self.titles.insert(id, title.map(str::to_string));
        self
    }

    fn requests(&self) -> Vec<Vec<u64>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Catalog for FakeCatalog {
    fn collection_details<'a>(
        &'a self,
        ids: &'a [PublishedFileId],
    ) -> BoxFuture<'a, Result<Option<CollectionDetailsResponse>>> {
        Box::pin(async move {
            self.requests
                .lock()
                .unwrap()
                .push(ids.iter().map(|i| i.get()).collect());
            if self.drop_envelope {
                return Ok(None);
            }
            // Unknown collections are silently missing from the reply, like Steam.
            let collectiondetails: Vec<_> = ids
                .iter()
                .filter_map(|i| {
                    self.collections.get(&i.get()).map(|children| CollectionDetails {
                        publishedfileid: *i,
                        result: 1,
                        children: children
                            .iter()
                            .enumerate()
                            .map(|(order, (child, filetype))| CollectionChild {
                                publishedfileid: id(*child),
                                sortorder: u32::try_from(order).unwrap_or_default(),
                                filetype: *filetype,
                            })
                            .collect(),
                    })
                })
                .collect();
            Ok(Some(CollectionDetailsResponse {
                resultcount: collectiondetails.len(),
                collectiondetails,
            }))
        })
    }

    fn published_file_details<'a>(
        &'a self,
        ids: &'a [PublishedFileId],
    ) -> BoxFuture<'a, Result<Option<PublishedFileDetailsResponse>>> {
        Box::pin(async move {
            if self.drop_envelope {
                return Ok(None);
            }
            let publishedfiledetails: Vec<_> = ids
                .iter()
                .filter_map(|i| {
                    self.titles.get(&i.get()).map(|title| PublishedFileDetails {
                        publishedfileid: *i,
                        result: if title.is_some() { 1 } else { 9 },
                        title: title.clone(),
                    })
                })
                .collect();
            Ok(Some(PublishedFileDetailsResponse {
                resultcount: publishedfiledetails.len(),
                publishedfiledetails,
            }))
        })
    }
}

fn ids(values: &[u64]) -> Vec<PublishedFileId> {
    values.iter().copied().map(id).collect()
}

#[tokio::test]
async fn test_resolve_flat_collection() {
    let catalog = FakeCatalog::default().collection(1, &[(10, 0), (11, 0), (12, 0)]);
    let items = resolve_collections(&catalog, &ids(&[1])).await.unwrap();
    assert_eq!(items, ids(&[10, 11, 12]));
}

#[tokio::test]
async fn test_resolve_nested_collection() {
    let catalog = FakeCatalog::default()
        .collection(1, &[(10, 0), (2, 2), (11, 0)])
        .collection(2, &[(20, 0)]);
    let items = resolve_collections(&catalog, &ids(&[1])).await.unwrap();
    assert_eq!(items, ids(&[10, 20, 11]));
    assert_eq!(catalog.requests(), vec![vec![1], vec![2]]);
}

#[tokio::test]
async fn test_resolve_deduplicates_first_wins() {
    let catalog = FakeCatalog::default()
        .collection(1, &[(10, 0), (11, 0), (3, 2)])
        .collection(2, &[(11, 0), (12, 0), (10, 0)])
        .collection(3, &[(12, 0), (13, 0)]);
    let items = resolve_collections(&catalog, &ids(&[1, 2])).await.unwrap();
    assert_eq!(items, ids(&[10, 11, 12, 13]));
    // Top-level collections go out in one batch.
    assert_eq!(catalog.requests()[0], vec![1, 2]);
}

#[tokio::test]
async fn test_resolve_root_nested_in_earlier_root_expands_in_place() {
    let catalog = FakeCatalog::default()
        .collection(1, &[(10, 0), (2, 2), (11, 0)])
        .collection(2, &[(20, 0)]);
    let (result, logs) =
        run_with_logs(|| async { resolve_collections(&catalog, &ids(&[1, 2])).await }).await;

    assert_eq!(result.unwrap(), ids(&[10, 20, 11]));
    assert_eq!(catalog.requests(), vec![vec![1, 2], vec![2]]);
    assert!(!logs.contains("already expanded, skipping"));
}

#[tokio::test]
async fn test_resolve_skips_unknown_filetype() {
    let catalog = FakeCatalog::default().collection(1, &[(10, 0), (99, 5), (11, 0)]);
    let items = resolve_collections(&catalog, &ids(&[1])).await.unwrap();
    assert_eq!(items, ids(&[10, 11]));
}

#[tokio::test]
async fn test_resolve_cycle_terminates() {
    let catalog = FakeCatalog::default()
        .collection(1, &[(10, 0), (2, 2)])
        .collection(2, &[(20, 0), (1, 2)]);
    let items = resolve_collections(&catalog, &ids(&[1])).await.unwrap();
    assert_eq!(items, ids(&[10, 20]));
    assert_eq!(catalog.requests().len(), 2);
}

#[tokio::test]
async fn test_resolve_duplicate_roots_requested_once() {
    let catalog = FakeCatalog::default().collection(1, &[(10, 0)]);
    let items = resolve_collections(&catalog, &ids(&[1, 1])).await.unwrap();
    assert_eq!(items, ids(&[10]));
    assert_eq!(catalog.requests(), vec![vec![1]]);
}

#[tokio::test]
async fn test_resolve_short_reply_keeps_partial() {
    let catalog = FakeCatalog::default().collection(2, &[(20, 0)]);
    let items = resolve_collections(&catalog, &ids(&[1, 2])).await.unwrap();
    assert_eq!(items, ids(&[20]));
}

#[tokio::test]
async fn test_resolve_missing_envelope_is_empty() {
    let catalog = FakeCatalog {
        drop_envelope: true,
        ..FakeCatalog::default()
    };
    assert!(resolve_collections(&catalog, &ids(&[1])).await.unwrap().is_empty());
    assert!(resolve_mods(&catalog, &ids(&[10])).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_empty_input_makes_no_request() {
    let catalog = FakeCatalog::default();
    assert!(resolve_collections(&catalog, &[]).await.unwrap().is_empty());
    assert!(resolve_mods(&catalog, &[]).await.unwrap().is_empty());
    assert!(catalog.requests().is_empty());
}

#[tokio::test]
async fn test_resolve_mods_skips_untitled() {
    let catalog = FakeCatalog::default()
        .title(10, Some("CBA_A3"))
        .title(11, None)
        .title(12, Some("ACE3 Compat - RHS"));
    let mods = resolve_mods(&catalog, &ids(&[10, 11, 12, 13])).await.unwrap();

    let folders: Vec<_> = mods.iter().map(ModDescriptor::folder_name).collect();
    assert_eq!(folders, vec!["@cba_a3", "@ace3_compat_-_rhs"]);
    assert_eq!(mods[1].id(), id(12));
    assert_eq!(mods[1].name(), "ACE3 Compat - RHS");
}

#[test]
fn test_deserialize_steam_reply() {
    let body = r#"{
        "response": {
            "result": 1,
            "resultcount": 1,
            "collectiondetails": [{
                "publishedfileid": "1751569185",
                "result": 1,
                "children": [
                    {"publishedfileid": "450814997", "sortorder": 1, "filetype": 0},
                    {"publishedfileid": "2020940806", "sortorder": 2, "filetype": 2}
                ]
            }]
        }
    }"#;
    let envelope: Envelope<CollectionDetailsResponse> = serde_json::from_str(body).unwrap();
    let response = envelope.response.unwrap();
    assert_eq!(response.resultcount, 1);
    let collection = &response.collectiondetails[0];
    assert_eq!(collection.publishedfileid, id(1_751_569_185));
    assert_eq!(collection.children[1].filetype, FILETYPE_COLLECTION);
    assert_eq!(collection.children[0].publishedfileid, id(450_814_997));
}

#[test]
fn test_deserialize_missing_envelope() {
    let envelope: Envelope<PublishedFileDetailsResponse> =
        serde_json::from_str(r#"{"error": "bad key"}"#).unwrap();
    assert!(envelope.response.is_none());
}

#[test]
fn test_deserialize_untitled_details() {
    let body = r#"{"response": {"result": 1, "resultcount": 1, "publishedfiledetails": [
        {"publishedfileid": "42", "result": 9}
    ]}}"#;
    let envelope: Envelope<PublishedFileDetailsResponse> = serde_json::from_str(body).unwrap();
    let details = &envelope.response.unwrap().publishedfiledetails[0];
    assert_eq!(details.result, 9);
    assert!(details.title.is_none());
}
