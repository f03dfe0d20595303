use std::{
    hash::Hash,
    sync::{Arc, RwLock},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{catalog::Item, storage::StorageManager};

/// Storage namespace key for the saved-items list.
pub const BOOKMARKS_KEY: &str = "bookmarks.json";

/// A user-saved catalog item. `id` is creation-timestamp-derived and unique
/// within the store; `added_at` round-trips through storage as an ISO-8601
/// string.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub desc: String,
    pub meta: String,

    pub id: u64,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl Hash for Bookmark {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialEq for Bookmark {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Owns the saved-items list. Loaded once from storage, mutated in place,
/// flushed synchronously after every mutation so the count badge is never
/// ahead of the persisted state.
#[derive(Clone)]
pub struct BookmarkStore {
    list: Arc<RwLock<Vec<Bookmark>>>,
    storage: Arc<dyn StorageManager>,
}

impl BookmarkStore {
    /// Reads the persisted list. Absent or malformed content degrades to an
    /// empty store; startup never fails on bad bookmark data.
    pub fn load(storage: Arc<dyn StorageManager>) -> Self {
        let list = match storage.read(BOOKMARKS_KEY) {
            Ok(raw) => match serde_json::from_slice::<Vec<Bookmark>>(&raw) {
                Ok(list) => list,
                Err(err) => {
                    log::warn!("discarding malformed bookmark data: {err}");
                    vec![]
                }
            },
            Err(_) => vec![],
        };

        BookmarkStore {
            list: Arc::new(RwLock::new(list)),
            storage,
        }
    }

    /// Saves an item. Returns false without appending when the item is
    /// already bookmarked (same title and meta). On success the new bookmark
    /// is the last element and is already persisted.
    pub fn add(&self, item: &Item) -> bool {
        let mut list = self.list.write().unwrap();

        if list
            .iter()
            .any(|b| b.title == item.title && b.meta == item.meta)
        {
            return false;
        }

        let id = next_id(list.last().map(|b| b.id));
        list.push(Bookmark {
            title: item.title.clone(),
            desc: item.desc.clone(),
            meta: item.meta.clone(),
            id,
            added_at: Utc::now(),
        });

        drop(list);

        self.save();

        true
    }

    /// Removes the bookmark with a matching id; no-op if absent.
    pub fn remove(&self, id: u64) {
        let mut list = self.list.write().unwrap();
        let before = list.len();
        list.retain(|b| b.id != id);
        let changed = list.len() != before;

        drop(list);

        if changed {
            self.save();
        }
    }

    /// Removes everything; returns how many bookmarks were dropped.
    pub fn clear(&self) -> usize {
        let mut list = self.list.write().unwrap();
        let removed = list.len();
        list.clear();

        drop(list);

        if removed > 0 {
            self.save();
        }

        removed
    }

    pub fn count(&self) -> usize {
        self.list.read().unwrap().len()
    }

    /// Count for the badge indicator; None means the badge is hidden.
    pub fn badge(&self) -> Option<usize> {
        match self.count() {
            0 => None,
            n => Some(n),
        }
    }

    pub fn list(&self) -> Vec<Bookmark> {
        self.list.read().unwrap().clone()
    }

    // Persist is synchronous and unconditional after every mutation. A write
    // failure here leaves memory ahead of disk; that is logged, not recovered.
    fn save(&self) {
        let list = self.list.read().unwrap();
        match serde_json::to_vec_pretty(&*list) {
            Ok(raw) => {
                if let Err(err) = self.storage.write(BOOKMARKS_KEY, &raw) {
                    log::error!("failed to persist bookmarks: {err}");
                }
            }
            Err(err) => log::error!("failed to serialize bookmarks: {err}"),
        }
    }
}

// Millisecond timestamp, bumped past the tail id so two adds within the same
// millisecond still get distinct ids.
fn next_id(last: Option<u64>) -> u64 {
    let now = Utc::now().timestamp_millis() as u64;
    match last {
        Some(last) if now <= last => last + 1,
        _ => now,
    }
}
