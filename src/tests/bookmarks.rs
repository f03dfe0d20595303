use std::collections::HashSet;
use std::sync::Arc;

use crate::bookmarks::{BookmarkStore, BOOKMARKS_KEY};
use crate::catalog::Item;
use crate::storage::{BackendLocal, BackendMemory, StorageManager};

fn sample_item() -> Item {
    Item {
        title: "A".to_string(),
        desc: "B".to_string(),
        meta: "C".to_string(),
    }
}

#[test]
fn test_add_remove_round_trip() {
    let store = BookmarkStore::load(Arc::new(BackendMemory::default()));

    assert_eq!(store.count(), 0);
    assert!(store.add(&sample_item()));
    assert_eq!(store.count(), 1);

    let id = store.list().last().unwrap().id;
    store.remove(id);
    assert_eq!(store.count(), 0);
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let store = BookmarkStore::load(Arc::new(BackendMemory::default()));

    assert!(store.add(&sample_item()));
    store.remove(42);
    assert_eq!(store.count(), 1);
}

#[test]
fn test_duplicate_add_is_rejected() {
    let store = BookmarkStore::load(Arc::new(BackendMemory::default()));

    assert!(store.add(&sample_item()));
    assert!(!store.add(&sample_item()));
    assert_eq!(store.count(), 1);
}

#[test]
fn test_new_bookmark_is_last() {
    let store = BookmarkStore::load(Arc::new(BackendMemory::default()));

    assert!(store.add(&sample_item()));
    assert!(store.add(&Item {
        title: "Casio FX-991ES Calculator".to_string(),
        desc: "Like new condition".to_string(),
        meta: "₹400 · CSE 2nd Year".to_string(),
    }));

    let list = store.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list.last().unwrap().title, "Casio FX-991ES Calculator");
}

#[test]
fn test_rapid_adds_get_distinct_ids() {
    let store = BookmarkStore::load(Arc::new(BackendMemory::default()));

    for n in 0..20 {
        assert!(store.add(&Item {
            title: format!("item {n}"),
            desc: "desc".to_string(),
            meta: format!("meta {n}"),
        }));
    }

    let ids: HashSet<u64> = store.list().iter().map(|b| b.id).collect();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_add_is_persisted_immediately() {
    let storage = Arc::new(BackendMemory::default());
    let store = BookmarkStore::load(storage.clone());

    assert!(store.add(&sample_item()));

    let raw = storage.read(BOOKMARKS_KEY).unwrap();
    let persisted: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(persisted.as_array().unwrap().len(), 1);
    assert_eq!(persisted[0]["title"], "A");
}

#[test]
fn test_persistence_round_trip() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let storage = Arc::new(BackendLocal::new(tmp.path().to_str().unwrap()).unwrap());

    let store = BookmarkStore::load(storage.clone());
    assert!(store.add(&sample_item()));
    assert!(store.add(&Item {
        title: "Blue Water Bottle".to_string(),
        desc: "Found near Library Block A".to_string(),
        meta: "Reported today at 2:30 PM".to_string(),
    }));

    // a fresh store over the same storage sees field-for-field equal state
    let reloaded = BookmarkStore::load(storage);
    let before = store.list();
    let after = reloaded.list();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.title, b.title);
        assert_eq!(a.desc, b.desc);
        assert_eq!(a.meta, b.meta);
        assert_eq!(a.id, b.id);
        assert_eq!(a.added_at, b.added_at);
    }
}

#[test]
fn test_malformed_storage_degrades_to_empty() {
    let storage = Arc::new(BackendMemory::default());
    storage.write(BOOKMARKS_KEY, b"{{{ not json").unwrap();

    let store = BookmarkStore::load(storage);
    assert_eq!(store.count(), 0);

    // and the store is usable afterwards
    assert!(store.add(&sample_item()));
    assert_eq!(store.count(), 1);
}

#[test]
fn test_badge_hidden_at_zero() {
    let store = BookmarkStore::load(Arc::new(BackendMemory::default()));

    assert_eq!(store.badge(), None);
    assert!(store.add(&sample_item()));
    assert_eq!(store.badge(), Some(1));

    assert_eq!(store.clear(), 1);
    assert_eq!(store.badge(), None);
}
