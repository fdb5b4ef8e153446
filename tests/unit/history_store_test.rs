//! Unit tests for the location history store.

use geolog::location::types::{Coordinates, LocationRecord};
use geolog::storage::history::{LocationHistoryStore, StorageError};

fn record(id: i64, latitude: f64, longitude: f64) -> LocationRecord {
    LocationRecord::new(id, Coordinates::new(latitude, longitude).unwrap())
}

#[test]
fn test_reopen_keeps_rows_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locations.db");

    {
        let store = LocationHistoryStore::open(&path).unwrap();
        store.insert(&record(1, -23.55, -46.63)).unwrap();
        store.insert(&record(2, 40.71, -74.0)).unwrap();
    }

    // Initialization runs again on every open
    for _ in 0..3 {
        let store = LocationHistoryStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.schema_version().unwrap(), 1);
    }
}

#[test]
fn test_open_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("locations.db");

    let store = LocationHistoryStore::open(&path).unwrap();
    assert!(path.exists());
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn test_insert_is_append_only() {
    let store = LocationHistoryStore::open_in_memory().unwrap();
    store.insert(&record(100, 10.0, 20.0)).unwrap();
    store.insert(&record(200, 30.0, 40.0)).unwrap();
    let before = store.get_all().unwrap();

    let new = record(300, -1.5, 2.5);
    store.insert(&new).unwrap();
    let after = store.get_all().unwrap();

    assert_eq!(after.len(), before.len() + 1);
    assert!(after.contains(&new));
    for existing in &before {
        assert!(after.contains(existing));
    }
}

#[test]
fn test_scenario_single_insert() {
    let store = LocationHistoryStore::open_in_memory().unwrap();
    store.insert(&record(1_700_000_000_000, -23.55, -46.63)).unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1_700_000_000_000);
    assert_eq!(all[0].latitude, -23.55);
    assert_eq!(all[0].longitude, -46.63);
}

#[test]
fn test_extreme_coordinates_preserved() {
    let store = LocationHistoryStore::open_in_memory().unwrap();
    let corners = [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0), (12.345678901, -98.765432109)];

    for (i, (lat, lon)) in corners.iter().enumerate() {
        store.insert(&record(i as i64 + 1, *lat, *lon)).unwrap();
    }

    let all = store.get_all().unwrap();
    for (i, (lat, lon)) in corners.iter().enumerate() {
        let stored = all.iter().find(|r| r.id == i as i64 + 1).unwrap();
        assert_eq!(stored.latitude, *lat);
        assert_eq!(stored.longitude, *lon);
    }
}

#[test]
fn test_duplicate_id_rejected() {
    let store = LocationHistoryStore::open_in_memory().unwrap();
    store.insert(&record(9, 1.0, 1.0)).unwrap();

    let err = store.insert(&record(9, 1.0, 1.0)).unwrap_err();
    assert!(matches!(err, StorageError::WriteFailed(_)));
    assert_eq!(store.count().unwrap(), 1);
}
