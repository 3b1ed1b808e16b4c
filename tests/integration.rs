//! End-to-end scenarios for the storage engine over a real temp directory.

use std::fs;

use tempfile::TempDir;

use shelf_server::storage::roots::{RootStore, Visibility};
use shelf_server::storage::{ItemKind, StorageEngine};

const BASE: &str = "https://files.example.com";

fn setup() -> (TempDir, StorageEngine) {
    let dir = TempDir::new().unwrap();
    let store = RootStore::new(dir.path()).unwrap();
    (dir, StorageEngine::new(store, BASE))
}

#[test]
fn test_store_and_read_back_through_public_root() {
    let (dir, engine) = setup();
    let stored = engine
        .store_file("reports", "a.txt", b"payload", true)
        .unwrap();
    assert_eq!(stored.visibility, Visibility::Exposed);
    let on_disk = fs::read(dir.path().join("public/reports/a.txt")).unwrap();
    assert_eq!(on_disk, b"payload");
}

#[test]
fn test_hidden_folder_lifecycle() {
    let (_dir, engine) = setup();
    engine.create_folder("reports", false).unwrap();
    engine
        .store_file("reports", "a.txt", b"hi", false)
        .unwrap();

    let listing = engine.list_folder("reports").unwrap();
    assert_eq!(listing.visibility, Visibility::Hidden);
    assert_eq!(listing.url, None);
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].name, "a.txt");
    assert_eq!(listing.files[0].size, 2);
}

#[test]
fn test_expose_then_list_reports_public_url() {
    let (_dir, engine) = setup();
    engine.create_folder("reports", false).unwrap();
    engine
        .store_file("reports", "a.txt", b"hi", false)
        .unwrap();

    engine.expose("reports").unwrap();

    let listing = engine.list_folder("reports").unwrap();
    assert_eq!(listing.visibility, Visibility::Exposed);
    let url = listing.url.unwrap();
    assert!(url.ends_with("/public/reports/"), "url was {}", url);
}

#[test]
fn test_rename_moves_within_same_root() {
    let (dir, engine) = setup();
    engine
        .store_file("reports", "a.txt", b"hi", false)
        .unwrap();

    let renamed = engine
        .rename(ItemKind::File, "reports", Some("a.txt"), "b.txt")
        .unwrap();
    assert_eq!(renamed.visibility, Visibility::Hidden);
    assert_eq!(renamed.url, None);

    // Physical file moved inside the private root; the old name is gone.
    assert!(dir.path().join("private/reports/b.txt").is_file());
    assert!(!dir.path().join("private/reports/a.txt").exists());
    assert!(
        engine
            .list_folder("reports")
            .unwrap()
            .files
            .iter()
            .all(|f| f.name != "a.txt")
    );
}

#[test]
fn test_recursive_delete_then_repeat_is_not_found() {
    let (_dir, engine) = setup();
    engine
        .store_file("reports", "a.txt", b"hi", false)
        .unwrap();
    engine
        .store_file("reports", "b.txt", b"there", false)
        .unwrap();

    engine.delete("reports", None).unwrap();
    assert!(engine.delete("reports", None).unwrap_err().is_not_found());
}

#[test]
fn test_dual_existence_delete_clears_both_roots() {
    let (dir, engine) = setup();
    // Force the ambiguous state directly on disk.
    fs::create_dir_all(dir.path().join("public/x")).unwrap();
    fs::create_dir_all(dir.path().join("private/x")).unwrap();

    let listing = engine.list_root().unwrap();
    assert_eq!(listing.folders.len(), 1);
    assert_eq!(listing.folders[0].visibility, Visibility::Exposed);

    engine.delete("x", None).unwrap();
    assert!(!dir.path().join("public/x").exists());
    assert!(!dir.path().join("private/x").exists());
    assert!(engine.list_root().unwrap().folders.is_empty());
}

#[test]
fn test_unexpose_overwrites_stale_hidden_copy() {
    let (dir, engine) = setup();
    engine
        .store_file("docs", "fresh.txt", b"new", true)
        .unwrap();
    fs::create_dir_all(dir.path().join("private/docs")).unwrap();
    fs::write(dir.path().join("private/docs/stale.txt"), b"old").unwrap();

    engine.unexpose("docs").unwrap();

    let listing = engine.list_folder("docs").unwrap();
    assert_eq!(listing.visibility, Visibility::Hidden);
    let names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["fresh.txt"]);
}

#[test]
fn test_toggle_round_trip_preserves_contents() {
    let (_dir, engine) = setup();
    engine.store_file("docs", "a.txt", b"hi", false).unwrap();

    engine.expose("docs").unwrap();
    engine.unexpose("docs").unwrap();
    engine.expose("docs").unwrap();

    let listing = engine.list_folder("docs").unwrap();
    assert_eq!(listing.visibility, Visibility::Exposed);
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].name, "a.txt");
}

#[test]
fn test_listing_timestamps_are_rfc3339() {
    let (_dir, engine) = setup();
    engine.store_file("docs", "a.txt", b"hi", false).unwrap();
    let listing = engine.list_folder("docs").unwrap();
    let modified = &listing.files[0].modified;
    assert!(
        chrono::DateTime::parse_from_rfc3339(modified).is_ok(),
        "not RFC 3339: {}",
        modified
    );
}
