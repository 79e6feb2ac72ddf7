//! Container facade tests: both backing stores, plus file-specific
//! behavior (atomic replace, export/import, whole-file compression).

mod common;

use ods::tag::NamedTag;
use ods::{Container, Registries};

fn sample() -> Vec<NamedTag> {
    vec![
        NamedTag::string("name", "Bananrama"),
        NamedTag::int("count", 3),
    ]
}

#[test]
fn buffer_backed_round_trip() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&sample()).unwrap();
    assert_eq!(container.get_all().unwrap().len(), 2);
    assert_eq!(
        container.get("name").unwrap().unwrap().value.as_str(),
        Some("Bananrama")
    );
}

#[test]
fn file_backed_round_trip_identity() {
    common::init_logging();
    let registries = Registries::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("container.ods");

    let mut container = Container::file(&path, "identity", &registries);
    container.save(&sample()).unwrap();
    assert!(path.exists());

    // A fresh handle over the same file sees what was persisted.
    let reopened = Container::file(&path, "identity", &registries);
    assert_eq!(
        reopened.get("count").unwrap().unwrap().value.as_i32(),
        Some(3)
    );
}

#[test]
fn file_backed_round_trip_gzip() {
    common::init_logging();
    let registries = Registries::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("container.ods.gz");

    let mut container = Container::file(&path, "gzip", &registries);
    container.save(&sample()).unwrap();

    let reopened = Container::file(&path, "gzip", &registries);
    assert_eq!(
        reopened.get("name").unwrap().unwrap().value.as_str(),
        Some("Bananrama")
    );
}

#[test]
fn append_all_adds_to_existing_content() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&sample()).unwrap();
    container
        .append(&NamedTag::int("extra", 42))
        .unwrap();

    assert_eq!(container.get_all().unwrap().len(), 3);
    assert_eq!(
        container.get("extra").unwrap().unwrap().value.as_i32(),
        Some(42)
    );
}

#[test]
fn clear_truncates_to_empty() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&sample()).unwrap();
    container.clear().unwrap();
    assert_eq!(container.get_all().unwrap().len(), 0);
}

#[test]
fn export_and_import_transcode_between_compressors() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&sample()).unwrap();

    let exported = container.export("gzip").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exported.ods.gz");
    std::fs::write(&path, exported).unwrap();

    let mut imported = Container::buffer(Vec::new(), &registries);
    imported.import_file(&path, "gzip").unwrap();
    assert_eq!(
        imported.get("name").unwrap().unwrap().value.as_str(),
        Some("Bananrama")
    );
}

#[test]
fn getting_from_a_nonexistent_file_reads_as_empty() {
    let registries = Registries::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ods");

    let container = Container::file(&path, "identity", &registries);
    assert_eq!(container.get_all().unwrap(), Vec::new());
    assert!(!container.find("anything").unwrap());
}
