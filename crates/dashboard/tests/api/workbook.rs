use crate::helpers::{body_text, spawn_app};
use axum::http::StatusCode;
use obsnet::{StationData, StationId, StationStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use time::macros::date;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/stations.xlsx")
}

#[tokio::test]
async fn fixture_workbook_loads_every_sheet() {
    let store = StationStore::open(fixture()).await.unwrap();
    let snapshot = store.snapshot().await.unwrap();
    let index = &snapshot.index;

    assert_eq!(index.station_types(), ["AWS", "ARG", "IKRO"]);
    // The AWS row without coordinates is dropped
    assert_eq!(index.len(), 3);
    assert!(index.filter_by_type("IKRO").is_empty());

    let kemayoran = index.by_id("AWS", "10001").unwrap();
    assert_eq!(kemayoran.name.as_deref(), Some("Kemayoran"));
    assert_eq!(kemayoran.elevation, Some(4.0));
    assert_eq!(kemayoran.install_date, Some(date!(2019 - 07 - 01)));

    let medan = index.by_id("ARG", "ARG-7").unwrap();
    assert_eq!(medan.station_id, StationId::new("ARG-7"));
    assert_eq!(medan.install_date, Some(date!(2020 - 02 - 15)));
    assert_eq!(medan.operational_status.as_deref(), Some("Repair"));
}

#[tokio::test]
async fn fixture_workbook_serves_the_dashboard() {
    let store = StationStore::open(fixture()).await.unwrap();
    let test_app = spawn_app(Arc::new(store)).await;

    let response = test_app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("📍 Kemayoran"));

    let response = test_app.get("/api/stations?q=medan", None).await;
    let stations: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(stations.as_array().unwrap().len(), 1);
    assert_eq!(stations[0]["station_type"], "ARG");
}

#[tokio::test]
async fn manual_reload_rereads_the_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stations.xlsx");
    std::fs::copy(fixture(), &path).unwrap();

    let store = StationStore::open(&path).await.unwrap();
    let before = store.snapshot().await.unwrap();
    let after = store.reload().await.unwrap();

    assert_eq!(before.index.len(), after.index.len());
    assert!(!Arc::ptr_eq(&before, &after));

    let bytes = store.workbook_bytes().await.unwrap();
    assert_eq!(bytes, std::fs::read(fixture()).unwrap());
}

#[tokio::test]
async fn changed_workbook_is_picked_up_and_bad_edits_keep_old_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stations.xlsx");
    std::fs::copy(fixture(), &path).unwrap();

    let store = StationStore::open(&path).await.unwrap();
    let original = store.snapshot().await.unwrap();
    assert!(Arc::ptr_eq(&original, &store.snapshot().await.unwrap()));

    // A half-written save must not take the dashboard down
    std::fs::write(&path, b"not a spreadsheet").unwrap();
    let served = store.snapshot().await.unwrap();
    assert!(Arc::ptr_eq(&original, &served));

    std::fs::copy(fixture(), &path).unwrap();
    // Same length as before, so move the mtime to be sure it differs
    std::fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();

    let rebuilt = store.snapshot().await.unwrap();
    assert!(!Arc::ptr_eq(&original, &rebuilt));
    assert_eq!(rebuilt.index.len(), 3);
    assert_ne!(rebuilt.fingerprint, original.fingerprint);
    assert!(Arc::ptr_eq(&rebuilt, &store.snapshot().await.unwrap()));
}
