use crate::helpers::{body_text, mock_stations, session_cookie, spawn_app, MockStationAccess};
use axum::http::StatusCode;
use hyper::header;
use obsnet::{LoadError, StoreError};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::test]
async fn dashboard_serves_full_page_with_session_cookie() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get("/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("obsnet_session="));

    let html = body_text(response).await;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Indonesia Observation Network"));
    assert!(html.contains(r#"id="dashboard""#));
    // Default selection: first sheet, station 10001
    assert!(html.contains("📍 Kemayoran"));
    assert!(html.contains("Total Sites"));
}

#[tokio::test]
async fn htmx_navigation_gets_only_the_dashboard_fragment() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get_htmx("/?tab=statistics", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.starts_with(r#"<div id="dashboard""#));
    assert!(!html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Network Statistics"));
    assert!(html.contains("Sumatera Utara"));
}

#[tokio::test]
async fn session_cookie_is_reused() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let first = test_app.get("/", None).await;
    let cookie = session_cookie(&first);

    let second = test_app.get("/", Some(&cookie)).await;
    assert_eq!(session_cookie(&second), cookie);
}

#[tokio::test]
async fn clustered_mode_groups_by_province() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get_htmx("/?mode=clustered", None).await;

    let html = body_text(response).await;
    assert!(html.contains(r#"data-province="DKI Jakarta""#));
    assert!(html.contains(r#"data-province="Jawa Tengah""#));
    // Only the active AWS partition is clustered
    assert!(!html.contains(r#"data-province="Sumatera Utara""#));
}

#[tokio::test]
async fn directory_tab_applies_search() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get_htmx("/?tab=directory&q=jawa", None).await;

    let html = body_text(response).await;
    assert!(html.contains("Complete Station Directory"));
    assert!(html.contains("Semarang"));
    assert!(!html.contains("<td>Kemayoran</td>"));
    assert!(html.contains("1 stations"));
}

#[tokio::test]
async fn directory_fragment_filters_rows() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get_htmx("/fragments/directory?q=MEDAN", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.starts_with(r#"<div id="directory-table""#));
    assert!(html.contains("Medan"));
    assert!(!html.contains("Semarang"));
}

#[tokio::test]
async fn static_map_reports_missing_image() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get_htmx("/?tab=static_map", None).await;

    let html = body_text(response).await;
    assert!(html.contains("Image not found: Layout AWS.png"));
}

#[tokio::test]
async fn static_map_shows_available_image() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    std::fs::write(test_app.assets.path().join("Layout AWS.png"), b"png").unwrap();

    let response = test_app.get_htmx("/?tab=static_map", None).await;

    let html = body_text(response).await;
    assert!(html.contains(r#"src="/layouts/AWS""#));
    assert!(html.contains(r#"href="/layouts/AWS/download""#));
}

#[tokio::test]
async fn unreadable_station_data_is_a_server_error() {
    let mut stations = MockStationAccess::new();
    stations.expect_snapshot().returning(|| {
        Err(StoreError::Load(LoadError::NotFound(PathBuf::from(
            "missing.xlsx",
        ))))
    });
    let test_app = spawn_app(Arc::new(stations)).await;

    let response = test_app.get("/", None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}
