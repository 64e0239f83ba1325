use crate::helpers::{body_text, mock_snapshot, mock_stations, spawn_app};
use axum::http::StatusCode;
use hyper::header;
use std::sync::Arc;

#[tokio::test]
async fn csv_export_matches_directory_search() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get("/export/stations.csv?q=jawa", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"Observation_Station_Data_"));
    assert!(disposition.ends_with(".csv\""));

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id_station,"));
    assert!(lines[1].starts_with("10002,Semarang,Jawa Tengah,"));
    assert!(lines[1].ends_with(",AWS"));
}

#[tokio::test]
async fn csv_export_without_search_has_every_station() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get("/export/stations.csv", None).await;

    let csv = body_text(response).await;
    assert_eq!(csv.lines().count(), 4);
}

#[tokio::test]
async fn workbook_download_serves_source_bytes() {
    let mut stations = mock_stations();
    stations
        .expect_workbook_bytes()
        .times(1)
        .returning(|| Ok(b"PK\x03\x04workbook".to_vec()));
    let test_app = spawn_app(Arc::new(stations)).await;

    let response = test_app.get("/export/workbook", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.ends_with(".xlsx\""));
    assert!(body_text(response).await.ends_with("workbook"));
}

#[tokio::test]
async fn layout_image_for_unknown_type_is_not_found() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get("/layouts/RADAR", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_layout_image_is_not_found() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get("/layouts/ARG", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Image not found: Layout ARG.png");
}

#[tokio::test]
async fn layout_image_and_download() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    std::fs::write(test_app.assets.path().join("Layout AWS.png"), b"layout").unwrap();
    std::fs::write(test_app.assets.path().join("Layout AWS Tes.png"), b"variant").unwrap();

    let response = test_app.get("/layouts/AWS", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    assert_eq!(body_text(response).await, "layout");

    let response = test_app.get("/layouts/AWS/download", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"AWS_layout_"));
    assert_eq!(body_text(response).await, "variant");
}

#[tokio::test]
async fn stations_api_filters_by_type_and_search() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app.get("/api/stations?type=AWS&q=jakarta", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let stations: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let stations = stations.as_array().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0]["station_id"], "10001");
    assert_eq!(stations[0]["install_date"], "2019-07-01");

    let response = test_app.get("/api/stations?type=RADAR", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reload_reports_station_count() {
    let mut stations = mock_stations();
    stations
        .expect_reload()
        .times(1)
        .returning(|| Ok(mock_snapshot()));
    let test_app = spawn_app(Arc::new(stations)).await;

    let response = test_app.post_form("/admin/reload", "", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Reloaded 3 stations");
}
