use crate::helpers::{body_text, mock_stations, session_cookie, spawn_app, TestApp};
use axum::http::StatusCode;
use std::sync::Arc;

async fn start_session(test_app: &TestApp) -> String {
    let response = test_app.get("/", None).await;
    session_cookie(&response)
}

#[tokio::test]
async fn changing_type_moves_selection_into_new_partition() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let cookie = start_session(&test_app).await;

    let response = test_app
        .post_form("/selection/type", "station_type=ARG&mode=individual&tab=map", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.starts_with(r#"<div id="dashboard""#));
    assert!(html.contains("📍 Medan"));

    // The session remembers the new type
    let html = body_text(test_app.get_htmx("/", Some(&cookie)).await).await;
    assert!(html.contains(r#"value="ARG" checked"#));
    assert!(html.contains("📍 Medan"));
}

#[tokio::test]
async fn unknown_type_is_not_found() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app
        .post_form("/selection/type", "station_type=RADAR", None)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_type_shows_warning() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app
        .post_form("/selection/type", "station_type=IKRO", None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No sites available for the selected station type."));
    assert!(html.contains("Please select a different station type."));
    assert!(!html.contains(r#"id="station-picker""#));
}

#[tokio::test]
async fn picking_by_display_name() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let cookie = start_session(&test_app).await;

    let response = test_app
        .post_form("/selection/pick", "display=10002+-+Semarang", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("📍 Semarang"));
    assert!(html.contains(r#"<option value="10002 - Semarang" selected>"#));
}

#[tokio::test]
async fn picking_outside_the_active_type_is_rejected() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let cookie = start_session(&test_app).await;

    let response = test_app
        .post_form("/selection/pick", "display=20+-+Medan", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Selection unchanged
    let html = body_text(test_app.get_htmx("/", Some(&cookie)).await).await;
    assert!(html.contains("📍 Kemayoran"));
}

#[tokio::test]
async fn map_click_proposes_then_confirm_selects_across_types() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let cookie = start_session(&test_app).await;

    let response = test_app
        .post_form("/selection/spatial", "lat=3.5&lon=98.7&tab=map", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("You clicked: "));
    assert!(html.contains("20 - Medan"));
    // Not selected until confirmed
    assert!(html.contains("📍 Kemayoran"));

    let response = test_app
        .post_form("/selection/confirm", "tab=map", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("📍 Medan"));
    // Type filter stays on AWS, the detail flags the other type
    assert!(html.contains(r#"value="AWS" checked"#));
    assert!(html.contains("ARG station"));
    assert!(html.contains("Click a station marker on the map to select it."));

    let response = test_app
        .post_form("/selection/confirm", "tab=map", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn map_click_in_view_box_units() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let cookie = start_session(&test_app).await;

    // Far west of the map, nearest to Medan
    let response = test_app
        .post_form("/selection/spatial", "x=10&y=120&q=&mode=individual&tab=map", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("20 - Medan"));
}

#[tokio::test]
async fn rejected_selection_still_binds_the_session() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app
        .post_form("/selection/confirm", "tab=map", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let cookie = session_cookie(&response);

    let response = test_app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(session_cookie(&response), cookie);
}

#[tokio::test]
async fn map_click_with_non_finite_coordinates_is_rejected() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let cookie = start_session(&test_app).await;

    for form in ["lat=NaN&lon=100&tab=map", "lat=-6.2&lon=inf&tab=map"] {
        let response = test_app
            .post_form("/selection/spatial", form, Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", form);
    }
}

#[tokio::test]
async fn map_click_without_position_is_rejected() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;

    let response = test_app
        .post_form("/selection/spatial", "x=10&tab=map", None)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dismiss_drops_the_candidate() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let cookie = start_session(&test_app).await;

    test_app
        .post_form("/selection/spatial", "lat=-7.0&lon=110.4", Some(&cookie))
        .await;
    let response = test_app
        .post_form("/selection/dismiss", "", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(!html.contains("You clicked: "));
    assert!(html.contains("📍 Kemayoran"));
}

#[tokio::test]
async fn sessions_do_not_share_selection() {
    let test_app = spawn_app(Arc::new(mock_stations())).await;
    let first = start_session(&test_app).await;
    let second = start_session(&test_app).await;

    test_app
        .post_form("/selection/type", "station_type=ARG", Some(&first))
        .await;

    let html = body_text(test_app.get_htmx("/", Some(&second)).await).await;
    assert!(html.contains(r#"value="AWS" checked"#));
    assert!(html.contains("📍 Kemayoran"));
}
