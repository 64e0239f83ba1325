use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::StatusCode,
};
use hyper::HeaderMap;
use log::error;
use time::OffsetDateTime;

use super::file_headers;
use crate::{
    assets::{layout_attachment_name, PNG_CONTENT_TYPE},
    routes::{store_failure, unknown_station_type, HandlerError},
    AppState,
};

/// Handler for the static map image (GET /layouts/{station_type})
pub async fn layout_image_handler(
    State(state): State<Arc<AppState>>,
    Path(station_type): Path<String>,
) -> Result<(HeaderMap, Body), HandlerError> {
    known_type(&state, &station_type).await?;
    let path = state
        .layouts
        .layout_path(&station_type)
        .ok_or_else(|| image_not_found(&station_type))?;

    let headers = file_headers(PNG_CONTENT_TYPE, None)?;
    Ok((headers, read_image(path).await?))
}

/// Handler for the layout download (GET /layouts/{station_type}/download)
pub async fn layout_download_handler(
    State(state): State<Arc<AppState>>,
    Path(station_type): Path<String>,
) -> Result<(HeaderMap, Body), HandlerError> {
    known_type(&state, &station_type).await?;
    let path = state
        .layouts
        .download_path(&station_type)
        .ok_or_else(|| image_not_found(&station_type))?;

    let today = OffsetDateTime::now_utc().date();
    let headers = file_headers(
        PNG_CONTENT_TYPE,
        Some(&layout_attachment_name(&station_type, today)),
    )?;
    Ok((headers, read_image(path).await?))
}

async fn known_type(state: &AppState, station_type: &str) -> Result<(), HandlerError> {
    let snapshot = state.stations.snapshot().await.map_err(store_failure)?;
    if snapshot.index.has_type(station_type) {
        Ok(())
    } else {
        Err(unknown_station_type(station_type))
    }
}

fn image_not_found(station_type: &str) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        format!("Image not found: Layout {}.png", station_type),
    )
}

async fn read_image(path: PathBuf) -> Result<Body, HandlerError> {
    tokio::fs::read(&path).await.map(Body::from).map_err(|e| {
        error!("error reading layout image {}: {}", path.display(), e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read image: {}", e),
        )
    })
}
