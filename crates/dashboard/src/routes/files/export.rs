use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
};
use hyper::HeaderMap;
use log::info;
use serde::Deserialize;
use time::OffsetDateTime;

use super::file_headers;
use crate::{
    export::{
        csv_file_name, stations_csv, workbook_file_name, CSV_CONTENT_TYPE, XLSX_CONTENT_TYPE,
    },
    routes::{export_failure, store_failure, HandlerError},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub q: Option<String>,
}

/// Handler for the directory export (GET /export/stations.csv?q=)
///
/// Exports exactly the rows the directory shows for the same search term.
pub async fn export_csv_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<(HeaderMap, Body), HandlerError> {
    let snapshot = state.stations.snapshot().await.map_err(store_failure)?;
    let records = snapshot.index.search(query.q.as_deref());
    let bytes = stations_csv(records.iter().copied()).map_err(export_failure)?;
    info!("exported {} stations to csv", records.len());

    let today = OffsetDateTime::now_utc().date();
    let headers = file_headers(CSV_CONTENT_TYPE, Some(&csv_file_name(today)))?;
    Ok((headers, Body::from(bytes)))
}

/// Handler for the full workbook download (GET /export/workbook)
pub async fn export_workbook_handler(
    State(state): State<Arc<AppState>>,
) -> Result<(HeaderMap, Body), HandlerError> {
    let bytes = state
        .stations
        .workbook_bytes()
        .await
        .map_err(store_failure)?;

    let today = OffsetDateTime::now_utc().date();
    let headers = file_headers(XLSX_CONTENT_TYPE, Some(&workbook_file_name(today)))?;
    Ok((headers, Body::from(bytes)))
}
