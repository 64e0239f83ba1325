use axum::http::StatusCode;
use log::{error, warn};

use crate::{export::ExportError, selection::SelectionError, stations::StoreError};

/// Error half of every handler result
pub type HandlerError = (StatusCode, String);

pub fn store_failure(err: StoreError) -> HandlerError {
    error!("error reading station data: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Station data unavailable: {}", err),
    )
}

pub fn selection_failure(err: SelectionError) -> HandlerError {
    warn!("rejected selection: {}", err);
    (StatusCode::BAD_REQUEST, err.to_string())
}

pub fn export_failure(err: ExportError) -> HandlerError {
    error!("error exporting stations: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to export stations: {}", err),
    )
}

pub fn unknown_station_type(station_type: &str) -> HandlerError {
    warn!("unknown station type requested: {}", station_type);
    (
        StatusCode::NOT_FOUND,
        format!("Unknown station type: {}", station_type),
    )
}
