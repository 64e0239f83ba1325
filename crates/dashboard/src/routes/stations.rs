use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, Json},
};
use log::info;
use serde::Deserialize;

use crate::{
    routes::{store_failure, unknown_station_type, HandlerError},
    stations::StationRecord,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct StationsQuery {
    #[serde(rename = "type")]
    pub station_type: Option<String>,
    pub q: Option<String>,
}

/// Handler for the station listing (GET /api/stations?type=&q=)
///
/// Records come back in table order, narrowed by type and search term.
pub async fn stations_api_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<Vec<StationRecord>>, HandlerError> {
    let snapshot = state.stations.snapshot().await.map_err(store_failure)?;
    let index = &snapshot.index;

    if let Some(station_type) = query.station_type.as_deref() {
        if !index.has_type(station_type) {
            return Err(unknown_station_type(station_type));
        }
    }

    let stations = index
        .search(query.q.as_deref())
        .into_iter()
        .filter(|record| match query.station_type.as_deref() {
            Some(station_type) => record.station_type == station_type,
            None => true,
        })
        .cloned()
        .collect();

    Ok(Json(stations))
}

/// Handler for a forced workbook reload (POST /admin/reload)
///
/// On failure the previous data keeps being served.
pub async fn admin_reload_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, HandlerError> {
    let snapshot = state.stations.reload().await.map_err(store_failure)?;
    info!(
        "manual reload: {} stations, fingerprint {:?}",
        snapshot.index.len(),
        snapshot.fingerprint
    );
    Ok(Html(format!("Reloaded {} stations", snapshot.index.len())))
}
