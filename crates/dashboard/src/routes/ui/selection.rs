use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use log::warn;
use serde::Deserialize;

use super::dashboard::render_dashboard;
use crate::{
    routes::{store_failure, unknown_station_type, HandlerError},
    session::SessionCookie,
    templates::fragments::svg_to_lat_lon,
    view::{DashboardQuery, MapMode, Tab},
    AppState,
};

/// Body of every selection form; `q`, `mode` and `tab` carry the view state
/// the response should be rendered with
#[derive(Debug, Default, Deserialize)]
pub struct SelectionForm {
    pub station_type: Option<String>,
    pub display: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Map click in `viewBox` units
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub q: Option<String>,
    #[serde(default)]
    pub mode: MapMode,
    #[serde(default)]
    pub tab: Tab,
}

impl SelectionForm {
    pub fn query(&self) -> DashboardQuery {
        DashboardQuery {
            q: self.q.clone(),
            mode: self.mode,
            tab: self.tab,
        }
    }

    /// Clicked position, given directly or as a point on the rendered map;
    /// `NaN` and infinities are not a position
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, self.x, self.y) {
            (Some(lat), Some(lon), _, _) => Some((lat, lon)),
            (_, _, Some(x), Some(y)) => svg_to_lat_lon(x, y),
            _ => None,
        }
        .filter(|(lat, lon)| lat.is_finite() && lon.is_finite())
    }
}

/// Handler for the station type filter (POST /selection/type)
pub async fn type_handler(
    State(state): State<Arc<AppState>>,
    session: SessionCookie,
    headers: HeaderMap,
    Form(form): Form<SelectionForm>,
) -> Result<Response, HandlerError> {
    let station_type = form.station_type.clone().ok_or((
        StatusCode::BAD_REQUEST,
        "Missing station_type".to_string(),
    ))?;

    let snapshot = state.stations.snapshot().await.map_err(store_failure)?;
    if !snapshot.index.has_type(&station_type) {
        return Err(unknown_station_type(&station_type));
    }

    render_dashboard(&state, session, &headers, form.query(), move |index, selection| {
        selection.change_type(index, &station_type);
        Ok(())
    })
    .await
}

/// Handler for the station picker (POST /selection/pick)
pub async fn pick_handler(
    State(state): State<Arc<AppState>>,
    session: SessionCookie,
    headers: HeaderMap,
    Form(form): Form<SelectionForm>,
) -> Result<Response, HandlerError> {
    let display = form
        .display
        .clone()
        .ok_or((StatusCode::BAD_REQUEST, "Missing display".to_string()))?;

    render_dashboard(&state, session, &headers, form.query(), move |index, selection| {
        selection.pick(index, &display).map(|_| ())
    })
    .await
}

/// Handler for a map click (POST /selection/spatial); proposes the nearest
/// station without selecting it
pub async fn spatial_handler(
    State(state): State<Arc<AppState>>,
    session: SessionCookie,
    headers: HeaderMap,
    Form(form): Form<SelectionForm>,
) -> Result<Response, HandlerError> {
    let (latitude, longitude) = form.position().ok_or_else(|| {
        warn!("map click without a usable position: {:?}", form);
        (
            StatusCode::BAD_REQUEST,
            "Click position is missing or outside the map".to_string(),
        )
    })?;

    render_dashboard(&state, session, &headers, form.query(), move |index, selection| {
        selection.spatial_pick(index, latitude, longitude);
        Ok(())
    })
    .await
}

/// Handler for "Use this station in selection" (POST /selection/confirm)
pub async fn confirm_handler(
    State(state): State<Arc<AppState>>,
    session: SessionCookie,
    headers: HeaderMap,
    Form(form): Form<SelectionForm>,
) -> Result<Response, HandlerError> {
    render_dashboard(&state, session, &headers, form.query(), |_, selection| {
        selection.confirm().map(|_| ())
    })
    .await
}

/// Handler for dropping the pending map pick (POST /selection/dismiss)
pub async fn dismiss_handler(
    State(state): State<Arc<AppState>>,
    session: SessionCookie,
    headers: HeaderMap,
    Form(form): Form<SelectionForm>,
) -> Result<Response, HandlerError> {
    render_dashboard(&state, session, &headers, form.query(), |_, selection| {
        selection.dismiss();
        Ok(())
    })
    .await
}
