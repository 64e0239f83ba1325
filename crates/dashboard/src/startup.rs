use crate::{
    admin_reload_handler, confirm_handler, dashboard_handler, directory_fragment_handler,
    dismiss_handler, export_csv_handler, export_workbook_handler, layout_download_handler,
    layout_image_handler, pick_handler, spatial_handler, stations_api_handler, type_handler,
    LayoutImages, SelectionDefaults, SessionStore, StationData, StationStore,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub remote_url: String,
    pub stations: Arc<dyn StationData>,
    pub sessions: Arc<SessionStore>,
    pub layouts: LayoutImages,
}

impl AppState {
    pub fn new(
        remote_url: String,
        static_dir: String,
        stations: Arc<dyn StationData>,
        layouts: LayoutImages,
        defaults: SelectionDefaults,
    ) -> Self {
        Self {
            static_dir,
            remote_url,
            stations,
            sessions: Arc::new(SessionStore::new(defaults)),
            layouts,
        }
    }
}

/// Load the workbook and wire up shared state; an unreadable workbook stops
/// the server from starting
pub async fn build_app_state(
    remote_url: String,
    static_dir: String,
    workbook: String,
    assets_dir: String,
    defaults: SelectionDefaults,
) -> Result<AppState, anyhow::Error> {
    let store = StationStore::open(&workbook)
        .await
        .map_err(|e| anyhow!("error loading station workbook {}: {}", workbook, e))?;

    let snapshot = store
        .snapshot()
        .await
        .map_err(|e| anyhow!("error reading station snapshot: {}", e))?;
    info!(
        "loaded {} stations across {} station types",
        snapshot.index.len(),
        snapshot.index.station_types().len()
    );

    let layouts = LayoutImages::new(assets_dir);
    info!("layout images read from {}", layouts.dir().display());

    Ok(AppState::new(
        remote_url,
        static_dir,
        Arc::new(store),
        layouts,
        defaults,
    ))
}

pub fn app(app_state: AppState) -> Router {
    let serve_static = ServeDir::new(&app_state.static_dir);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // UI routes
        .route("/", get(dashboard_handler))
        .route("/selection/type", post(type_handler))
        .route("/selection/pick", post(pick_handler))
        .route("/selection/spatial", post(spatial_handler))
        .route("/selection/confirm", post(confirm_handler))
        .route("/selection/dismiss", post(dismiss_handler))
        // HTMX fragment routes
        .route("/fragments/directory", get(directory_fragment_handler))
        // Downloads
        .route("/export/stations.csv", get(export_csv_handler))
        .route("/export/workbook", get(export_workbook_handler))
        .route("/layouts/{station_type}", get(layout_image_handler))
        .route(
            "/layouts/{station_type}/download",
            get(layout_download_handler),
        )
        // API routes
        .route("/api/stations", get(stations_api_handler))
        .route("/admin/reload", post(admin_reload_handler))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .nest_service("/static", serve_static)
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_string();
    let method = request.method().clone();
    info!(target: "http_request", "new request, {} {}", method.as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(
        target: "http_response",
        "response, {} {}, code: {}, time: {}",
        method.as_str(),
        path,
        response.status().as_str(),
        response_time
    );

    response
}
