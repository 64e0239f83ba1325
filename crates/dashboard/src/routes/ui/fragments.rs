use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};

use crate::{
    routes::{store_failure, HandlerError},
    templates::fragments::directory_table,
    view::{directory, DashboardQuery},
    AppState,
};

/// Handler for the directory table fragment (GET /fragments/directory),
/// re-run as the search box is typed into
pub async fn directory_fragment_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, HandlerError> {
    let snapshot = state.stations.snapshot().await.map_err(store_failure)?;
    let rows = directory(&snapshot.index, query.search_term());
    Ok(Html(directory_table(&rows, &query).into_string()))
}
