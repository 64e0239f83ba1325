use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use hyper::header::SET_COOKIE;

use crate::{
    routes::{selection_failure, store_failure, HandlerError},
    selection::{SelectionError, SelectionState},
    session::{session_cookie_header, SessionCookie},
    stations::StationIndex,
    templates::{dashboard_content, dashboard_page},
    view::{render, DashboardQuery, Tab},
    AppState,
};

/// Handler for the dashboard page (GET /)
///
/// HTMX navigation (tabs, map mode, search) gets the `#dashboard` fragment,
/// anything else the full page.
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    session: SessionCookie,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, HandlerError> {
    render_dashboard(&state, session, &headers, query, |_, _| Ok(())).await
}

/// Apply `update` to the session's selection, then render the dashboard
/// from the same snapshot
pub(super) async fn render_dashboard<F>(
    state: &AppState,
    session: SessionCookie,
    headers: &HeaderMap,
    query: DashboardQuery,
    update: F,
) -> Result<Response, HandlerError>
where
    F: FnOnce(&StationIndex, &mut SelectionState) -> Result<(), SelectionError>,
{
    let snapshot = state.stations.snapshot().await.map_err(store_failure)?;
    let index = &snapshot.index;

    let (session_id, outcome) = state.sessions.with_session(session.0, index, |selection| {
        update(index, &mut *selection).map(|()| render(index, selection, &query))
    });
    let cookie = [(SET_COOKIE, session_cookie_header(session_id))];
    // A rejected update still created or touched the session; keep the
    // browser bound to it
    let view = match outcome {
        Ok(view) => view,
        Err(e) => return Ok((cookie, selection_failure(e)).into_response()),
    };

    let layout = (view.query.tab == Tab::StaticMap)
        .then(|| state.layouts.status(&view.active_type));

    let markup = if is_htmx(headers) {
        dashboard_content(&view, layout.as_ref())
    } else {
        dashboard_page(&state.remote_url, &view, layout.as_ref())
    };

    Ok((cookie, Html(markup.into_string())).into_response())
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}
