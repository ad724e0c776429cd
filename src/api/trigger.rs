//! The public page-sync trigger: `GET /?<marker>=<anything>&page=<n>`.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::AppState;

/// Reads `page` the way a loose query string deserves: digits only,
/// anything else or anything below 1 means page 1.
fn page_from_query(params: &HashMap<String, String>) -> u32 {
    params
        .get("page")
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Runs one page when the marker parameter is present.
///
/// A processed page answers with its status line; fetch failures and empty
/// pages answer with an empty body. Without the marker there is nothing here.
pub async fn handle_trigger(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !params.contains_key(&state.config().server.trigger_param) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let page = page_from_query(&params);

    let body = match state.sync_service().run(page).await {
        Ok(outcome) => outcome.status_line().unwrap_or_default(),
        Err(e) => {
            warn!(page, error = %e, "Sync trigger rejected");
            String::new()
        }
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
