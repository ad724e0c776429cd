use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SyncRunDto};

/// `POST /api/sync/{page}`
pub async fn run_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<u32>,
) -> Result<Json<ApiResponse<SyncRunDto>>, ApiError> {
    let outcome = state.sync_service().run(page).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}
