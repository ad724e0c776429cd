use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, EntryDto};

/// `GET /api/entries/by-tour/{tour_id}`
pub async fn get_by_tour(
    State(state): State<Arc<AppState>>,
    Path(tour_id): Path<String>,
) -> Result<Json<ApiResponse<EntryDto>>, ApiError> {
    let entry = state
        .store()
        .get_entry_by_tour_id(&tour_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tour", &tour_id))?;

    Ok(Json(ApiResponse::success(entry)))
}
