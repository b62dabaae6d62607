use axum::extract::State;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::entities::officers;

/// `GET /api/officers`
pub async fn list_officers(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<Vec<officers::Model>>, ApiError> {
    let officers = state.officer_service().list_officers().await?;
    Ok(ApiResponse::ok(officers))
}
