use axum::{extract::State, Extension, Json};

use crate::error::AppResult;
use crate::models::Identity;
use crate::services::dashboard::{self, Dashboard};
use crate::state::AppState;

/// Handler for the signed-in user's activity summary
pub async fn show(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Dashboard>> {
    let dashboard = dashboard::assemble(state.catalog.as_ref(), &state.watchlist, &identity).await?;
    Ok(Json(dashboard))
}
