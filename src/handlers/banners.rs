use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;

use crate::{error::AppResult, AppState};

pub async fn list_banners(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let banners = state.store.list_banners().await?;
    debug!(count = banners.len(), "Listed banners");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "error": null,
            "banners": banners,
        })),
    ))
}
