use axum::{http::StatusCode, Json};
use tracing::info;

use crate::{error::AppResult, http::RawJson};

/// Payment provider callback. The body is kept byte-for-byte; signature
/// verification belongs to the consumer of the event.
pub async fn stripe(RawJson(body): RawJson) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let event_type = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|event| event.get("type")?.as_str().map(str::to_owned));

    info!(
        bytes = body.len(),
        event_type = event_type.as_deref().unwrap_or("unknown"),
        "Received Stripe webhook"
    );

    let ack = serde_json::json!({ "received": true });
    Ok((StatusCode::OK, Json(ack)))
}
