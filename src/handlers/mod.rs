pub mod banners;
pub mod categories;
pub mod products;
pub mod webhook;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use serde_json::json;

use crate::{error::AppResult, http::STRIPE_WEBHOOK_ROUTES, AppState};

/// Catalog route table, mounted under [`crate::http::bootstrap`].
pub fn router() -> Router<AppState> {
    let mut routes = Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route("/banners", get(banners::list_banners))
        .route("/products", get(products::list_products))
        .route("/product/:id", get(products::get_product))
        .route(
            "/category/:slug/metadata",
            get(categories::get_category_metadata),
        );

    for path in STRIPE_WEBHOOK_ROUTES {
        routes = routes.route(path, any(webhook::stripe));
    }
    routes
}

pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "pong": true }))
}

pub async fn health(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    state.store.ping().await?;
    let body = json!({ "status": "ok", "service": "b7store" });
    Ok((StatusCode::OK, Json(body)))
}
