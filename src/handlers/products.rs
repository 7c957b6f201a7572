use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ProductImage, ProductWithImages},
    AppState,
};

#[derive(Debug, Deserialize, Default)]
pub struct ProductFilters {
    /// Category slug
    pub metadata: Option<String>,
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilters>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let slug = filters.metadata.as_deref();
    let products = state.store.list_products(slug).await?;

    let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let mut images: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    for image in state.store.list_product_images(&ids).await? {
        images.entry(image.product_id).or_default().push(image);
    }

    let products: Vec<ProductWithImages> = products
        .into_iter()
        .map(|p| {
            let imgs = images.remove(&p.id).unwrap_or_default();
            ProductWithImages::new(p, imgs)
        })
        .collect();

    debug!(count = products.len(), category = ?filters.metadata, "Listed products");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "error": null,
            "products": products,
        })),
    ))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let product = match Uuid::parse_str(&id) {
        Ok(id) => state.store.find_product(id).await?,
        Err(_) => None,
    };

    let Some(product) = product else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Produto não encontrado" })),
        ));
    };

    let images = state.store.list_product_images(&[product.id]).await?;
    debug!(id = %product.id, "Fetched product");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "error": null,
            "product": ProductWithImages::new(product, images),
        })),
    ))
}
