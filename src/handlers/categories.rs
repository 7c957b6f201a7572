use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::{
    error::AppResult,
    models::{Facet, MetadataValue},
    AppState,
};

/// Category with every facet and its allowed values.
pub async fn get_category_metadata(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Some(category) = state.store.find_category_by_slug(&slug).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Categoria não encontrada" })),
        ));
    };

    let facets = state.store.list_category_metadata(category.id).await?;
    let facet_ids: Vec<String> = facets.iter().map(|f| f.id.clone()).collect();

    let mut values: HashMap<String, Vec<MetadataValue>> = HashMap::new();
    for value in state.store.list_metadata_values(&facet_ids).await? {
        values
            .entry(value.category_metadata_id.clone())
            .or_default()
            .push(value);
    }

    let metadata: Vec<Facet> = facets
        .into_iter()
        .map(|f| Facet {
            values: values.remove(&f.id).unwrap_or_default(),
            id: f.id,
            name: f.name,
        })
        .collect();

    debug!(slug = %category.slug, facets = metadata.len(), "Fetched category metadata");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "error": null,
            "category": category,
            "metadata": metadata,
        })),
    ))
}
