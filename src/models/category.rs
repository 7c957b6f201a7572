use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root of the catalog tree, addressed publicly by its unique slug.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub slug: String,
    pub name: String,
}

/// A facet of a category (e.g. "Tecnologia"). `id` is a natural key.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryMetadata {
    pub id: String,
    pub name: String,
    pub category_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewCategoryMetadata {
    pub id: String,
    pub name: String,
    pub category_id: Uuid,
}

/// One selectable value within a facet. `id` is a natural key.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MetadataValue {
    pub id: String,
    pub label: String,
    pub category_metadata_id: String,
}

#[derive(Debug, Clone)]
pub struct NewMetadataValue {
    pub id: String,
    pub label: String,
    pub category_metadata_id: String,
}

/// Facet joined with its allowed values, as served by the route table.
#[derive(Debug, Clone, Serialize)]
pub struct Facet {
    pub id: String,
    pub name: String,
    pub values: Vec<MetadataValue>,
}
