use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product, scoped to one category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub label: String,
    /// Price stored as integer cents (e.g. 8990 = 89.90)
    pub price_cents: i64,
    pub description: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price as a decimal amount for display purposes.
    pub fn price(&self) -> f64 {
        self.price_cents as f64 / 100.0
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub label: String,
    pub price_cents: i64,
    pub description: String,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct NewProductImage {
    pub product_id: Uuid,
    pub url: String,
}

/// Links a product to one value of one facet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductMetadata {
    pub id: Uuid,
    pub product_id: Uuid,
    pub category_metadata_id: String,
    pub metadata_value_id: String,
}

#[derive(Debug, Clone)]
pub struct NewProductMetadata {
    pub product_id: Uuid,
    pub category_metadata_id: String,
    pub metadata_value_id: String,
}

/// Product with its images, for richer API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithImages {
    pub id: Uuid,
    pub label: String,
    pub price: f64,
    pub description: String,
    pub category_id: Uuid,
    pub images: Vec<String>,
}

impl ProductWithImages {
    pub fn new(product: Product, images: Vec<ProductImage>) -> Self {
        Self {
            id: product.id,
            price: product.price(),
            label: product.label,
            description: product.description,
            category_id: product.category_id,
            images: images.into_iter().map(|img| img.url).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(price_cents: i64) -> Product {
        Product {
            id: Uuid::new_v4(),
            label: "Camisa Teste".to_string(),
            price_cents,
            description: "Teste".to_string(),
            category_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn price_conversion() {
        assert!((make(8990).price() - 89.90).abs() < 1e-9);
        assert!((make(8000).price() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn with_images_keeps_image_order() {
        let product = make(6740);
        let id = product.id;
        let images = ["a-1.jpg", "a-2.jpg"].map(|url| ProductImage {
            id: Uuid::new_v4(),
            product_id: id,
            url: url.to_string(),
        });
        let view = ProductWithImages::new(product, images.into());
        assert_eq!(view.id, id);
        assert_eq!(view.images, vec!["a-1.jpg", "a-2.jpg"]);
        assert!((view.price - 67.40).abs() < 1e-9);
    }

    #[test]
    fn serializes_price_as_decimal() {
        let view = ProductWithImages::new(make(9450), vec![]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["price"], 94.5);
        assert_eq!(json["images"], serde_json::json!([]));
    }
}
