use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CatalogStore, StoreResult};
use crate::models::*;

/// `CatalogStore` backed by PostgreSQL. One statement per call.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────────────────────

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, slug, name, created_at FROM categories WHERE slug = $1 LIMIT 1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create_category(&self, new: NewCategory) -> StoreResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (slug, name)
            VALUES ($1, $2)
            RETURNING id, slug, name, created_at
            "#,
        )
        .bind(&new.slug)
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    // ── Facets ────────────────────────────────────────────────────────────────

    async fn create_category_metadata(
        &self,
        new: NewCategoryMetadata,
    ) -> StoreResult<CategoryMetadata> {
        let facet = sqlx::query_as::<_, CategoryMetadata>(
            r#"
            INSERT INTO category_metadata (id, name, category_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, category_id
            "#,
        )
        .bind(&new.id)
        .bind(&new.name)
        .bind(new.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(facet)
    }

    async fn list_category_metadata(
        &self,
        category_id: Uuid,
    ) -> StoreResult<Vec<CategoryMetadata>> {
        let facets = sqlx::query_as::<_, CategoryMetadata>(
            r#"
            SELECT id, name, category_id
            FROM category_metadata
            WHERE category_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(facets)
    }

    async fn create_metadata_value(&self, new: NewMetadataValue) -> StoreResult<MetadataValue> {
        let value = sqlx::query_as::<_, MetadataValue>(
            r#"
            INSERT INTO metadata_values (id, label, category_metadata_id)
            VALUES ($1, $2, $3)
            RETURNING id, label, category_metadata_id
            "#,
        )
        .bind(&new.id)
        .bind(&new.label)
        .bind(&new.category_metadata_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(value)
    }

    async fn list_metadata_values(&self, facet_ids: &[String]) -> StoreResult<Vec<MetadataValue>> {
        let values = sqlx::query_as::<_, MetadataValue>(
            r#"
            SELECT id, label, category_metadata_id
            FROM metadata_values
            WHERE category_metadata_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(facet_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    // ── Banners ───────────────────────────────────────────────────────────────

    async fn create_banner(&self, new: NewBanner) -> StoreResult<Banner> {
        let banner = sqlx::query_as::<_, Banner>(
            r#"
            INSERT INTO banners (img, link)
            VALUES ($1, $2)
            RETURNING id, img, link, created_at
            "#,
        )
        .bind(&new.img)
        .bind(&new.link)
        .fetch_one(&self.pool)
        .await?;

        Ok(banner)
    }

    async fn list_banners(&self) -> StoreResult<Vec<Banner>> {
        let banners = sqlx::query_as::<_, Banner>(
            "SELECT id, img, link, created_at FROM banners ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(banners)
    }

    // ── Products ──────────────────────────────────────────────────────────────

    async fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (label, price_cents, description, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, label, price_cents, description, category_id, created_at
            "#,
        )
        .bind(&new.label)
        .bind(new.price_cents)
        .bind(&new.description)
        .bind(new.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, label, price_cents, description, category_id, created_at
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list_products(&self, category_slug: Option<&str>) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.label, p.price_cents, p.description, p.category_id, p.created_at
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE ($1::text IS NULL OR c.slug = $1)
            ORDER BY p.created_at ASC, p.label ASC
            "#,
        )
        .bind(category_slug)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn create_product_image(&self, new: NewProductImage) -> StoreResult<ProductImage> {
        let image = sqlx::query_as::<_, ProductImage>(
            r#"
            INSERT INTO product_images (product_id, url)
            VALUES ($1, $2)
            RETURNING id, product_id, url
            "#,
        )
        .bind(new.product_id)
        .bind(&new.url)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    async fn list_product_images(&self, product_ids: &[Uuid]) -> StoreResult<Vec<ProductImage>> {
        let images = sqlx::query_as::<_, ProductImage>(
            r#"
            SELECT id, product_id, url
            FROM product_images
            WHERE product_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn create_product_metadata(
        &self,
        new: NewProductMetadata,
    ) -> StoreResult<ProductMetadata> {
        let link = sqlx::query_as::<_, ProductMetadata>(
            r#"
            INSERT INTO product_metadata (product_id, category_metadata_id, metadata_value_id)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, category_metadata_id, metadata_value_id
            "#,
        )
        .bind(new.product_id)
        .bind(&new.category_metadata_id)
        .bind(&new.metadata_value_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
