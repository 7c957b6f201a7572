use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::models::*;

pub mod memory;
pub mod postgres;

pub use memory::{MemorySnapshot, MemoryStore, WriteKind};
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("unique constraint violated on {entity}: {key}")]
    Conflict { entity: &'static str, key: String },

    #[error("{entity} references missing {parent} {key}")]
    MissingParent {
        entity: &'static str,
        parent: &'static str,
        key: String,
    },

    #[error("injected failure on {0}")]
    Injected(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Number of persisted records per entity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub categories: usize,
    pub category_metadata: usize,
    pub banners: usize,
    pub metadata_values: usize,
    pub products: usize,
    pub product_images: usize,
    pub product_metadata: usize,
}

/// Create/find access to the catalog tables.
///
/// Every call is an independent unit of work: there is no transaction
/// spanning several calls, so a sequence interrupted by an error leaves the
/// writes that already succeeded in place.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;
    async fn create_category(&self, new: NewCategory) -> StoreResult<Category>;

    async fn create_category_metadata(
        &self,
        new: NewCategoryMetadata,
    ) -> StoreResult<CategoryMetadata>;
    async fn list_category_metadata(
        &self,
        category_id: Uuid,
    ) -> StoreResult<Vec<CategoryMetadata>>;

    async fn create_metadata_value(&self, new: NewMetadataValue) -> StoreResult<MetadataValue>;
    /// Values of the given facets, in creation order.
    async fn list_metadata_values(&self, facet_ids: &[String]) -> StoreResult<Vec<MetadataValue>>;

    async fn create_banner(&self, new: NewBanner) -> StoreResult<Banner>;
    async fn list_banners(&self) -> StoreResult<Vec<Banner>>;

    async fn create_product(&self, new: NewProduct) -> StoreResult<Product>;
    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>>;
    /// Products, optionally restricted to the category with the given slug.
    async fn list_products(&self, category_slug: Option<&str>) -> StoreResult<Vec<Product>>;

    async fn create_product_image(&self, new: NewProductImage) -> StoreResult<ProductImage>;
    /// Images of the given products, in creation order.
    async fn list_product_images(&self, product_ids: &[Uuid]) -> StoreResult<Vec<ProductImage>>;

    async fn create_product_metadata(
        &self,
        new: NewProductMetadata,
    ) -> StoreResult<ProductMetadata>;

    /// Release connections. Later calls may fail.
    async fn close(&self) {}
}

/// Open the connection pool and apply pending migrations.
pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connecting to PostgreSQL")?;
    info!("Database connection pool established.");

    info!("Running migrations...");
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        pool.close().await;
        return Err(e).context("running migrations");
    }
    info!("Migrations complete.");

    Ok(pool)
}
