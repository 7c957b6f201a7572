use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{CatalogStore, EntityCounts, StoreError, StoreResult};
use crate::models::*;

/// Entity type of a create call, used to target failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Category,
    CategoryMetadata,
    MetadataValue,
    Banner,
    Product,
    ProductImage,
    ProductMetadata,
}

impl WriteKind {
    fn name(self) -> &'static str {
        match self {
            WriteKind::Category => "category",
            WriteKind::CategoryMetadata => "category_metadata",
            WriteKind::MetadataValue => "metadata_value",
            WriteKind::Banner => "banner",
            WriteKind::Product => "product",
            WriteKind::ProductImage => "product_image",
            WriteKind::ProductMetadata => "product_metadata",
        }
    }
}

/// Cloned view of every table, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    pub categories: Vec<Category>,
    pub category_metadata: Vec<CategoryMetadata>,
    pub metadata_values: Vec<MetadataValue>,
    pub banners: Vec<Banner>,
    pub products: Vec<Product>,
    pub product_images: Vec<ProductImage>,
    pub product_metadata: Vec<ProductMetadata>,
}

impl MemorySnapshot {
    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            categories: self.categories.len(),
            category_metadata: self.category_metadata.len(),
            banners: self.banners.len(),
            metadata_values: self.metadata_values.len(),
            products: self.products.len(),
            product_images: self.product_images.len(),
            product_metadata: self.product_metadata.len(),
        }
    }

    fn has_category(&self, id: Uuid) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    fn has_facet(&self, id: &str) -> bool {
        self.category_metadata.iter().any(|m| m.id == id)
    }

    fn has_value_in_facet(&self, id: &str, facet_id: &str) -> bool {
        self.metadata_values
            .iter()
            .any(|v| v.id == id && v.category_metadata_id == facet_id)
    }

    fn has_product(&self, id: Uuid) -> bool {
        self.products.iter().any(|p| p.id == id)
    }
}

#[derive(Debug, Default)]
struct Inner {
    tables: MemorySnapshot,
    writes: usize,
    fail_on: Option<WriteKind>,
    fail_after: Option<usize>,
    closed: bool,
}

impl Inner {
    /// Count the attempt, then apply any configured failure.
    fn begin_write(&mut self, kind: WriteKind) -> StoreResult<()> {
        if self.fail_on == Some(kind) {
            return Err(StoreError::Injected(kind.name()));
        }
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(StoreError::Injected(kind.name()));
        }
        self.writes += 1;
        Ok(())
    }
}

/// In-process `CatalogStore`. Keys and references are checked against the
/// same rules the SQL schema declares, including the composite key tying a
/// product link's value to its facet. Used by tests and local runs without
/// PostgreSQL.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent create of `kind` fails.
    pub fn fail_on(&self, kind: WriteKind) {
        self.lock().fail_on = Some(kind);
    }

    /// Creates succeed until `writes` in total have been performed.
    pub fn fail_after(&self, writes: usize) {
        self.lock().fail_after = Some(writes);
    }

    pub fn clear_failures(&self) {
        let mut inner = self.lock();
        inner.fail_on = None;
        inner.fail_after = None;
    }

    /// Number of successful create calls so far.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    pub fn counts(&self) -> EntityCounts {
        self.lock().tables.counts()
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        self.lock().tables.clone()
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn conflict(entity: &'static str, key: String) -> StoreError {
    StoreError::Conflict { entity, key }
}

fn missing(entity: &'static str, parent: &'static str, key: impl ToString) -> StoreError {
    StoreError::MissingParent {
        entity,
        parent,
        key: key.to_string(),
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        let inner = self.lock();
        let found = inner.tables.categories.iter().find(|c| c.slug == slug);
        Ok(found.cloned())
    }

    async fn create_category(&self, new: NewCategory) -> StoreResult<Category> {
        let mut inner = self.lock();
        if inner.tables.categories.iter().any(|c| c.slug == new.slug) {
            return Err(conflict("category", new.slug));
        }
        inner.begin_write(WriteKind::Category)?;

        let category = Category {
            id: Uuid::new_v4(),
            slug: new.slug,
            name: new.name,
            created_at: Utc::now(),
        };
        inner.tables.categories.push(category.clone());
        Ok(category)
    }

    async fn create_category_metadata(
        &self,
        new: NewCategoryMetadata,
    ) -> StoreResult<CategoryMetadata> {
        let mut inner = self.lock();
        if inner.tables.has_facet(&new.id) {
            return Err(conflict("category_metadata", new.id));
        }
        if !inner.tables.has_category(new.category_id) {
            return Err(missing("category_metadata", "category", new.category_id));
        }
        inner.begin_write(WriteKind::CategoryMetadata)?;

        let facet = CategoryMetadata {
            id: new.id,
            name: new.name,
            category_id: new.category_id,
        };
        inner.tables.category_metadata.push(facet.clone());
        Ok(facet)
    }

    async fn list_category_metadata(
        &self,
        category_id: Uuid,
    ) -> StoreResult<Vec<CategoryMetadata>> {
        let inner = self.lock();
        Ok(inner
            .tables
            .category_metadata
            .iter()
            .filter(|m| m.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn create_metadata_value(&self, new: NewMetadataValue) -> StoreResult<MetadataValue> {
        let mut inner = self.lock();
        if inner.tables.metadata_values.iter().any(|v| v.id == new.id) {
            return Err(conflict("metadata_value", new.id));
        }
        if !inner.tables.has_facet(&new.category_metadata_id) {
            return Err(missing(
                "metadata_value",
                "category_metadata",
                new.category_metadata_id,
            ));
        }
        inner.begin_write(WriteKind::MetadataValue)?;

        let value = MetadataValue {
            id: new.id,
            label: new.label,
            category_metadata_id: new.category_metadata_id,
        };
        inner.tables.metadata_values.push(value.clone());
        Ok(value)
    }

    async fn list_metadata_values(&self, facet_ids: &[String]) -> StoreResult<Vec<MetadataValue>> {
        let inner = self.lock();
        Ok(inner
            .tables
            .metadata_values
            .iter()
            .filter(|v| facet_ids.contains(&v.category_metadata_id))
            .cloned()
            .collect())
    }

    async fn create_banner(&self, new: NewBanner) -> StoreResult<Banner> {
        let mut inner = self.lock();
        inner.begin_write(WriteKind::Banner)?;

        let banner = Banner {
            id: Uuid::new_v4(),
            img: new.img,
            link: new.link,
            created_at: Utc::now(),
        };
        inner.tables.banners.push(banner.clone());
        Ok(banner)
    }

    async fn list_banners(&self) -> StoreResult<Vec<Banner>> {
        Ok(self.lock().tables.banners.clone())
    }

    async fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
        let mut inner = self.lock();
        if !inner.tables.has_category(new.category_id) {
            return Err(missing("product", "category", new.category_id));
        }
        inner.begin_write(WriteKind::Product)?;

        let product = Product {
            id: Uuid::new_v4(),
            label: new.label,
            price_cents: new.price_cents,
            description: new.description,
            category_id: new.category_id,
            created_at: Utc::now(),
        };
        inner.tables.products.push(product.clone());
        Ok(product)
    }

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let inner = self.lock();
        let found = inner.tables.products.iter().find(|p| p.id == id);
        Ok(found.cloned())
    }

    async fn list_products(&self, category_slug: Option<&str>) -> StoreResult<Vec<Product>> {
        let inner = self.lock();
        let category_id = match category_slug {
            Some(slug) => match inner.tables.categories.iter().find(|c| c.slug == slug) {
                Some(category) => Some(category.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        Ok(inner
            .tables
            .products
            .iter()
            .filter(|p| category_id.map_or(true, |id| p.category_id == id))
            .cloned()
            .collect())
    }

    async fn create_product_image(&self, new: NewProductImage) -> StoreResult<ProductImage> {
        let mut inner = self.lock();
        if !inner.tables.has_product(new.product_id) {
            return Err(missing("product_image", "product", new.product_id));
        }
        inner.begin_write(WriteKind::ProductImage)?;

        let image = ProductImage {
            id: Uuid::new_v4(),
            product_id: new.product_id,
            url: new.url,
        };
        inner.tables.product_images.push(image.clone());
        Ok(image)
    }

    async fn list_product_images(&self, product_ids: &[Uuid]) -> StoreResult<Vec<ProductImage>> {
        let inner = self.lock();
        Ok(inner
            .tables
            .product_images
            .iter()
            .filter(|img| product_ids.contains(&img.product_id))
            .cloned()
            .collect())
    }

    async fn create_product_metadata(
        &self,
        new: NewProductMetadata,
    ) -> StoreResult<ProductMetadata> {
        let mut inner = self.lock();
        let tables = &inner.tables;
        if !tables.has_product(new.product_id) {
            return Err(missing("product_metadata", "product", new.product_id));
        }
        if !tables.has_facet(&new.category_metadata_id) {
            return Err(missing(
                "product_metadata",
                "category_metadata",
                new.category_metadata_id,
            ));
        }
        // (metadata_value_id, category_metadata_id) is a composite foreign key.
        if !tables.has_value_in_facet(&new.metadata_value_id, &new.category_metadata_id) {
            return Err(missing(
                "product_metadata",
                "metadata_value",
                new.metadata_value_id,
            ));
        }
        inner.begin_write(WriteKind::ProductMetadata)?;

        let link = ProductMetadata {
            id: Uuid::new_v4(),
            product_id: new.product_id,
            category_metadata_id: new.category_metadata_id,
            metadata_value_id: new.metadata_value_id,
        };
        inner.tables.product_metadata.push(link.clone());
        Ok(link)
    }

    async fn close(&self) {
        self.lock().closed = true;
    }
}
