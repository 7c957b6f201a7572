//! One-shot catalog seeding.
//!
//! Idempotence is coarse: the run is skipped entirely when the `camisas`
//! category exists. No step is transactional, so a run that fails midway
//! leaves its earlier writes behind and a rerun then finds the category
//! and skips; the partial rows have to be removed by hand.

use anyhow::Context;
use futures::future::try_join_all;
use tracing::info;

use crate::db::{CatalogStore, EntityCounts};
use crate::models::*;

pub mod data;

#[derive(Debug)]
pub enum SeedOutcome {
    /// The guard category was found and nothing was written.
    AlreadySeeded { category: Category },
    Seeded(EntityCounts),
}

/// Insert the fixed catalog, parents before children.
pub async fn run(store: &dyn CatalogStore) -> anyhow::Result<SeedOutcome> {
    info!("Starting database seeding...");

    info!("Checking if database has already been seeded...");
    let existing = store
        .find_category_by_slug(data::CATEGORY.slug)
        .await
        .context("checking for an existing category")?;
    if let Some(category) = existing {
        info!(
            category = %category.name,
            "Database has already been seeded. Skipping to avoid duplicate records."
        );
        return Ok(SeedOutcome::AlreadySeeded { category });
    }
    info!("No existing data found. Proceeding with seeding...");

    // ── Category + facet ──────────────────────────────────────────────────────

    let category = store
        .create_category(NewCategory {
            slug: data::CATEGORY.slug.to_string(),
            name: data::CATEGORY.name.to_string(),
        })
        .await
        .context("creating category")?;
    info!(name = %category.name, "Category created");

    let facet = store
        .create_category_metadata(NewCategoryMetadata {
            id: data::FACET.id.to_string(),
            name: data::FACET.name.to_string(),
            category_id: category.id,
        })
        .await
        .context("creating category metadata")?;
    info!(name = %facet.name, "Category metadata created");

    // ── Independent batches ───────────────────────────────────────────────────

    let banners = try_join_all(data::BANNERS.iter().map(|b| {
        store.create_banner(NewBanner {
            img: b.img.to_string(),
            link: b.link.to_string(),
        })
    }))
    .await
    .context("creating banners")?;
    info!(count = banners.len(), "Banners created");

    let values = try_join_all(data::METADATA_VALUES.iter().map(|v| {
        store.create_metadata_value(NewMetadataValue {
            id: v.id.to_string(),
            label: v.label.to_string(),
            category_metadata_id: facet.id.clone(),
        })
    }))
    .await
    .context("creating metadata values")?;
    info!(count = values.len(), "Metadata values created");

    // try_join_all keeps input order, so products[i] matches data::PRODUCTS[i].
    let products = try_join_all(data::PRODUCTS.iter().map(|p| {
        store.create_product(NewProduct {
            label: p.label.to_string(),
            price_cents: p.price_cents,
            description: p.description.to_string(),
            category_id: category.id,
        })
    }))
    .await
    .context("creating products")?;
    info!(count = products.len(), "Products created");

    // ── Images, one at a time ─────────────────────────────────────────────────

    let mut images = Vec::new();
    for product in &products {
        let Some(urls) = data::images_for(&product.label) else {
            continue;
        };
        for url in urls {
            let image = store
                .create_product_image(NewProductImage {
                    product_id: product.id,
                    url: url.to_string(),
                })
                .await
                .with_context(|| format!("creating image {url} for {}", product.label))?;
            images.push(image);
        }
    }
    info!(count = images.len(), "Product images created");

    let pairs = products.iter().zip(data::PRODUCT_VALUE_IDS);
    let links = try_join_all(pairs.map(|(product, value_id)| {
        store.create_product_metadata(NewProductMetadata {
            product_id: product.id,
            category_metadata_id: facet.id.clone(),
            metadata_value_id: value_id.to_string(),
        })
    }))
    .await
    .context("creating product metadata")?;
    info!(count = links.len(), "Product metadata created");

    info!("Database seeding completed successfully!");

    Ok(SeedOutcome::Seeded(EntityCounts {
        categories: 1,
        category_metadata: 1,
        banners: banners.len(),
        metadata_values: values.len(),
        products: products.len(),
        product_images: images.len(),
        product_metadata: links.len(),
    }))
}

/// `run`, then close the store whether or not the run succeeded.
pub async fn run_and_close(store: &dyn CatalogStore) -> anyhow::Result<SeedOutcome> {
    let outcome = run(store).await;
    store.close().await;
    outcome
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::db::{MemoryStore, WriteKind};

    fn full_counts() -> EntityCounts {
        EntityCounts {
            categories: 1,
            category_metadata: 1,
            banners: 2,
            metadata_values: 5,
            products: 5,
            product_images: 10,
            product_metadata: 5,
        }
    }

    #[tokio::test]
    async fn full_run_creates_the_whole_catalog() {
        let store = MemoryStore::new();

        let outcome = run(&store).await.unwrap();

        let report = match outcome {
            SeedOutcome::Seeded(report) => report,
            other => panic!("expected a fresh seed, got {other:?}"),
        };
        assert_eq!(report, full_counts());
        assert_eq!(store.counts(), full_counts());
        assert_eq!(store.writes(), 29);
    }

    #[tokio::test]
    async fn second_run_writes_nothing() {
        let store = MemoryStore::new();
        run(&store).await.unwrap();
        let writes = store.writes();

        let outcome = run(&store).await.unwrap();

        match outcome {
            SeedOutcome::AlreadySeeded { category } => assert_eq!(category.slug, "camisas"),
            other => panic!("expected the guard to trigger, got {other:?}"),
        }
        assert_eq!(store.writes(), writes);
        assert_eq!(store.counts(), full_counts());
    }

    #[tokio::test]
    async fn every_reference_points_at_a_row_from_the_same_run() {
        let store = MemoryStore::new();
        run(&store).await.unwrap();
        let snap = store.snapshot();

        let category_id = snap.categories[0].id;
        let product_ids: HashSet<_> = snap.products.iter().map(|p| p.id).collect();
        let value_ids: HashSet<_> = snap
            .metadata_values
            .iter()
            .map(|v| v.id.as_str())
            .collect();

        assert_eq!(snap.category_metadata[0].category_id, category_id);
        assert!(snap
            .metadata_values
            .iter()
            .all(|v| v.category_metadata_id == "tech"));
        assert!(snap.products.iter().all(|p| p.category_id == category_id));
        assert!(snap
            .product_images
            .iter()
            .all(|i| product_ids.contains(&i.product_id)));
        for link in &snap.product_metadata {
            assert!(product_ids.contains(&link.product_id));
            assert_eq!(link.category_metadata_id, "tech");
            assert!(value_ids.contains(link.metadata_value_id.as_str()));
        }
    }

    #[tokio::test]
    async fn products_link_to_their_positional_value() {
        let store = MemoryStore::new();
        run(&store).await.unwrap();
        let snap = store.snapshot();

        let value_of = |label: &str| {
            let product = snap.products.iter().find(|p| p.label == label).unwrap();
            let links: Vec<_> = snap
                .product_metadata
                .iter()
                .filter(|l| l.product_id == product.id)
                .collect();
            assert_eq!(links.len(), 1, "{label} should have exactly one link");
            links[0].metadata_value_id.clone()
        };

        assert_eq!(value_of("Camisa RN"), "react-native");
        assert_eq!(value_of("Camisa React"), "react");
        assert_eq!(value_of("Camisa NodeJS"), "node");
        assert_eq!(value_of("Camisa JavaScript"), "javascript");
        assert_eq!(value_of("Camisa PHP"), "php");
    }

    #[tokio::test]
    async fn images_follow_product_then_table_order() {
        let store = MemoryStore::new();
        run(&store).await.unwrap();
        let snap = store.snapshot();

        let urls: Vec<&str> = snap
            .product_images
            .iter()
            .map(|i| i.url.as_str())
            .collect();
        let expected = [
            "camisa-rn-1.jpg",
            "camisa-rn-2.jpg",
            "camisa-react-1.jpg",
            "camisa-react-2.jpg",
        ];
        assert_eq!(&urls[..4], expected);

        let rn = snap
            .products
            .iter()
            .find(|p| p.label == "Camisa RN")
            .unwrap();
        assert!(snap.product_images[..2]
            .iter()
            .all(|i| i.product_id == rn.id));
    }

    #[tokio::test]
    async fn prices_are_stored_in_cents() {
        let store = MemoryStore::new();
        run(&store).await.unwrap();
        let snap = store.snapshot();

        let price = |label: &str| {
            let product = snap.products.iter().find(|p| p.label == label);
            product.unwrap().price_cents
        };
        assert_eq!(price("Camisa RN"), 8990);
        assert_eq!(price("Camisa React"), 9450);
        assert_eq!(price("Camisa NodeJS"), 8000);
        assert_eq!(price("Camisa JavaScript"), 6740);
        assert_eq!(price("Camisa PHP"), 6990);
    }

    #[tokio::test]
    async fn failure_after_facet_leaves_partial_state_and_blocks_rerun() {
        let store = MemoryStore::new();
        store.fail_on(WriteKind::Banner);

        let err = run(&store).await.unwrap_err();
        assert!(format!("{err:#}").contains("creating banners"));

        let partial = store.counts();
        assert_eq!(partial.categories, 1);
        assert_eq!(partial.category_metadata, 1);
        assert_eq!(partial.products, 0);

        // The store is healthy again, but the guard still sees the category.
        store.clear_failures();
        let outcome = run(&store).await.unwrap();
        assert!(matches!(outcome, SeedOutcome::AlreadySeeded { .. }));
        assert_eq!(store.counts(), partial);
    }

    #[tokio::test]
    async fn failure_while_creating_images_keeps_earlier_images() {
        let store = MemoryStore::new();
        // category, facet, 2 banners, 5 values, 5 products, then 3 images
        store.fail_after(17);

        let err = run(&store).await.unwrap_err();
        assert!(format!("{err:#}").contains("camisa-react-2.jpg"));

        let counts = store.counts();
        assert_eq!(counts.products, 5);
        assert_eq!(counts.product_images, 3);
        assert_eq!(counts.product_metadata, 0);
    }

    #[tokio::test]
    async fn guard_ignores_other_categories() {
        let store = MemoryStore::new();
        store
            .create_category(NewCategory {
                slug: "canecas".into(),
                name: "Canecas".into(),
            })
            .await
            .unwrap();

        let outcome = run(&store).await.unwrap();

        assert!(matches!(outcome, SeedOutcome::Seeded(_)));
        assert_eq!(store.counts().categories, 2);
    }

    #[tokio::test]
    async fn store_is_closed_after_a_successful_run() {
        let store = MemoryStore::new();

        let outcome = run_and_close(&store).await.unwrap();

        assert!(matches!(outcome, SeedOutcome::Seeded(_)));
        assert!(store.is_closed());
    }

    #[tokio::test]
    async fn store_is_closed_after_a_failed_run() {
        let store = MemoryStore::new();
        store.fail_on(WriteKind::Product);

        let err = run_and_close(&store).await.unwrap_err();

        assert!(format!("{err:#}").contains("creating products"));
        assert!(store.is_closed());
    }
}
