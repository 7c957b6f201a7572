use std::path::Path;
use std::sync::Arc;

use axum::Router;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod http;
pub mod models;
pub mod seed;
pub mod telemetry;

use crate::db::CatalogStore;

/// State handed to every handler. Clones share one store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

/// Catalog routes wrapped in the server middleware stack.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    http::bootstrap(handlers::router().with_state(state), static_dir)
}
