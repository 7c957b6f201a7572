#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use b7store::db::MemoryStore;
use b7store::{build_router, seed, AppState};

/// A static directory that does not exist, so unmatched paths are 404s.
pub fn no_static_dir() -> PathBuf {
    let name = format!("b7store-missing-{}", uuid::Uuid::new_v4());
    std::env::temp_dir().join(name)
}

/// Full application router over a freshly seeded in-memory store.
pub async fn seeded_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    seed::run(store.as_ref()).await.unwrap();
    (app_with(store.clone(), &no_static_dir()), store)
}

pub fn app_with(store: Arc<MemoryStore>, static_dir: &Path) -> Router {
    build_router(AppState::new(store), static_dir)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    let body = response.into_body().collect().await.unwrap();
    body.to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
