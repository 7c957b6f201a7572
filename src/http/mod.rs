//! Middleware stack shared by every route table: permissive CORS, static
//! files, request tracing and the terminal error handler.

use std::any::Any;
use std::path::Path;

use axum::{response::Response, Router};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::error;

use crate::error::error_response;

mod extract;

pub use extract::{JsonBody, RawJson};

/// Path whose body reaches its handler as raw bytes.
pub const STRIPE_WEBHOOK_PATH: &str = "/webhook/stripe";

/// Every path under [`STRIPE_WEBHOOK_PATH`], with or without a trailing slash.
pub const STRIPE_WEBHOOK_ROUTES: [&str; 3] = [
    STRIPE_WEBHOOK_PATH,
    "/webhook/stripe/",
    "/webhook/stripe/*rest",
];

/// Wrap a route table with the server's middleware.
///
/// Paths the route table does not match fall through to files under
/// `static_dir`.
pub fn bootstrap(routes: Router, static_dir: &Path) -> Router {
    routes
        .fallback_service(ServeDir::new(static_dir))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    error!(error = %message, "Request handler panicked");
    error_response(message)
}
