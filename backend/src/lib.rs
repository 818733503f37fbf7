//! verstamp backend library.
//!
//! This module exposes the application builder for use in tests, along with
//! the axum handlers and middleware for embedding version endpoints in other
//! services.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use verstamp_types::VersionInfo;

pub mod api;
pub mod config;
pub mod middleware;
pub mod openapi;
pub mod version;

pub use api::version::{json_handler, register_endpoint, simple_handler, text_handler};
pub use middleware::with_version_headers;

use config::EndpointConfig;

/// Create the Axum application router with default settings.
///
/// This function is used by integration tests.
pub fn create_app() -> Router {
    create_app_with_config(
        &EndpointConfig::default(),
        Arc::new(VersionInfo::default()),
    )
}

/// Create the Axum application router serving `info`.
pub fn create_app_with_config(endpoint: &EndpointConfig, info: Arc<VersionInfo>) -> Router {
    let handler_config = endpoint.handler_config(info.clone());

    let router = Router::new().route("/health", get(health));
    let router = register_endpoint(router, &endpoint.normalized_path(), handler_config.clone())
        .route(&endpoint.sub_path("text"), text_handler(handler_config))
        .route(&endpoint.sub_path("simple"), simple_handler())
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        );

    let router = if endpoint.headers_middleware {
        tracing::info!("Version headers enabled for all responses");
        with_version_headers(router, Some(info), &endpoint.header_prefix)
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}
