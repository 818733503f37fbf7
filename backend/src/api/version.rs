//! Version information API endpoints.
//!
//! Each constructor resolves its [`HandlerConfig`] once and returns a
//! [`MethodRouter`] that can be mounted on any router, whatever its state.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;
use tracing::{debug, warn};
use verstamp_types::{render_simple, HandlerConfig, Rendered, ResolvedHandlerConfig, VersionInfo};

/// Get version and build information as JSON.
///
/// Fields that are not set (empty or "unknown") are left out of the object.
#[utoipa::path(
    get,
    path = "/version",
    tag = "Version",
    responses(
        (status = 200, description = "Version information", body = VersionInfo),
        (status = 500, description = "Version information could not be serialized", body = verstamp_types::ErrorResponse)
    )
)]
pub async fn get_version(State(config): State<Arc<ResolvedHandlerConfig>>) -> Response {
    debug!("Serving version info as JSON");
    let rendered = config.render_json();
    if rendered.status != StatusCode::OK.as_u16() {
        warn!("Failed to serialize version info: {}", rendered.body);
    }
    into_response(rendered)
}

/// Get a human readable version report.
#[utoipa::path(
    get,
    path = "/version/text",
    tag = "Version",
    responses(
        (status = 200, description = "Multi-line version report", body = String, content_type = "text/plain")
    )
)]
pub async fn get_version_text(State(config): State<Arc<ResolvedHandlerConfig>>) -> Response {
    debug!("Serving version report");
    into_response(config.render_text())
}

/// Get the short version string, e.g. `1.2.3 (abc1234)`.
///
/// Always reports the compiled-in build defaults.
#[utoipa::path(
    get,
    path = "/version/simple",
    tag = "Version",
    responses(
        (status = 200, description = "Version string", body = String, content_type = "text/plain")
    )
)]
pub async fn get_version_simple() -> Response {
    debug!("Serving version string");
    into_response(render_simple(&VersionInfo::default()))
}

/// JSON version endpoint for `config`.
pub fn json_handler<S>(config: HandlerConfig) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(get_version).with_state(Arc::new(config.resolved()))
}

/// Plain text version endpoint for `config`.
pub fn text_handler<S>(config: HandlerConfig) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(get_version_text).with_state(Arc::new(config.resolved()))
}

/// Version string endpoint; takes no configuration.
pub fn simple_handler<S>() -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(get_version_simple)
}

/// Mount the JSON version endpoint at `path`.
pub fn register_endpoint<S>(router: Router<S>, path: &str, config: HandlerConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    debug!("Registering version endpoint at {}", path);
    router.route(path, json_handler(config))
}

/// Convert a rendered version response into an axum response.
pub fn into_response(rendered: Rendered) -> Response {
    let status = StatusCode::from_u16(rendered.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, rendered.body).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(rendered.content_type),
    );
    for (name, value) in &header_map(rendered.headers) {
        headers.insert(name.clone(), value.clone());
    }

    response
}

/// Build a header map from name/value pairs.
///
/// Pairs whose name or value is not valid HTTP are dropped with a warning;
/// the prefix is user supplied and may contain anything.
pub(crate) fn header_map(pairs: Vec<(String, String)>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => warn!("Skipping invalid version header {}: {:?}", name, value),
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_sets_status_and_headers() {
        let response = into_response(Rendered {
            status: 200,
            content_type: verstamp_types::CONTENT_TYPE_JSON,
            headers: vec![
                ("X-Version".to_string(), "1.0.0".to_string()),
                ("Bad Header".to_string(), "ignored".to_string()),
            ],
            body: "{}".to_string(),
        });

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(response.headers().get("x-version").unwrap(), "1.0.0");
        assert_eq!(response.headers().len(), 2);
    }

    #[test]
    fn test_into_response_error_status() {
        let response = into_response(Rendered {
            status: 500,
            content_type: verstamp_types::CONTENT_TYPE_JSON,
            headers: Vec::new(),
            body: r#"{"error":"boom"}"#.to_string(),
        });

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
