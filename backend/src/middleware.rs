//! Middleware adding version headers to every response.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::sync::Arc;

use crate::api::version::header_map;
use verstamp_types::{handler::resolve_prefix, version_headers, VersionInfo};

/// Pre-built header set shared by all requests.
#[derive(Debug, Clone)]
pub struct VersionHeaders(Arc<HeaderMap>);

impl VersionHeaders {
    /// Headers for `info` (or [`VersionInfo::default`]) using `prefix`
    /// (or `"X-"` when empty).
    pub fn new(info: Option<Arc<VersionInfo>>, prefix: &str) -> Self {
        let info = info.unwrap_or_else(|| Arc::new(VersionInfo::default()));
        let prefix = resolve_prefix(prefix);
        Self(Arc::new(header_map(version_headers(&info, &prefix))))
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.0
    }
}

/// Adds the version headers to the response of the wrapped handler.
///
/// Headers already set by the handler are left untouched.
pub async fn version_headers_middleware(
    State(headers): State<VersionHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let response_headers = response.headers_mut();
    for (name, value) in headers.headers() {
        if !response_headers.contains_key(name) {
            response_headers.insert(name.clone(), value.clone());
        }
    }

    response
}

/// Wrap every route of `router` with [`version_headers_middleware`].
pub fn with_version_headers<S>(
    router: Router<S>,
    info: Option<Arc<VersionInfo>>,
    prefix: &str,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(
        VersionHeaders::new(info, prefix),
        version_headers_middleware,
    ))
}
