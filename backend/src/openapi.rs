//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use verstamp_types::{ErrorResponse, VersionInfo};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::version::get_version,
        crate::api::version::get_version_text,
        crate::api::version::get_version_simple,
    ),
    components(
        schemas(
            VersionInfo,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Version", description = "Build and version information endpoints")
    ),
    info(
        title = "verstamp API",
        version = "0.1.0",
        description = "Build and version metadata served as JSON, plain text or response headers",
        license(
            name = "MIT OR Apache-2.0"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_version_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/version"));
        assert!(doc.paths.paths.contains_key("/version/text"));
        assert!(doc.paths.paths.contains_key("/version/simple"));
    }
}
