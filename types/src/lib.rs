//! Shared types for verstamp.
//!
//! This crate holds the version information model and the framework-neutral
//! rendering used by the HTTP adapters in the backend crate. It has no
//! dependency on any HTTP toolkit.

/// Default port for the verstamp server.
pub const DEFAULT_PORT: u16 = 8080;

/// Default prefix for version response headers (`X-Version`, ...).
pub const DEFAULT_HEADER_PREFIX: &str = "X-";

/// Placeholder meaning "not set" for commit and build date.
pub const UNKNOWN: &str = "unknown";

/// Number of characters kept by [`VersionInfo::short_commit`].
pub const SHORT_COMMIT_LEN: usize = 7;

pub mod api;
pub mod builder;
pub mod defaults;
pub mod handler;
pub mod info;
pub mod timestamp;

// Re-export commonly used types
pub use api::ErrorResponse;
pub use builder::VersionInfoBuilder;
pub use defaults::BuildDefaults;
pub use handler::{
    render_simple, version_headers, HandlerConfig, Rendered, ResolvedHandlerConfig,
    CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT,
};
pub use info::{is_unset, VersionError, VersionInfo};
pub use timestamp::{is_zero_timestamp, parse_timestamp, TimestampError, ZERO_TIMESTAMP};
