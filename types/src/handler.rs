//! Framework-neutral version endpoint contract.
//!
//! Everything an HTTP adapter needs to serve version information: handler
//! configuration, the header injection rule, and fully rendered responses
//! (status, content type, headers, body). Adapters only translate a
//! [`Rendered`] into their own response type.

use serde::Serialize;
use std::sync::Arc;

use crate::api::ErrorResponse;
use crate::info::VersionInfo;
use crate::DEFAULT_HEADER_PREFIX;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

const STATUS_OK: u16 = 200;
const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Configuration for the version endpoint handlers.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Version information to serve. `None` serves [`VersionInfo::default`].
    pub info: Option<Arc<VersionInfo>>,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Add version headers to handler responses.
    pub include_headers: bool,
    /// Prefix for the version headers. Empty means `"X-"`.
    pub header_prefix: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            info: None,
            pretty: false,
            include_headers: false,
            header_prefix: DEFAULT_HEADER_PREFIX.to_string(),
        }
    }
}

impl HandlerConfig {
    pub fn with_info(mut self, info: impl Into<Arc<VersionInfo>>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn include_headers(mut self, include_headers: bool) -> Self {
        self.include_headers = include_headers;
        self
    }

    pub fn header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    /// Apply the defaulting rules: a missing info falls back to
    /// [`VersionInfo::default`] and an empty prefix to `"X-"`.
    pub fn resolved(self) -> ResolvedHandlerConfig {
        ResolvedHandlerConfig {
            info: self.info.unwrap_or_else(|| Arc::new(VersionInfo::default())),
            pretty: self.pretty,
            include_headers: self.include_headers,
            header_prefix: resolve_prefix(self.header_prefix),
        }
    }
}

/// Handler configuration with all defaults applied.
#[derive(Debug, Clone)]
pub struct ResolvedHandlerConfig {
    pub info: Arc<VersionInfo>,
    pub pretty: bool,
    pub include_headers: bool,
    pub header_prefix: String,
}

impl ResolvedHandlerConfig {
    /// Headers to attach to handler responses, empty unless enabled.
    pub fn response_headers(&self) -> Vec<(String, String)> {
        if self.include_headers {
            version_headers(&self.info, &self.header_prefix)
        } else {
            Vec::new()
        }
    }

    /// Version info as a JSON response.
    pub fn render_json(&self) -> Rendered {
        render_json_value(self.info.as_ref(), self.pretty, self.response_headers())
    }

    /// Full version report as a plain text response.
    pub fn render_text(&self) -> Rendered {
        Rendered {
            status: STATUS_OK,
            content_type: CONTENT_TYPE_TEXT,
            headers: self.response_headers(),
            body: self.info.full_report(),
        }
    }
}

/// A response ready to be written by an HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub status: u16,
    pub content_type: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The display string (`1.2.3 (abc1234)`) as a plain text response.
pub fn render_simple(info: &VersionInfo) -> Rendered {
    Rendered {
        status: STATUS_OK,
        content_type: CONTENT_TYPE_TEXT,
        headers: Vec::new(),
        body: info.to_string(),
    }
}

/// Version headers for `info`.
///
/// `{prefix}Version` is always present. `{prefix}Commit` (short form),
/// `{prefix}Branch` and `{prefix}Build-Date` only appear when the field is
/// set.
pub fn version_headers(info: &VersionInfo, prefix: &str) -> Vec<(String, String)> {
    let mut headers = vec![(format!("{prefix}Version"), info.version.clone())];

    if info.has_commit() {
        headers.push((format!("{prefix}Commit"), info.short_commit().to_string()));
    }
    if info.has_branch() {
        headers.push((format!("{prefix}Branch"), info.branch.clone()));
    }
    if info.has_build_date() {
        headers.push((format!("{prefix}Build-Date"), info.build_date.clone()));
    }

    headers
}

/// `prefix`, or `"X-"` when it is empty.
pub fn resolve_prefix(prefix: impl Into<String>) -> String {
    let prefix = prefix.into();
    if prefix.is_empty() {
        DEFAULT_HEADER_PREFIX.to_string()
    } else {
        prefix
    }
}

fn render_json_value<T: Serialize + ?Sized>(
    value: &T,
    pretty: bool,
    headers: Vec<(String, String)>,
) -> Rendered {
    let serialized = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match serialized {
        Ok(body) => Rendered {
            status: STATUS_OK,
            content_type: CONTENT_TYPE_JSON,
            headers,
            body,
        },
        Err(e) => {
            let error = ErrorResponse::with_details("failed to marshal version info", e.to_string());
            Rendered {
                status: STATUS_INTERNAL_SERVER_ERROR,
                content_type: CONTENT_TYPE_JSON,
                headers,
                body: serde_json::to_string(&error)
                    .unwrap_or_else(|_| r#"{"error":"failed to marshal version info"}"#.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_config() {
        let config = HandlerConfig::default();
        assert!(config.info.is_none());
        assert!(!config.pretty);
        assert!(!config.include_headers);
        assert_eq!(config.header_prefix, "X-");
    }

    #[test]
    fn test_resolved_applies_defaults() {
        let resolved = HandlerConfig::default().header_prefix("").resolved();

        assert_eq!(resolved.header_prefix, "X-");
        assert_eq!(*resolved.info, VersionInfo::default());
    }

    #[test]
    fn test_resolved_keeps_supplied_values() {
        let info = VersionInfo::new("1.0.0", "abc123", "");
        let resolved = HandlerConfig::default()
            .with_info(info.clone())
            .pretty(true)
            .header_prefix("X-App-")
            .resolved();

        assert_eq!(*resolved.info, info);
        assert!(resolved.pretty);
        assert!(!resolved.include_headers);
        assert_eq!(resolved.header_prefix, "X-App-");
    }

    #[test]
    fn test_version_headers_all_fields() {
        let info =
            VersionInfo::new_with_branch("1.0.0", "abc1234567890", "2025-01-01T00:00:00Z", "main");
        let headers = version_headers(&info, "X-App-");

        assert_eq!(header(&headers, "X-App-Version"), Some("1.0.0"));
        assert_eq!(header(&headers, "X-App-Commit"), Some("abc1234"));
        assert_eq!(header(&headers, "X-App-Branch"), Some("main"));
        assert_eq!(
            header(&headers, "X-App-Build-Date"),
            Some("2025-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_version_headers_skip_unset() {
        for placeholder in ["", "unknown"] {
            let info = VersionInfo::new("1.0.0", placeholder, placeholder);
            let headers = version_headers(&info, "X-");

            assert_eq!(headers, vec![("X-Version".to_string(), "1.0.0".to_string())]);
        }
    }

    #[test]
    fn test_render_json() {
        let resolved = HandlerConfig::default()
            .with_info(VersionInfo::new("1.0.0", "abc123", ""))
            .resolved();
        let rendered = resolved.render_json();

        assert_eq!(rendered.status, 200);
        assert_eq!(rendered.content_type, "application/json");
        assert!(rendered.headers.is_empty());
        assert!(rendered.body.starts_with(r#"{"version":"1.0.0","commit":"abc123""#));
    }

    #[test]
    fn test_render_json_pretty_with_headers() {
        let resolved = HandlerConfig::default()
            .with_info(VersionInfo::new("1.0.0", "abc123", ""))
            .pretty(true)
            .include_headers(true)
            .resolved();
        let rendered = resolved.render_json();

        assert!(rendered.body.starts_with("{\n  \"version\""));
        assert_eq!(header(&rendered.headers, "X-Version"), Some("1.0.0"));
        assert_eq!(header(&rendered.headers, "X-Commit"), Some("abc123"));
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not serializable"))
        }
    }

    #[test]
    fn test_render_json_failure() {
        let rendered = render_json_value(&Unserializable, false, Vec::new());

        assert_eq!(rendered.status, 500);
        assert_eq!(rendered.content_type, "application/json");
        let body: serde_json::Value = serde_json::from_str(&rendered.body).unwrap();
        assert_eq!(body["error"], "failed to marshal version info");
        assert_eq!(body["details"], "not serializable");
    }

    #[test]
    fn test_render_text_and_simple() {
        let info = VersionInfo::new("1.0.0", "abc1234567890", "");
        let resolved = HandlerConfig::default().with_info(info.clone()).resolved();

        let text = resolved.render_text();
        assert_eq!(text.content_type, "text/plain; charset=utf-8");
        assert!(text.body.contains("Version:    1.0.0\n"));
        assert!(text.body.contains("Commit:     abc1234567890\n"));

        let simple = render_simple(&info);
        assert_eq!(simple.status, 200);
        assert_eq!(simple.body, "1.0.0 (abc1234)");
    }
}
