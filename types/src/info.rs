//! Version information record and its derived views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::defaults::BuildDefaults;
use crate::timestamp::{parse_timestamp, TimestampError, ZERO_TIMESTAMP};
use crate::{SHORT_COMMIT_LEN, UNKNOWN};

/// Width of the label column in [`VersionInfo::full_report`].
const LABEL_WIDTH: usize = 12;

/// Validation errors for [`VersionInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Build and version information for an application.
///
/// `commit` and `build_date` count as unset when empty or `"unknown"`;
/// `branch` counts as unset when empty. Unset fields are left out of every
/// derived view (display string, report, JSON, map and response headers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct VersionInfo {
    /// Semantic version number (e.g. "1.2.3")
    pub version: String,
    /// Git commit hash (short or full)
    #[serde(default, skip_serializing_if = "is_unset")]
    pub commit: String,
    /// Build timestamp, preferably RFC 3339
    #[serde(default, skip_serializing_if = "is_unset")]
    pub build_date: String,
    /// Git branch name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch: String,
    /// Compiler version the binary was built with
    #[serde(
        rename = "go_version",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub runtime_version: String,
    /// OS/arch pair (e.g. "linux/x86_64")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub platform: String,
    /// Compiler and target triple
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub compiler: String,
}

/// `true` for the empty string and the `"unknown"` placeholder.
pub fn is_unset(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN
}

/// Runtime fields describing the executing binary.
pub(crate) struct HostRuntime {
    pub runtime_version: String,
    pub platform: String,
    pub compiler: String,
}

impl HostRuntime {
    pub(crate) fn detect() -> Self {
        Self {
            runtime_version: env!("VERSTAMP_RUSTC_VERSION").to_string(),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
            compiler: format!("rustc ({})", env!("VERSTAMP_TARGET")),
        }
    }
}

impl VersionInfo {
    /// Create version info; runtime fields are filled in from the host.
    pub fn new(
        version: impl Into<String>,
        commit: impl Into<String>,
        build_date: impl Into<String>,
    ) -> Self {
        Self::new_with_branch(version, commit, build_date, String::new())
    }

    /// Create version info including a branch name.
    pub fn new_with_branch(
        version: impl Into<String>,
        commit: impl Into<String>,
        build_date: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        let runtime = HostRuntime::detect();
        Self {
            version: version.into(),
            commit: commit.into(),
            build_date: build_date.into(),
            branch: branch.into(),
            runtime_version: runtime.runtime_version,
            platform: runtime.platform,
            compiler: runtime.compiler,
        }
    }

    /// Create version info from a set of build defaults.
    pub fn from_defaults(defaults: &BuildDefaults) -> Self {
        Self::new_with_branch(
            defaults.version.as_str(),
            defaults.commit.as_str(),
            defaults.build_date.as_str(),
            defaults.branch.as_str(),
        )
    }

    pub fn has_commit(&self) -> bool {
        !is_unset(&self.commit)
    }

    pub fn has_build_date(&self) -> bool {
        !is_unset(&self.build_date)
    }

    pub fn has_branch(&self) -> bool {
        !self.branch.is_empty()
    }

    /// First seven characters of the commit, or `""` when no commit is set.
    pub fn short_commit(&self) -> &str {
        if !self.has_commit() {
            return "";
        }
        match self.commit.char_indices().nth(SHORT_COMMIT_LEN) {
            Some((idx, _)) => &self.commit[..idx],
            None => &self.commit,
        }
    }

    /// Detailed multi-line report, one aligned line per set field.
    pub fn full_report(&self) -> String {
        let mut lines = vec![("Version:", self.version.as_str())];

        if self.has_commit() {
            lines.push(("Commit:", self.commit.as_str()));
        }
        if self.has_branch() {
            lines.push(("Branch:", self.branch.as_str()));
        }
        if self.has_build_date() {
            lines.push(("Built:", self.build_date.as_str()));
        }

        lines.push(("Go version:", self.runtime_version.as_str()));
        lines.push(("Platform:", self.platform.as_str()));
        lines.push(("Compiler:", self.compiler.as_str()));

        lines
            .into_iter()
            .map(|(label, value)| format!("{:<width$}{}\n", label, value, width = LABEL_WIDTH))
            .collect()
    }

    /// Compact JSON representation.
    pub fn to_json(&self) -> String {
        json_or_fallback(&self.version, serde_json::to_string(self))
    }

    /// JSON representation indented with two spaces.
    pub fn to_json_pretty(&self) -> String {
        json_or_fallback(&self.version, serde_json::to_string_pretty(self))
    }

    /// Field map using the JSON key names. Unset fields are left out.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::from([
            ("version", self.version.clone()),
            ("go_version", self.runtime_version.clone()),
            ("platform", self.platform.clone()),
            ("compiler", self.compiler.clone()),
        ]);

        if self.has_commit() {
            map.insert("commit", self.commit.clone());
        }
        if self.has_branch() {
            map.insert("branch", self.branch.clone());
        }
        if self.has_build_date() {
            map.insert("build_date", self.build_date.clone());
        }

        map
    }

    /// Check required fields. Only `version` is required.
    pub fn validate(&self) -> Result<(), VersionError> {
        if self.version.is_empty() {
            return Err(VersionError::MissingField("version"));
        }
        Ok(())
    }

    /// `true` for the versions `""`, `"dev"` and `"development"`.
    pub fn is_development_build(&self) -> bool {
        matches!(self.version.as_str(), "" | "dev" | "development")
    }

    /// Build date as a timestamp.
    ///
    /// Returns [`ZERO_TIMESTAMP`] both when no date is set and when the date
    /// is in an unrecognised format. Use
    /// [`try_parse_build_timestamp`](Self::try_parse_build_timestamp) to tell
    /// the two apart.
    pub fn parse_build_timestamp(&self) -> DateTime<Utc> {
        self.try_parse_build_timestamp().unwrap_or(ZERO_TIMESTAMP)
    }

    pub fn try_parse_build_timestamp(&self) -> Result<DateTime<Utc>, TimestampError> {
        parse_timestamp(&self.build_date)
    }
}

impl Default for VersionInfo {
    /// Version info from the compiled-in build defaults.
    fn default() -> Self {
        Self::from_defaults(&BuildDefaults::compiled())
    }
}

impl fmt::Display for VersionInfo {
    /// `1.2.3` or `1.2.3 (abc1234)` when a commit is known.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_commit() {
            write!(f, "{} ({})", self.version, self.short_commit())
        } else {
            write!(f, "{}", self.version)
        }
    }
}

fn json_or_fallback(version: &str, result: serde_json::Result<String>) -> String {
    result.unwrap_or_else(|e| {
        serde_json::json!({
            "version": version,
            "error": e.to_string(),
        })
        .to_string()
    })
}
