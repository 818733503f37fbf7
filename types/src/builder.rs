//! Fluent construction of [`VersionInfo`].

use crate::info::{HostRuntime, VersionInfo};

/// Accumulates fields and produces a [`VersionInfo`].
///
/// Runtime fields are captured when the builder is created. No validation
/// happens here; call [`VersionInfo::validate`] on the result if needed.
///
/// ```
/// use verstamp_types::VersionInfoBuilder;
///
/// let info = VersionInfoBuilder::new()
///     .with_version("1.2.3")
///     .with_commit("abc1234567")
///     .build();
/// assert_eq!(info.to_string(), "1.2.3 (abc1234)");
/// ```
#[derive(Debug, Clone)]
pub struct VersionInfoBuilder {
    info: VersionInfo,
}

impl Default for VersionInfoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionInfoBuilder {
    pub fn new() -> Self {
        let runtime = HostRuntime::detect();
        Self {
            info: VersionInfo {
                version: String::new(),
                commit: String::new(),
                build_date: String::new(),
                branch: String::new(),
                runtime_version: runtime.runtime_version,
                platform: runtime.platform,
                compiler: runtime.compiler,
            },
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.info.commit = commit.into();
        self
    }

    pub fn with_build_date(mut self, build_date: impl Into<String>) -> Self {
        self.info.build_date = build_date.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.info.branch = branch.into();
        self
    }

    pub fn build(self) -> VersionInfo {
        self.info
    }
}
