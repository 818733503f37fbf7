//! Default version values injected at build time.

use crate::UNKNOWN;

/// Version values used when no explicit information is supplied.
///
/// `compiled()` picks up values set through the environment of the build
/// (`VERSTAMP_VERSION`, `VERSTAMP_COMMIT`, `VERSTAMP_BUILD_DATE`,
/// `VERSTAMP_BRANCH`). Construct once at startup and pass it to whatever
/// needs it; it is never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDefaults {
    pub version: String,
    pub commit: String,
    pub build_date: String,
    pub branch: String,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            version: "dev".to_string(),
            commit: UNKNOWN.to_string(),
            build_date: UNKNOWN.to_string(),
            branch: String::new(),
        }
    }
}

impl BuildDefaults {
    /// Defaults baked into the binary at compile time.
    ///
    /// Explicitly injected values come first, then whatever git reported when
    /// the crate was built, then [`BuildDefaults::default`]. The version is
    /// never taken from git.
    pub fn compiled() -> Self {
        let fallback = Self::default();
        Self {
            version: non_empty(option_env!("VERSTAMP_VERSION")).unwrap_or(fallback.version),
            commit: non_empty(option_env!("VERSTAMP_COMMIT"))
                .or_else(|| non_empty(Some(env!("VERSTAMP_GIT_HASH"))))
                .unwrap_or(fallback.commit),
            build_date: non_empty(option_env!("VERSTAMP_BUILD_DATE"))
                .or_else(|| non_empty(Some(env!("VERSTAMP_BUILD_TIMESTAMP"))))
                .unwrap_or(fallback.build_date),
            branch: non_empty(option_env!("VERSTAMP_BRANCH"))
                .or_else(|| non_empty(Some(env!("VERSTAMP_GIT_BRANCH"))))
                .unwrap_or(fallback.branch),
        }
    }

    /// Layer overrides on top of these defaults. Empty overrides are ignored.
    pub fn with_overrides(
        self,
        version: Option<&str>,
        commit: Option<&str>,
        build_date: Option<&str>,
        branch: Option<&str>,
    ) -> Self {
        Self {
            version: non_empty(version).unwrap_or(self.version),
            commit: non_empty(commit).unwrap_or(self.commit),
            build_date: non_empty(build_date).unwrap_or(self.build_date),
            branch: non_empty(branch).unwrap_or(self.branch),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let defaults = BuildDefaults::default();
        assert_eq!(defaults.version, "dev");
        assert_eq!(defaults.commit, "unknown");
        assert_eq!(defaults.build_date, "unknown");
        assert!(defaults.branch.is_empty());
    }

    #[test]
    fn test_compiled_never_empty() {
        let compiled = BuildDefaults::compiled();
        assert!(!compiled.version.is_empty());
        assert!(!compiled.commit.is_empty());
        assert!(!compiled.build_date.is_empty());
    }

    #[test]
    fn test_overrides() {
        let defaults = BuildDefaults::default().with_overrides(
            Some("2.0.0"),
            Some("  "),
            None,
            Some("release/2.0"),
        );

        assert_eq!(defaults.version, "2.0.0");
        assert_eq!(defaults.commit, "unknown");
        assert_eq!(defaults.build_date, "unknown");
        assert_eq!(defaults.branch, "release/2.0");
    }
}
