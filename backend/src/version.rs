//! Version information served by this process.

use tracing::{info, warn};
use verstamp_types::{BuildDefaults, VersionInfo};

use crate::config::BuildOverrides;

/// Resolve the version information to serve.
///
/// Compiled-in build defaults, with configured overrides layered on top.
pub fn resolve(overrides: &BuildOverrides) -> VersionInfo {
    let defaults = BuildDefaults::compiled().with_overrides(
        overrides.version.as_deref(),
        overrides.commit.as_deref(),
        overrides.build_date.as_deref(),
        overrides.branch.as_deref(),
    );
    let version = VersionInfo::from_defaults(&defaults);

    if let Err(e) = version.validate() {
        warn!("Serving invalid version information: {}", e);
    } else if version.is_development_build() {
        warn!("Serving development build version '{}'", version.version);
    }
    info!("Version: {}", version);

    version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_overrides() {
        let version = resolve(&BuildOverrides::default());
        assert_eq!(version, VersionInfo::default());
    }

    #[test]
    fn test_resolve_with_overrides() {
        let version = resolve(&BuildOverrides {
            version: Some("3.1.4".to_string()),
            commit: Some("0123456789abcdef".to_string()),
            build_date: None,
            branch: Some("".to_string()),
        });

        assert_eq!(version.version, "3.1.4");
        assert_eq!(version.short_commit(), "0123456");
        assert_eq!(version.to_string(), "3.1.4 (0123456)");
        assert_eq!(version.branch, BuildDefaults::compiled().branch);
    }
}
