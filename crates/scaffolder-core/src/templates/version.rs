//! Version references for the scaffold snapshot and the core library pin

use semver::Version;
use std::fmt;

/// A version-control reference (tag, branch or commit)
///
/// The same reference selects the scaffold snapshot and pins the core
/// library dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRef {
    raw: String,
}

impl VersionRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The reference exactly as given, used for `clone --branch`
    pub fn clone_ref(&self) -> &str {
        &self.raw
    }

    /// The version used in the dependency pin
    ///
    /// Module versions require a leading `v`, so a bare `1.2.0` becomes
    /// `v1.2.0`. Branch names and commit hashes pass through unchanged.
    pub fn module_version(&self) -> String {
        if !self.raw.starts_with('v') && Version::parse(&self.raw).is_ok() {
            format!("v{}", self.raw)
        } else {
            self.raw.clone()
        }
    }

    /// Parsed semantic version, if this reference is a release tag
    pub fn release(&self) -> Option<Version> {
        parse_version(&self.raw)
    }

    pub fn is_release(&self) -> bool {
        self.release().is_some()
    }
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse version string, handling a leading 'v'
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_tag_passes_through() {
        let version = VersionRef::new("v1.2.0");
        assert_eq!(version.clone_ref(), "v1.2.0");
        assert_eq!(version.module_version(), "v1.2.0");
        assert!(version.is_release());
    }

    #[test]
    fn test_bare_semver_gains_prefix_for_pin_only() {
        let version = VersionRef::new("1.2.0");
        assert_eq!(version.clone_ref(), "1.2.0");
        assert_eq!(version.module_version(), "v1.2.0");
        assert_eq!(version.release(), Some(Version::new(1, 2, 0)));
    }

    #[test]
    fn test_branch_is_not_a_release() {
        let version = VersionRef::new("master");
        assert_eq!(version.module_version(), "master");
        assert!(!version.is_release());
    }

    #[test]
    fn test_prerelease_tag() {
        let version = VersionRef::new("v0.3.0-rc.1");
        assert!(version.is_release());
        assert_eq!(version.module_version(), "v0.3.0-rc.1");
    }
}
