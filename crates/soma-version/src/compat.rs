//! ---
//! soma_section: "01-version-reporting"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Compatibility checks against the embedded engine version."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
//! Checks that another component agrees with the engine version baked into
//! this build. Engine releases are only ABI compatible within a minor line.

use tracing::{debug, warn};

use crate::errors::{Result, VersionError};
use crate::version::{self, EmbeddedVersion};

/// Verify `built` and `found` belong to the same major/minor release line.
pub fn check_pair(built: EmbeddedVersion, found: EmbeddedVersion) -> Result<()> {
    if !built.same_release_line(&found) {
        warn!(%built, %found, "embedded engine release line mismatch");
        return Err(VersionError::Mismatch { built, found });
    }
    if built.patch != found.patch {
        debug!(%built, %found, "embedded engine patch levels differ");
    }
    Ok(())
}

/// Verify `found` is compatible with the embedded engine version.
pub fn check_compatible(found: EmbeddedVersion) -> Result<()> {
    check_pair(version::embedded(), found)
}

/// Parse `found` and verify it against the embedded engine version.
pub fn check_compatible_str(found: &str) -> Result<()> {
    check_compatible(found.parse()?)
}

/// Fail when the embedded engine is older than `required`.
pub fn require_at_least(required: EmbeddedVersion) -> Result<()> {
    let built = version::embedded();
    if built < required {
        warn!(%built, %required, "embedded engine older than required");
        return Err(VersionError::TooOld { built, required });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_line_passes() {
        let built = EmbeddedVersion::new(2, 18, 3);
        assert!(check_pair(built, built).is_ok());
        assert!(check_pair(built, EmbeddedVersion::new(2, 18, 0)).is_ok());
    }

    #[test]
    fn different_minor_fails() {
        let built = EmbeddedVersion::new(2, 18, 3);
        let found = EmbeddedVersion::new(2, 17, 3);
        match check_pair(built, found) {
            Err(VersionError::Mismatch { built: b, found: f }) => {
                assert_eq!(b, built);
                assert_eq!(f, found);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn different_major_fails() {
        assert!(check_pair(EmbeddedVersion::new(2, 18, 3), EmbeddedVersion::new(3, 18, 3)).is_err());
    }

    #[test]
    fn embedded_is_compatible_with_itself() {
        assert!(check_compatible(version::embedded()).is_ok());
        assert!(check_compatible_str(&version::labelled()).is_ok());
    }

    #[test]
    fn unparsable_input_is_parse_error() {
        assert!(matches!(
            check_compatible_str("not-a-version"),
            Err(VersionError::Parse(_))
        ));
    }

    #[test]
    fn minimum_version() {
        assert!(require_at_least(EmbeddedVersion::new(0, 0, 0)).is_ok());
        assert!(require_at_least(version::embedded()).is_ok());
        let err = require_at_least(EmbeddedVersion::new(u32::MAX, 0, 0)).unwrap_err();
        assert!(matches!(err, VersionError::TooOld { .. }));
        assert!(err.to_string().contains("older than required"));
    }
}
