//! ---
//! soma_section: "01-version-reporting"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Error taxonomy for version parsing and compatibility checks."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
use thiserror::Error;

use crate::resolve::ResolveError;
use crate::version::EmbeddedVersion;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, VersionError>;

/// Errors raised by the fallible version surfaces. The core accessors in
/// [`crate::version`] never return these.
#[derive(Debug, Error)]
pub enum VersionError {
    /// Input text could not be parsed as a version.
    #[error(transparent)]
    Parse(#[from] ResolveError),
    /// Another component reports an engine version with a different major or minor.
    #[error("embedded engine mismatch: built against libtiledb {built}, found {found}")]
    Mismatch {
        /// Version baked into this build.
        built: EmbeddedVersion,
        /// Version reported by the other component.
        found: EmbeddedVersion,
    },
    /// The built engine is older than a required minimum.
    #[error("embedded engine libtiledb {built} is older than required {required}")]
    TooOld {
        /// Version baked into this build.
        built: EmbeddedVersion,
        /// Minimum version requested.
        required: EmbeddedVersion,
    },
}
