//! ---
//! soma_section: "01-version-reporting"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Version of the embedded array storage engine in use."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
//! Version of the TileDB Embedded library this build is linked against.
//!
//! The version is fixed when the crate is compiled (see `build.rs`), so every
//! accessor here is a pure lookup that is safe to call from any thread.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::VersionError;
use crate::resolve::{self, VERSION_LABEL};

/// A `(major, minor, patch)` engine version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EmbeddedVersion {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl EmbeddedVersion {
    /// Build a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The version as a `(major, minor, patch)` tuple.
    #[must_use]
    pub const fn triple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    /// Rendering prefixed with the engine label, e.g. `libtiledb=2.15.0`.
    #[must_use]
    pub fn labelled(&self) -> String {
        format!("{VERSION_LABEL}{self}")
    }

    /// True when both versions share major and minor.
    #[must_use]
    pub const fn same_release_line(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl fmt::Display for EmbeddedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for EmbeddedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(resolve::parse_version_text(s)?.into())
    }
}

impl From<(u32, u32, u32)> for EmbeddedVersion {
    fn from((major, minor, patch): (u32, u32, u32)) -> Self {
        Self::new(major, minor, patch)
    }
}

/// Where the build script found the engine version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
    /// `SOMA_EMBEDDED_VERSION` was set.
    Override,
    /// Read from `tiledb_version.h` under `TILEDB_INCLUDE_DIR`.
    Header,
    /// The release the workspace is pinned against.
    Pinned,
}

impl VersionSource {
    /// Lowercase name as emitted by the build script.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            VersionSource::Override => "override",
            VersionSource::Header => "header",
            VersionSource::Pinned => "pinned",
        }
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Build script guarantees digits only; anything else fails compilation.
const fn parse_component(raw: &str) -> u32 {
    let bytes = raw.as_bytes();
    assert!(!bytes.is_empty(), "empty embedded version component");
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        assert!(
            bytes[i].is_ascii_digit(),
            "non-numeric embedded version component"
        );
        value = value * 10 + (bytes[i] - b'0') as u32;
        i += 1;
    }
    value
}

/// The engine version baked into this build.
pub const EMBEDDED: EmbeddedVersion = EmbeddedVersion::new(
    parse_component(env!("SOMA_EMBEDDED_VERSION_MAJOR")),
    parse_component(env!("SOMA_EMBEDDED_VERSION_MINOR")),
    parse_component(env!("SOMA_EMBEDDED_VERSION_PATCH")),
);

static VERSION_STRING: Lazy<String> = Lazy::new(|| EMBEDDED.to_string());

/// The embedded engine version.
#[must_use]
pub const fn embedded() -> EmbeddedVersion {
    EMBEDDED
}

/// Canonical `MAJOR.MINOR.PATCH` rendering of the embedded engine version.
#[must_use]
pub fn as_string() -> String {
    VERSION_STRING.clone()
}

/// Same as [`as_string`] without allocating.
#[must_use]
pub fn as_str() -> &'static str {
    VERSION_STRING.as_str()
}

/// The embedded engine version as `(major, minor, patch)`.
#[must_use]
pub const fn embedded_version_triple() -> (u32, u32, u32) {
    EMBEDDED.triple()
}

/// [`as_string`] with the `libtiledb=` label.
#[must_use]
pub fn labelled() -> String {
    EMBEDDED.labelled()
}

/// How the build resolved the embedded version.
#[must_use]
pub fn source() -> VersionSource {
    match env!("SOMA_EMBEDDED_VERSION_SOURCE") {
        "override" => VersionSource::Override,
        "header" => VersionSource::Header,
        _ => VersionSource::Pinned,
    }
}

/// Serialisable summary of the embedded engine version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionReport {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
    /// Canonical rendering.
    pub version: String,
    /// Where the build found it.
    pub source: VersionSource,
}

/// Summary of the embedded version for machine readable output.
#[must_use]
pub fn report() -> VersionReport {
    VersionReport {
        major: EMBEDDED.major,
        minor: EMBEDDED.minor,
        patch: EMBEDDED.patch,
        version: as_string(),
        source: source(),
    }
}
