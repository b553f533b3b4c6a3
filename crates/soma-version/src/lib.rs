//! ---
//! soma_section: "01-version-reporting"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Embedded engine version metadata."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Reports the version of the TileDB Embedded library SOMA is built against,
//! together with build metadata and compatibility helpers.

pub mod build_info;
pub mod compat;
pub mod errors;
pub mod resolve;
pub mod version;

pub use errors::{Result, VersionError};
pub use version::{as_string, embedded_version_triple, EmbeddedVersion, VersionSource};
