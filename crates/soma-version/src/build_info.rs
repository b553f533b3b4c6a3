//! ---
//! soma_section: "01-version-reporting"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Build metadata and package version report."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::version::{self, EmbeddedVersion, VersionSource};

/// Value `vergen` emits when it cannot determine a field, e.g. outside a git checkout.
const VERGEN_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

const UNKNOWN: &str = "UNKNOWN";

fn vergen_field(raw: Option<&'static str>) -> String {
    match raw {
        Some(value) if !value.is_empty() && value != VERGEN_PLACEHOLDER => value.to_owned(),
        _ => UNKNOWN.to_owned(),
    }
}

/// Compile-time build metadata captured via `vergen`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Package semantic version.
    pub semver: String,
    /// Git commit hash captured at build time.
    pub git_sha: String,
    /// Build timestamp from the compilation environment.
    pub build_timestamp: String,
    /// Target triple used for the build.
    pub target: String,
    /// Whether debug info was enabled.
    pub debug: String,
    /// Embedded engine version.
    pub embedded: EmbeddedVersion,
    /// Where the embedded version came from.
    pub embedded_source: VersionSource,
}

impl BuildInfo {
    /// Metadata for the running build.
    #[must_use]
    pub fn current() -> Self {
        Self {
            semver: env!("CARGO_PKG_VERSION").to_owned(),
            git_sha: vergen_field(option_env!("VERGEN_GIT_SHA")),
            build_timestamp: vergen_field(option_env!("VERGEN_BUILD_TIMESTAMP")),
            target: vergen_field(option_env!("VERGEN_CARGO_TARGET_TRIPLE")),
            debug: vergen_field(option_env!("VERGEN_CARGO_DEBUG")),
            embedded: version::embedded(),
            embedded_source: version::source(),
        }
    }

    /// Semantic version and git hash, e.g. `0.1.0 (abc123)`.
    #[must_use]
    pub fn cli_string(&self) -> String {
        format!("{} ({})", self.semver, self.git_sha)
    }

    /// One line banner for log output.
    #[must_use]
    pub fn banner(&self) -> String {
        format!(
            "SOMA v{} (git {}, {})",
            self.semver,
            self.git_sha,
            self.embedded.labelled()
        )
    }

    /// Multi-line rendering for `--version` flags.
    #[must_use]
    pub fn extended(&self) -> String {
        format!(
            "{banner}\nBuilt: {built}\nTarget: {target}\nDebug: {debug}\nEngine source: {source}",
            banner = self.banner(),
            built = self.build_timestamp,
            target = self.target,
            debug = self.debug,
            source = self.embedded_source,
        )
    }
}

/// Helper for clap commands that print the extended version string.
#[must_use]
pub fn clap_long_version() -> String {
    BuildInfo::current().extended()
}

/// Versions of everything that makes up this installation.
#[derive(Debug, Clone, Serialize)]
pub struct PackageVersions {
    /// Build metadata, including the embedded engine.
    #[serde(flatten)]
    pub build: BuildInfo,
    /// Rendered engine version, same value as [`version::as_string`].
    pub libtiledb: String,
    /// Host operating system.
    pub os: String,
    /// Host architecture.
    pub arch: String,
}

impl PackageVersions {
    /// Gather the report for the running process.
    #[must_use]
    pub fn collect() -> Self {
        let report = Self {
            build: BuildInfo::current(),
            libtiledb: version::as_string(),
            os: std::env::consts::OS.to_owned(),
            arch: std::env::consts::ARCH.to_owned(),
        };
        debug!(
            soma = %report.build.semver,
            libtiledb = %report.libtiledb,
            "collected package versions"
        );
        report
    }

    /// JSON rendering of the report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for PackageVersions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "soma-version:  {}", self.build.semver)?;
        writeln!(f, "git sha:       {}", self.build.git_sha)?;
        writeln!(
            f,
            "libtiledb:     {} ({})",
            self.libtiledb, self.build.embedded_source
        )?;
        writeln!(f, "target:        {}", self.build.target)?;
        write!(f, "host:          {}-{}", self.os, self.arch)
    }
}
