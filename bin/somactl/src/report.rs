//! ---
//! soma_section: "03-cli"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Version and package report commands."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
use anyhow::Result;
use clap::Args;
use soma_version::build_info::PackageVersions;
use soma_version::version;

use crate::OutputFormat;

#[derive(Debug, Default, Args)]
pub struct VersionArgs {
    /// Print `MAJOR MINOR PATCH` separated by spaces.
    #[arg(long, conflicts_with = "labelled")]
    pub triple: bool,
    /// Prefix the version with `libtiledb=`.
    #[arg(long)]
    pub labelled: bool,
}

pub fn render_version(args: &VersionArgs, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&version::report())?);
    }
    let rendered = if args.triple {
        let (major, minor, patch) = version::embedded_version_triple();
        format!("{major} {minor} {patch}")
    } else if args.labelled {
        version::labelled()
    } else {
        version::as_string()
    };
    Ok(rendered)
}

pub fn render_packages(format: OutputFormat) -> Result<String> {
    let report = PackageVersions::collect();
    Ok(match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => report.to_json()?,
    })
}
