//! ---
//! soma_section: "03-cli"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Compatibility check command."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use soma_version::{compat, version, EmbeddedVersion};
use tracing::info;

use crate::OutputFormat;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Engine version to compare against, e.g. `2.15.1` or `libtiledb=2.15.1`.
    pub version: String,
    /// Treat VERSION as a minimum instead of requiring the same release line.
    #[arg(long)]
    pub min: bool,
}

pub fn run(args: &CheckArgs, format: OutputFormat) -> Result<String> {
    let other: EmbeddedVersion = args
        .version
        .parse()
        .with_context(|| format!("invalid engine version '{}'", args.version))?;
    if args.min {
        compat::require_at_least(other)?;
    } else {
        compat::check_compatible(other)?;
    }
    info!(built = %version::embedded(), %other, min = args.min, "engine version check passed");
    Ok(match format {
        OutputFormat::Text => format!("ok: libtiledb {} satisfies {}", version::as_str(), other),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "built": version::as_str(),
            "checked": other.to_string(),
            "min": args.min,
            "ok": true,
        }))?,
    })
}
