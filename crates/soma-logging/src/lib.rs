//! ---
//! soma_section: "02-logging"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Structured logging setup for SOMA binaries."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Tracing subscriber initialisation. Logs go to stderr so command output on
//! stdout stays machine readable.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Layer, Registry};

/// Filter directive variable, takes precedence over `RUST_LOG`.
pub const LOG_ENV: &str = "SOMA_LOG";
/// Output format variable (`pretty` or `json`).
pub const LOG_FORMAT_ENV: &str = "SOMA_LOG_FORMAT";

/// Available log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Unknown log format name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown log format '{0}', expected 'pretty' or 'json'")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(UnknownLogFormat(other.to_owned())),
        }
    }
}

impl LogFormat {
    /// Format selected by `SOMA_LOG_FORMAT`, defaulting to pretty output.
    pub fn from_env() -> Self {
        match std::env::var(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                eprintln!("{err}; defaulting to pretty logs");
                LogFormat::Pretty
            }),
            Err(_) => LogFormat::Pretty,
        }
    }
}

/// Filter from `SOMA_LOG`, then `RUST_LOG`, finally `info`.
fn env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to info logging",
                LOG_ENV, err
            );
            EnvFilter::default().add_directive(Level::INFO.into())
        }),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into())),
    }
}

/// Initialise logging using the format from the environment.
pub fn init() -> bool {
    init_with(LogFormat::from_env())
}

/// Initialise logging with an explicit format.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is kept.
pub fn init_with(format: LogFormat) -> bool {
    let fmt_layer = match format {
        LogFormat::Pretty => subscriber_fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => subscriber_fmt::layer()
            .with_target(false)
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };
    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
