//! ---
//! soma_section: "03-cli"
//! soma_subsection: "binary"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Control CLI reporting the embedded engine version."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use soma_logging as logging;
use soma_version::build_info;
use tracing::debug;

mod check;
mod report;

/// Rendering used for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "SOMA embedded engine version utility",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended build information and exit"
    )]
    version: bool,
    #[arg(
        long,
        global = true,
        value_enum,
        env = "SOMACTL_FORMAT",
        default_value_t = OutputFormat::Text,
        help = "Output format"
    )]
    format: OutputFormat,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Print the embedded engine version (default)")]
    Version(report::VersionArgs),
    #[command(about = "Print versions of all components of this build")]
    Packages,
    #[command(about = "Check another engine version against this build")]
    Check(check::CheckArgs),
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    if cli.version {
        println!("{}", build_info::clap_long_version());
        return Ok(());
    }
    let command = cli
        .command
        .unwrap_or(Commands::Version(report::VersionArgs::default()));
    debug!(?command, format = ?cli.format, "dispatching command");
    let output = match command {
        Commands::Version(args) => report::render_version(&args, cli.format)?,
        Commands::Packages => report::render_packages(cli.format)?,
        Commands::Check(args) => check::run(&args, cli.format)?,
    };
    println!("{output}");
    Ok(())
}
