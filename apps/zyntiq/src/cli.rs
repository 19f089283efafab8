//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zyntiq_types::ColorChoice;

/// zyntiq - Member credential verification
#[derive(Parser)]
#[command(name = "zyntiq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify Zyntiq member credentials by UID or name")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to the zyntiq log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Member data endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up one member; exits 0 when verified, 1 when not found, 2 on error
    #[command(alias = "v")]
    Verify {
        /// UID (or full or partial name with --name)
        query: String,

        /// Search by name instead of UID
        #[arg(long)]
        name: bool,

        /// Print the result as an HTML fragment (`--json` wins)
        #[arg(long)]
        html: bool,
    },

    /// Interactive verification session
    #[command(alias = "i")]
    Interactive,

    /// Print the number of registered members
    Count,
}

impl Commands {
    /// Operation name used in events and logs
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Verify { .. } => "verify",
            Commands::Interactive => "interactive",
            Commands::Count => "count",
        }
    }
}
