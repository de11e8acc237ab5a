//! CLI command definitions for the `clarus` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Persist and browse chat history.
#[derive(Parser)]
#[command(name = "clarus", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "CLARUS_CONFIG", default_value = "clarus.toml")]
    pub config: PathBuf,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Host to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List every chat session, newest first.
    #[command(alias = "ls")]
    Sessions,

    /// Show the transcript of a session.
    History {
        /// Client-supplied session identifier.
        session_id: String,
    },

    /// Verify the store is reachable.
    Check,
}

impl Cli {
    /// Default tracing directive for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,clarus=debug",
            _ => "trace",
        }
    }
}
