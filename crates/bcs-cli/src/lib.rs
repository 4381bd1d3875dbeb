//! BCS CLI Library
//!
//! Command-line interface for the Cisco BCS bulk API.
//!
//! # Overview
//!
//! - **Download**: Save a customer's raw bulk stream to a file (`bcs download`)
//! - **Parse**: Scan a saved bulk file and report what it contains (`bcs parse`)
//! - **Version**: Print the CLI version (`bcs version`, `bcs -v`)

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod commands;
pub mod config;
pub mod error;
pub mod progress;

// Re-export commonly used types
pub use config::CliConfig;
pub use error::{CliError, Result};

use bcs_client::bulk::DEFAULT_MAX_LINE_BYTES;
use bcs_client::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_BULK_FILENAME;

/// bcs - Cisco BCS bulk API client
#[derive(Parser, Debug)]
#[command(name = "bcs")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print version information and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Verbose (debug) logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// API base URL
    #[arg(long, env = "BCS_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the raw bulk stream for a customer to a file
    Download {
        /// Customer ID
        #[arg(long, env = "BCS_CUSTOMER_ID")]
        id: String,

        /// API key
        #[arg(long, env = "BCS_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_BULK_FILENAME)]
        filename: PathBuf,

        /// Request timeout in seconds
        #[arg(long, env = "BCS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Parse a saved bulk file and print a summary
    Parse {
        /// Bulk file to parse
        #[arg(short, long, default_value = DEFAULT_BULK_FILENAME)]
        filename: PathBuf,

        /// Longest accepted line in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_LINE_BYTES)]
        max_line_bytes: usize,

        /// Also write the full results as pretty-printed JSON to this path
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },

    /// Print version information
    Version,
}
