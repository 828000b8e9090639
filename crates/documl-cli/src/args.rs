//! Command-line argument definitions for the documl CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the documentation model, the generated
//! documentation tree, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the documl postprocessor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the documentation model (JSON)
    #[arg(help = "Path to the documentation model")]
    pub model: String,

    /// Directory holding the generated documentation pages
    #[arg(short, long)]
    pub destination: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
