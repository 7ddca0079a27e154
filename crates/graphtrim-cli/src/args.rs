//! Command-line argument definitions for the graphtrim CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the optional
//! beginning-nodes filter, configuration file selection, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the graphtrim DOT graph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input DOT file
    #[arg(help = "Path to the input dot file")]
    pub input: String,

    /// Path to the output DOT file
    #[arg(help = "Path to the output dot file")]
    pub output: String,

    /// Keep only nodes reachable from nodes whose label contains this substring
    #[arg(help = "Substring selecting the beginning nodes by label")]
    pub filter: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
