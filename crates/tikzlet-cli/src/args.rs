//! Command-line argument definitions for the tikzlet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Both paths are required; clap prints the usage and exits
//! with a non-zero status when either is missing.

use clap::Parser;

/// Command-line arguments for the tikzlet converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input UMLet file
    #[arg(help = "Path to the input .uxf file")]
    pub input: String,

    /// Path to the output TikZ file
    #[arg(help = "Path to the output .tex file")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
