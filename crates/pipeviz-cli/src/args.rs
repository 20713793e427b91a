//! Command-line argument definitions for the Pipeviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, an optional scripted
//! pointer session, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Pipeviz diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output SVG file
    #[arg(short, long, default_value = "pipeline.svg")]
    pub output: String,

    /// Pointer session (TOML) to replay before rendering
    #[arg(short, long)]
    pub session: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
