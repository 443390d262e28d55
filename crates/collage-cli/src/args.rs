//! Command-line argument definitions for the Collage CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the sample scene, the output file and
//! its size, the configuration file and the logging verbosity.

use clap::Parser;

use crate::samples::Sample;

/// Command-line arguments for the Collage sample renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sample scene to render
    #[arg(value_enum)]
    pub sample: Sample,

    /// Path to the output file (`.svg` for vector output, PNG otherwise)
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Nominal width, overriding the configuration
    #[arg(long)]
    pub width: Option<f64>,

    /// Nominal height, overriding the configuration
    #[arg(long)]
    pub height: Option<f64>,

    /// Number of animation frames to write (animated samples only)
    #[arg(long)]
    pub frames: Option<u32>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
