//! Error type for the Collage CLI.
//!
//! [`CliError`] wraps library errors and adds the failures that only the CLI
//! can hit, each with a diagnostic code and help text for `miette`.

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use collage::CollageError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Failed to render scene")]
    #[diagnostic(code(collage::render))]
    Render(#[from] CollageError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(collage::io))]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    #[diagnostic(
        code(collage::config::parse),
        help("check the [painter] and [style] sections of the configuration file")
    )]
    ConfigParse(String),

    #[error("Missing configuration file: {}", .0.display())]
    #[diagnostic(
        code(collage::config::missing),
        help("pass an existing file with --config, or omit it to use the defaults")
    )]
    MissingConfig(PathBuf),

    #[error("Sample `{0}` is not animated")]
    #[diagnostic(
        code(collage::args::frames),
        help("--frames is only supported by the spiral sample")
    )]
    NotAnimated(&'static str),

    #[error("Frame clock stopped after {0} frames")]
    #[diagnostic(code(collage::ticker))]
    TickerStopped(u64),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(collage::args))]
    InvalidArgument(String),
}
