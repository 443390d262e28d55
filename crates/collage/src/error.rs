//! Error types for Collage operations.
//!
//! This module provides the main error type [`CollageError`] for the
//! failures a painter can hit while rendering or exporting a scene.

use std::io;

use thiserror::Error;

/// The main error type for Collage operations.
///
/// Misuse of the scene tree (attaching children to an element, unbalanced
/// navigation) is a programming error and panics instead.
#[derive(Debug, Error)]
pub enum CollageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to allocate a {width}x{height} offscreen image")]
    Raster { width: u32, height: u32 },

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Painter has been disposed")]
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_error_message() {
        let err = CollageError::Raster {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "Failed to allocate a 0x12 offscreen image");
    }

    #[test]
    fn test_io_error_from() {
        let err: CollageError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, CollageError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
