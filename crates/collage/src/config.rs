//! Configuration types for Collage painters.
//!
//! This module provides configuration structures that control the size,
//! density and styling of a [`Painter`](crate::Painter). All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining painter and style settings.
//! - [`PainterConfig`] - Nominal size, pixel density and viewport.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use collage::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.painter().nominal_size().width, 360.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use collage_core::{color::Color, geometry::Size};

use crate::CollageError;

/// Top-level configuration combining painter and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Painter configuration section.
    #[serde(default)]
    painter: PainterConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given sections.
    pub fn new(painter: PainterConfig, style: StyleConfig) -> Self {
        Self { painter, style }
    }

    /// Returns the painter configuration.
    pub fn painter(&self) -> &PainterConfig {
        &self.painter
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a mutable reference to the painter configuration.
    pub fn painter_mut(&mut self) -> &mut PainterConfig {
        &mut self.painter
    }
}

/// Size and density of a painter.
///
/// The nominal size is given in density-independent units. The painter's
/// intrinsic size is the nominal size multiplied by the density. When no
/// viewport is configured, the viewport matches the intrinsic size.
#[derive(Debug, Clone, Deserialize)]
pub struct PainterConfig {
    #[serde(default = "default_extent")]
    width: f64,

    #[serde(default = "default_extent")]
    height: f64,

    #[serde(default = "default_density")]
    density: f64,

    #[serde(default)]
    viewport_width: Option<f64>,

    #[serde(default)]
    viewport_height: Option<f64>,
}

fn default_extent() -> f64 {
    360.0
}

fn default_density() -> f64 {
    1.0
}

impl PainterConfig {
    /// Creates a painter configuration with the given nominal size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns this configuration with the given density.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Returns this configuration with an explicit viewport.
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = Some(width);
        self.viewport_height = Some(height);
        self
    }

    /// Overrides the viewport.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = Some(width);
        self.viewport_height = Some(height);
    }

    /// Overrides the nominal size.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Returns the nominal size in density-independent units.
    pub fn nominal_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the number of pixels per density-independent unit.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Returns the viewport, falling back per axis to the intrinsic size.
    pub fn viewport(&self) -> Size {
        Size::new(
            self.viewport_width.unwrap_or(self.width * self.density),
            self.viewport_height.unwrap_or(self.height * self.density),
        )
    }

    /// Returns the viewport if either axis is configured.
    pub fn explicit_viewport(&self) -> Option<Size> {
        if self.viewport_width.is_none() && self.viewport_height.is_none() {
            return None;
        }
        Some(self.viewport())
    }

    /// Checks that every dimension is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Config`] naming the first invalid value.
    pub fn validate(&self) -> Result<(), CollageError> {
        let values = [
            ("width", Some(self.width)),
            ("height", Some(self.height)),
            ("density", Some(self.density)),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in values {
            let Some(value) = value else {
                continue;
            };
            if !(value.is_finite() && value > 0.0) {
                return Err(CollageError::Config(format!(
                    "`{name}` must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            width: default_extent(),
            height: default_extent(),
            density: default_density(),
            viewport_width: None,
            viewport_height: None,
        }
    }
}

/// Visual styling configuration for rendered scenes.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] behind the scene, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style configuration with the given background color string.
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
