//! Sample scenes rendered by the CLI.
//!
//! Each sample owns its data: points, bins and styling are computed when
//! the scene is constructed and captured by the content callback, never
//! stored globally.

pub mod basic;
pub mod chart;
pub mod hexbin;
pub mod spiral;

use clap::ValueEnum;

use collage::{CollageError, Input, Painter, config::AppConfig, geometry::Size};

/// The available sample scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    /// Circles, a line, a stroked rectangle and a poem
    Basic,
    /// Hexagonal binning of normally distributed points
    Hexbin,
    /// A rotating spiral of dots
    Spiral,
    /// A line chart with left and bottom axes
    Chart,
}

impl Sample {
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Hexbin => "hexbin",
            Self::Spiral => "spiral",
            Self::Chart => "chart",
        }
    }

    /// Returns the size of the coordinate space the sample is drawn in.
    pub fn size(self) -> Size {
        match self {
            Self::Basic => basic::SIZE,
            Self::Hexbin => hexbin::SIZE,
            Self::Spiral => spiral::SIZE,
            Self::Chart => chart::SIZE,
        }
    }

    /// Returns true if the sample reads the animation clock.
    pub fn is_animated(self) -> bool {
        matches!(self, Self::Spiral)
    }

    /// Creates a painter for this sample.
    ///
    /// Animated samples read `clock`, the animation phase in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Config`] for an invalid configuration.
    pub fn painter(self, config: &AppConfig, clock: &Input<f64>) -> Result<Painter, CollageError> {
        match self {
            Self::Basic => Painter::from_config(config, basic::scene()),
            Self::Hexbin => Painter::from_config(config, hexbin::scene(hexbin::SEED)),
            Self::Spiral => Painter::from_config(config, spiral::scene(clock.clone())),
            Self::Chart => Painter::from_config(config, chart::scene()),
        }
    }
}

#[cfg(test)]
mod tests {
    use collage::Drawable;

    use super::*;

    #[test]
    fn test_every_sample_composes_nodes() {
        for sample in Sample::value_variants() {
            let mut config = AppConfig::default();
            let size = sample.size();
            config.painter_mut().set_size(size.width, size.height);

            let mut painter = sample.painter(&config, &Input::new(0.0)).unwrap();
            painter.recompose().unwrap();
            assert!(
                painter.root().root_group().descendant_count() > 0,
                "{} produced an empty scene",
                sample.name()
            );
            assert_eq!(painter.intrinsic_size(), size);
        }
    }

    #[test]
    fn test_only_spiral_is_animated() {
        let animated: Vec<_> = Sample::value_variants()
            .iter()
            .filter(|sample| sample.is_animated())
            .collect();
        assert_eq!(animated, [&Sample::Spiral]);
    }
}
