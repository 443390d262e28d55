use crate::{color::Color, draw::StrokeDefinition, geometry::Point};

/// A circle given by its center and radius.
///
/// The default circle sits at the origin with a zero radius and is painted
/// with an opaque black fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<StrokeDefinition>,
}

impl Circle {
    /// Returns true if the circle covers no area.
    pub fn is_empty(&self) -> bool {
        self.radius.is_nan() || self.radius <= 0.0
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            center: Point::ORIGIN,
            radius: 0.0,
            fill: Some(Color::default()),
            stroke: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_default_is_filled_black() {
        let circle = Circle::default();
        assert_eq!(circle.fill, Some(Color::default()));
        assert!(circle.stroke.is_none());
        assert!(circle.is_empty());
    }

    #[test]
    fn test_circle_is_empty() {
        let circle = Circle {
            radius: 3.0,
            ..Circle::default()
        };
        assert!(!circle.is_empty());

        let nan = Circle {
            radius: f64::NAN,
            ..Circle::default()
        };
        assert!(nan.is_empty());
    }
}
