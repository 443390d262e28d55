use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
    pub fill: Option<Color>,
    pub stroke: Option<StrokeDefinition>,
}

impl Rect {
    /// Returns the rectangle as a kurbo rectangle, normalized so that
    /// negative sizes extend toward the origin.
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::from_origin_size(self.origin, self.size).abs()
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            size: Size::ZERO,
            fill: Some(Color::default()),
            stroke: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_rect_to_kurbo_normalizes_negative_size() {
        let rect = Rect {
            origin: Point::new(10.0, 10.0),
            size: Size::new(-4.0, 6.0),
            ..Rect::default()
        };
        let bounds = rect.to_kurbo();
        assert_approx_eq!(f64, bounds.x0, 6.0);
        assert_approx_eq!(f64, bounds.x1, 10.0);
        assert_approx_eq!(f64, bounds.y0, 10.0);
        assert_approx_eq!(f64, bounds.y1, 16.0);
    }
}
