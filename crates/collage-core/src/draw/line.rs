use crate::{color::Color, draw::StrokeDefinition, geometry::Point};

/// A straight segment between two points.
///
/// Lines only have an outline; the default stroke is black and one unit wide.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub stroke: Option<StrokeDefinition>,
}

impl Line {
    /// Returns the Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self {
            start: Point::ORIGIN,
            end: Point::ORIGIN,
            stroke: Some(StrokeDefinition::solid(Color::default(), 1.0)),
        }
    }
}
