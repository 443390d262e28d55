use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{BezPath, Point, Vec2},
};

/// Flattening tolerance used when arcs are approximated by cubic curves.
const ARC_TOLERANCE: f64 = 0.1;

/// An arbitrary Bézier path.
///
/// The path is built with canvas-style commands. Building starts a new
/// subpath implicitly: the first drawing command after creation, or after
/// [`close`](Self::close), begins at the point it is given.
///
/// # Examples
///
/// ```
/// use collage_core::draw::path;
///
/// let triangle = path(|p| {
///     p.move_to((0.0, 0.0));
///     p.line_to((10.0, 0.0));
///     p.line_to((5.0, 8.0));
///     p.close();
/// });
/// assert_eq!(triangle.geometry.elements().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub geometry: BezPath,
    pub fill: Option<Color>,
    pub stroke: Option<StrokeDefinition>,
    current: Option<Point>,
}

impl Path {
    pub fn move_to(&mut self, point: impl Into<Point>) {
        let point = point.into();
        self.geometry.move_to(point);
        self.current = Some(point);
    }

    pub fn line_to(&mut self, point: impl Into<Point>) {
        let point = point.into();
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        self.geometry.line_to(point);
        self.current = Some(point);
    }

    pub fn quad_to(&mut self, control: impl Into<Point>, point: impl Into<Point>) {
        let control = control.into();
        let point = point.into();
        if self.current.is_none() {
            self.move_to(control);
        }
        self.geometry.quad_to(control, point);
        self.current = Some(point);
    }

    pub fn curve_to(
        &mut self,
        control1: impl Into<Point>,
        control2: impl Into<Point>,
        point: impl Into<Point>,
    ) {
        let control1 = control1.into();
        let control2 = control2.into();
        let point = point.into();
        if self.current.is_none() {
            self.move_to(control1);
        }
        self.geometry.curve_to(control1, control2, point);
        self.current = Some(point);
    }

    /// Adds an elliptical arc around `center`.
    ///
    /// Angles are in radians, measured clockwise from the positive x axis in
    /// the y-down scene space. A straight segment connects the current point
    /// to the start of the arc.
    pub fn arc(
        &mut self,
        center: impl Into<Point>,
        radii: impl Into<Vec2>,
        start_angle: f64,
        sweep_angle: f64,
    ) {
        let center = center.into();
        let radii = radii.into();
        let start = center + Vec2::new(radii.x * start_angle.cos(), radii.y * start_angle.sin());
        self.line_to(start);

        let arc = kurbo::Arc {
            center,
            radii,
            start_angle,
            sweep_angle,
            x_rotation: 0.0,
        };
        for element in arc.append_iter(ARC_TOLERANCE) {
            self.geometry.push(element);
        }

        let end_angle = start_angle + sweep_angle;
        self.current = Some(center + Vec2::new(radii.x * end_angle.cos(), radii.y * end_angle.sin()));
    }

    /// Closes the current subpath.
    pub fn close(&mut self) {
        if self.current.take().is_some() {
            self.geometry.close_path();
        }
    }

    /// Returns the end point of the last drawing command, if a subpath is open.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.elements().is_empty()
    }
}

impl Default for Path {
    fn default() -> Self {
        Self {
            geometry: BezPath::new(),
            fill: None,
            stroke: Some(StrokeDefinition::default()),
            current: None,
        }
    }
}

impl From<BezPath> for Path {
    fn from(geometry: BezPath) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }
}
