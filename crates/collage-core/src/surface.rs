//! Drawing surfaces.
//!
//! A [`Surface`] is the target scene nodes draw into. It carries a stack of
//! affine transforms: every draw call is interpreted under the product of
//! all transforms pushed so far. Three implementations are provided:
//!
//! - [`PixmapSurface`]: anti-aliased rasterization with `tiny-skia`
//! - [`SvgSurface`]: an SVG document built with the `svg` crate
//! - [`RecordingSurface`]: records every call as a [`DrawOp`]
//!
//! # Example
//!
//! ```
//! use collage_core::draw::{Primitive, circle};
//! use collage_core::geometry::{Affine, Size};
//! use collage_core::surface::{RecordingSurface, Surface, with_transform};
//!
//! let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
//! with_transform(&mut surface, Affine::translate((10.0, 0.0)), |s| {
//!     s.draw_primitive(&Primitive::from(circle(|c| c.radius = 5.0)));
//! });
//! assert_eq!(surface.ops()[0].transform(), Affine::translate((10.0, 0.0)));
//! assert_eq!(surface.transform(), Affine::IDENTITY);
//! ```

mod raster;
mod recording;
mod vector;

pub use raster::PixmapSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use vector::SvgSurface;

use crate::{
    draw::{Circle, Line, Path, Primitive, Rect, Text},
    geometry::{Affine, Point, Size},
    image::Image,
};

/// A drawing target with a transform stack.
pub trait Surface {
    /// Returns the size of the drawable area in device units.
    fn size(&self) -> Size;

    /// Returns the transform currently applied to draw calls.
    fn transform(&self) -> Affine;

    /// Concatenates `affine` onto the current transform.
    fn push_transform(&mut self, affine: Affine);

    /// Restores the transform active before the matching push.
    ///
    /// Popping with nothing pushed leaves the base transform in place.
    fn pop_transform(&mut self);

    fn draw_circle(&mut self, circle: &Circle);

    fn draw_line(&mut self, line: &Line);

    fn draw_path(&mut self, path: &Path);

    fn draw_rect(&mut self, rect: &Rect);

    fn draw_text(&mut self, text: &Text);

    /// Draws `image` with its top-left corner at `origin`, one image pixel
    /// per unit.
    fn draw_image(&mut self, image: &Image, origin: Point);

    /// Dispatches a primitive to the matching draw call.
    fn draw_primitive(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Circle(circle) => self.draw_circle(circle),
            Primitive::Line(line) => self.draw_line(line),
            Primitive::Path(path) => self.draw_path(path),
            Primitive::Rect(rect) => self.draw_rect(rect),
            Primitive::Text(text) => self.draw_text(text),
        }
    }
}

/// Runs `f` with `affine` pushed onto the surface, popping it afterwards.
pub fn with_transform<S, R>(surface: &mut S, affine: Affine, f: impl FnOnce(&mut S) -> R) -> R
where
    S: Surface + ?Sized,
{
    surface.push_transform(affine);
    let result = f(surface);
    surface.pop_transform();
    result
}

/// The transform stack shared by the surface implementations.
#[derive(Debug, Clone)]
pub(crate) struct TransformStack {
    stack: Vec<Affine>,
}

impl TransformStack {
    pub(crate) fn new() -> Self {
        Self {
            stack: vec![Affine::IDENTITY],
        }
    }

    pub(crate) fn current(&self) -> Affine {
        self.stack.last().copied().unwrap_or(Affine::IDENTITY)
    }

    pub(crate) fn push(&mut self, affine: Affine) {
        let next = self.current() * affine;
        self.stack.push(next);
    }

    /// Pops the top transform. Returns false if only the base was left.
    pub(crate) fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_transform_stack_concatenates() {
        let mut stack = TransformStack::new();
        stack.push(Affine::translate((10.0, 0.0)));
        stack.push(Affine::scale(2.0));

        let p = stack.current() * Point::new(1.0, 1.0);
        assert_approx_eq!(f64, p.x, 12.0);
        assert_approx_eq!(f64, p.y, 2.0);
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_transform_stack_pop_keeps_base() {
        let mut stack = TransformStack::new();
        stack.push(Affine::translate((1.0, 1.0)));
        assert!(stack.pop());
        assert!(!stack.pop());
        assert_eq!(stack.current(), Affine::IDENTITY);
    }

    #[test]
    fn test_with_transform_restores_and_returns() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        let inner = with_transform(&mut surface, Affine::scale(3.0), |s| s.transform());
        assert_eq!(inner, Affine::scale(3.0));
        assert_eq!(surface.transform(), Affine::IDENTITY);
    }
}
