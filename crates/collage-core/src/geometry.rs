//! Geometric types shared by primitives, scene nodes and surfaces.
//!
//! Continuous geometry comes from [`kurbo`]: [`Point`], [`Vec2`], [`Size`],
//! [`Affine`] and [`BezPath`]. This module adds [`PixelSize`], the integer
//! dimensions of a raster target.

pub use kurbo::{Affine, BezPath, PathEl, Point, Size, Vec2};

/// Integer dimensions of a raster image, in physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    width: u32,
    height: u32,
}

impl PixelSize {
    /// Creates a new pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the smallest pixel size that fully covers `size`.
    ///
    /// Negative and NaN dimensions collapse to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use collage_core::geometry::{PixelSize, Size};
    /// let pixels = PixelSize::ceil(Size::new(199.2, 100.0));
    /// assert_eq!(pixels, PixelSize::new(200, 100));
    /// ```
    pub fn ceil(size: Size) -> Self {
        Self {
            width: ceil_dimension(size.width),
            height: ceil_dimension(size.height),
        }
    }

    /// Returns the width in pixels.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Converts back to a continuous size.
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

fn ceil_dimension(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.ceil() as u32
    }
}

/// Converts a kurbo affine matrix into the `tiny-skia` representation.
pub(crate) fn to_skia_transform(affine: Affine) -> tiny_skia::Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_pixel_size_ceil_rounds_up() {
        let pixels = PixelSize::ceil(Size::new(10.01, 19.99));
        assert_eq!(pixels.width(), 11);
        assert_eq!(pixels.height(), 20);
    }

    #[test]
    fn test_pixel_size_ceil_exact() {
        assert_eq!(PixelSize::ceil(Size::new(200.0, 200.0)), PixelSize::new(200, 200));
    }

    #[test]
    fn test_pixel_size_ceil_degenerate() {
        assert!(PixelSize::ceil(Size::new(-4.0, 10.0)).is_empty());
        assert!(PixelSize::ceil(Size::new(f64::NAN, 10.0)).is_empty());
        assert!(PixelSize::ceil(Size::ZERO).is_empty());
    }

    #[test]
    fn test_to_skia_transform_preserves_coefficients() {
        let affine = Affine::translate((5.0, 7.0)) * Affine::scale_non_uniform(2.0, 3.0);
        let transform = to_skia_transform(affine);
        assert_approx_eq!(f32, transform.sx, 2.0);
        assert_approx_eq!(f32, transform.sy, 3.0);
        assert_approx_eq!(f32, transform.tx, 5.0);
        assert_approx_eq!(f32, transform.ty, 7.0);
        assert_approx_eq!(f32, transform.kx, 0.0);
        assert_approx_eq!(f32, transform.ky, 0.0);
    }
}
