//! Owned raster images.

use tiny_skia::Pixmap;

use crate::{color::Color, geometry::PixelSize};

/// An RGBA raster image with premultiplied pixels.
///
/// Images are produced by the raster surface and can be drawn back into any
/// surface with [`Surface::draw_image`](crate::surface::Surface::draw_image).
#[derive(Clone, PartialEq)]
pub struct Image {
    pixmap: Pixmap,
}

impl Image {
    /// Creates a fully transparent image.
    ///
    /// Returns `None` when either dimension is zero or the image would be too
    /// large to allocate.
    pub fn new(size: PixelSize) -> Option<Self> {
        Pixmap::new(size.width(), size.height()).map(|pixmap| Self { pixmap })
    }

    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.pixmap.width(), self.pixmap.height())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Returns the un-premultiplied color of the pixel at `(x, y)`, or `None`
    /// outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }

    /// Encodes the image as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, String> {
        self.pixmap
            .encode_png()
            .map_err(|err| format!("failed to encode PNG: {err}"))
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new_is_transparent() {
        let image = Image::new(PixelSize::new(4, 3)).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.pixel(0, 0).unwrap().to_rgba8(), [0, 0, 0, 0]);
        assert!(image.pixel(4, 0).is_none());
    }

    #[test]
    fn test_pixel_outside_bounds_is_none() {
        let image = Image::new(PixelSize::new(4, 3)).unwrap();
        assert!(image.pixel(3, 2).is_some());
        assert!(image.pixel(4, 0).is_none());
        assert!(image.pixel(7, 0).is_none());
        assert!(image.pixel(0, 3).is_none());
    }

    #[test]
    fn test_image_new_rejects_empty() {
        assert!(Image::new(PixelSize::new(0, 10)).is_none());
    }

    #[test]
    fn test_image_encode_png_signature() {
        let image = Image::new(PixelSize::new(2, 2)).unwrap();
        let bytes = image.encode_png().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_image_debug_omits_pixels() {
        let image = Image::new(PixelSize::new(2, 5)).unwrap();
        assert_eq!(format!("{image:?}"), "Image { width: 2, height: 5 }");
    }
}
