use log::trace;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint};

use crate::{
    color::Color,
    draw::{Circle, Line, Path, Rect, StrokeDefinition, Text, text_manager},
    geometry::{Affine, BezPath, PathEl, PixelSize, Point, Size, to_skia_transform},
    image::Image,
    surface::{Surface, TransformStack},
};

/// A surface that rasterizes into an owned pixmap.
///
/// Shapes are filled first and stroked second, both anti-aliased. Text is
/// shaped and rasterized through the shared font system.
///
/// # Examples
///
/// ```
/// use collage_core::color::Color;
/// use collage_core::draw::{Primitive, rect};
/// use collage_core::geometry::{PixelSize, Size};
/// use collage_core::surface::{PixmapSurface, Surface};
///
/// let mut surface = PixmapSurface::new(PixelSize::new(8, 8)).unwrap();
/// surface.draw_primitive(&Primitive::from(rect(|r| {
///     r.size = Size::new(8.0, 8.0);
///     r.fill = Some(Color::rgb(255, 0, 0));
/// })));
/// let image = surface.into_image();
/// assert_eq!(image.pixel(4, 4).unwrap().to_rgba8(), [255, 0, 0, 255]);
/// ```
pub struct PixmapSurface {
    pixmap: Pixmap,
    transforms: TransformStack,
}

impl PixmapSurface {
    /// Creates a transparent surface, or `None` if the size cannot be
    /// allocated.
    pub fn new(size: PixelSize) -> Option<Self> {
        let pixmap = Pixmap::new(size.width(), size.height())?;
        Some(Self {
            pixmap,
            transforms: TransformStack::new(),
        })
    }

    /// Fills every pixel with `color`, or with transparency when `None`.
    pub fn clear(&mut self, color: Option<Color>) {
        let color = color.map_or(tiny_skia::Color::TRANSPARENT, Color::to_skia);
        self.pixmap.fill(color);
    }

    pub fn pixel_size(&self) -> PixelSize {
        PixelSize::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Consumes the surface and returns its pixels.
    pub fn into_image(self) -> Image {
        Image::from_pixmap(self.pixmap)
    }

    fn current_transform(&self) -> tiny_skia::Transform {
        to_skia_transform(self.transforms.current())
    }

    fn fill_and_stroke(
        &mut self,
        path: &tiny_skia::Path,
        fill: Option<Color>,
        stroke: Option<&StrokeDefinition>,
    ) {
        let transform = self.current_transform();
        if let Some(fill) = fill {
            self.pixmap
                .fill_path(path, &paint(fill), FillRule::Winding, transform, None);
        }
        if let Some(stroke) = stroke {
            self.pixmap.stroke_path(
                path,
                &paint(stroke.color()),
                &stroke.to_skia(),
                transform,
                None,
            );
        }
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> Size {
        self.pixel_size().to_size()
    }

    fn transform(&self) -> Affine {
        self.transforms.current()
    }

    fn push_transform(&mut self, affine: Affine) {
        self.transforms.push(affine);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn draw_circle(&mut self, circle: &Circle) {
        if circle.is_empty() {
            return;
        }
        let Some(path) = PathBuilder::from_circle(
            circle.center.x as f32,
            circle.center.y as f32,
            circle.radius as f32,
        ) else {
            return;
        };
        self.fill_and_stroke(&path, circle.fill, circle.stroke.as_ref());
    }

    fn draw_line(&mut self, line: &Line) {
        let Some(stroke) = line.stroke.as_ref() else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(line.start.x as f32, line.start.y as f32);
        builder.line_to(line.end.x as f32, line.end.y as f32);
        if let Some(path) = builder.finish() {
            self.fill_and_stroke(&path, None, Some(stroke));
        }
    }

    fn draw_path(&mut self, path: &Path) {
        if let Some(skia_path) = to_skia_path(&path.geometry) {
            self.fill_and_stroke(&skia_path, path.fill, path.stroke.as_ref());
        }
    }

    fn draw_rect(&mut self, rect: &Rect) {
        let bounds = rect.to_kurbo();
        let Some(skia_rect) = tiny_skia::Rect::from_ltrb(
            bounds.x0 as f32,
            bounds.y0 as f32,
            bounds.x1 as f32,
            bounds.y1 as f32,
        ) else {
            return;
        };
        let path = PathBuilder::from_rect(skia_rect);
        self.fill_and_stroke(&path, rect.fill, rect.stroke.as_ref());
    }

    fn draw_text(&mut self, text: &Text) {
        let manager = text_manager();
        let metrics = manager.measure(&text.content, &text.font);
        let origin = text.layout_origin(&metrics);
        let transform =
            to_skia_transform(self.transforms.current() * Affine::translate(origin.to_vec2()));

        let pixmap = &mut self.pixmap;
        manager.draw_glyphs(&text.content, &text.font, text.color, |x, y, w, h, rgba| {
            let Some(cell) = tiny_skia::Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
            else {
                return;
            };
            let [r, g, b, a] = rgba;
            pixmap.fill_rect(cell, &paint(Color::rgba(r, g, b, a)), transform, None);
        });
    }

    fn draw_image(&mut self, image: &Image, origin: Point) {
        trace!(width = image.width(), height = image.height(); "Blitting image");
        let transform =
            to_skia_transform(self.transforms.current() * Affine::translate(origin.to_vec2()));
        self.pixmap.draw_pixmap(
            0,
            0,
            image.pixmap().as_ref(),
            &PixmapPaint::default(),
            transform,
            None,
        );
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/// Converts a kurbo path into a `tiny-skia` path. Returns `None` for paths
/// with no drawable segments.
fn to_skia_path(geometry: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in geometry.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{circle, line, path, rect};

    fn surface(size: u32) -> PixmapSurface {
        PixmapSurface::new(PixelSize::new(size, size)).unwrap()
    }

    fn rgba(surface: PixmapSurface, x: u32, y: u32) -> [u8; 4] {
        surface.into_image().pixel(x, y).unwrap().to_rgba8()
    }

    #[test]
    fn test_new_rejects_empty_size() {
        assert!(PixmapSurface::new(PixelSize::new(0, 4)).is_none());
    }

    #[test]
    fn test_clear_fills_background() {
        let mut s = surface(4);
        s.clear(Some(Color::rgb(0, 128, 0)));
        assert_eq!(rgba(s, 3, 3), [0, 128, 0, 255]);
    }

    #[test]
    fn test_draw_circle_fills_center() {
        let mut s = surface(20);
        s.draw_circle(&circle(|c| {
            c.center = Point::new(10.0, 10.0);
            c.radius = 6.0;
            c.fill = Some(Color::rgb(0, 0, 255));
        }));
        assert_eq!(rgba(s, 10, 10), [0, 0, 255, 255]);
    }

    #[test]
    fn test_draw_rect_respects_transform() {
        let mut s = surface(20);
        s.push_transform(Affine::translate((10.0, 10.0)));
        s.draw_rect(&rect(|r| {
            r.size = Size::new(5.0, 5.0);
            r.fill = Some(Color::rgb(255, 0, 0));
        }));
        s.pop_transform();

        let image = s.into_image();
        assert_eq!(image.pixel(12, 12).unwrap().to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(image.pixel(2, 2).unwrap().to_rgba8(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_draw_line_strokes() {
        let mut s = surface(10);
        s.draw_line(&line(|l| {
            l.start = Point::new(0.0, 5.0);
            l.end = Point::new(10.0, 5.0);
            l.stroke = Some(StrokeDefinition::solid(Color::rgb(0, 0, 0), 4.0));
        }));
        assert_eq!(rgba(s, 5, 5)[3], 255);
    }

    #[test]
    fn test_draw_empty_path_is_noop() {
        let mut s = surface(4);
        s.draw_path(&path(|_| {}));
        assert_eq!(rgba(s, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_draw_image_blits_at_origin() {
        let mut source = surface(2);
        source.clear(Some(Color::rgb(255, 255, 0)));
        let image = source.into_image();

        let mut target = surface(6);
        target.draw_image(&image, Point::new(3.0, 3.0));
        let result = target.into_image();
        assert_eq!(result.pixel(4, 4).unwrap().to_rgba8(), [255, 255, 0, 255]);
        assert_eq!(result.pixel(1, 1).unwrap().to_rgba8(), [0, 0, 0, 0]);
    }
}
