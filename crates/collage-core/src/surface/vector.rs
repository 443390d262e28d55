use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::warn;
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use crate::{
    apply_stroke,
    color::Color,
    draw::{Circle, Line, Path, Rect, StrokeDefinition, Text},
    geometry::{Affine, Point, Size},
    image::Image,
    surface::{Surface, TransformStack},
};

/// A surface that writes an SVG document.
///
/// Every pushed transform opens a `<g transform="matrix(...)">` element that
/// is closed by the matching pop, so the document mirrors the group nesting
/// of the scene.
///
/// # Examples
///
/// ```
/// use collage_core::draw::{Primitive, circle};
/// use collage_core::geometry::{Affine, Size};
/// use collage_core::surface::{Surface, SvgSurface};
///
/// let mut surface = SvgSurface::new(Size::new(50.0, 50.0));
/// surface.push_transform(Affine::translate((5.0, 5.0)));
/// surface.draw_primitive(&Primitive::from(circle(|c| c.radius = 4.0)));
/// surface.pop_transform();
///
/// let svg = surface.finish().to_string();
/// assert!(svg.contains("<circle"));
/// assert!(svg.contains("matrix(1 0 0 1 5 5)"));
/// ```
pub struct SvgSurface {
    size: Size,
    background: Option<Color>,
    transforms: TransformStack,
    groups: Vec<svg_element::Group>,
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
            transforms: TransformStack::new(),
            groups: vec![svg_element::Group::new()],
        }
    }

    /// Paints a full-size background rectangle behind the content.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Closes any open groups and returns the finished document.
    pub fn finish(mut self) -> Document {
        while self.groups.len() > 1 {
            self.close_group();
        }

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width, self.size.height),
            )
            .set("width", self.size.width)
            .set("height", self.size.height);

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", &background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        match self.groups.pop() {
            Some(content) => doc.add(content),
            None => doc,
        }
    }

    fn add<T>(&mut self, node: T)
    where
        T: Into<Box<dyn svg::Node>>,
    {
        if let Some(top) = self.groups.pop() {
            self.groups.push(top.add(node));
        }
    }

    fn close_group(&mut self) {
        if let Some(group) = self.groups.pop() {
            self.add(group);
        }
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn transform(&self) -> Affine {
        self.transforms.current()
    }

    fn push_transform(&mut self, affine: Affine) {
        self.transforms.push(affine);
        self.groups
            .push(svg_element::Group::new().set("transform", matrix(affine)));
    }

    fn pop_transform(&mut self) {
        if self.transforms.pop() {
            self.close_group();
        }
    }

    fn draw_circle(&mut self, circle: &Circle) {
        if circle.is_empty() {
            return;
        }
        let element = svg_element::Circle::new()
            .set("cx", circle.center.x)
            .set("cy", circle.center.y)
            .set("r", circle.radius);
        let element = paint(element, circle.fill, circle.stroke.as_ref());
        self.add(element);
    }

    fn draw_line(&mut self, line: &Line) {
        let Some(stroke) = line.stroke.as_ref() else {
            return;
        };
        let element = svg_element::Line::new()
            .set("x1", line.start.x)
            .set("y1", line.start.y)
            .set("x2", line.end.x)
            .set("y2", line.end.y);
        self.add(apply_stroke!(element, stroke));
    }

    fn draw_path(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        let element = svg_element::Path::new().set("d", path.geometry.to_svg());
        let element = paint(element, path.fill, path.stroke.as_ref());
        self.add(element);
    }

    fn draw_rect(&mut self, rect: &Rect) {
        let bounds = rect.to_kurbo();
        let element = svg_element::Rectangle::new()
            .set("x", bounds.x0)
            .set("y", bounds.y0)
            .set("width", bounds.width())
            .set("height", bounds.height());
        let element = paint(element, rect.fill, rect.stroke.as_ref());
        self.add(element);
    }

    fn draw_text(&mut self, text: &Text) {
        let element = svg_element::Text::new("")
            .set("x", text.position.x)
            .set("y", text.position.y)
            .set("text-anchor", text.h_align.to_svg_value())
            .set("dominant-baseline", text.v_align.to_svg_value())
            .set("font-family", text.font.family().to_svg_value())
            .set("font-size", text.font.size())
            .set("font-weight", text.font.weight().to_svg_value())
            .set("font-style", text.font.posture().to_svg_value())
            .set("fill", &text.color)
            .set("fill-opacity", text.color.alpha())
            .add(SvgText::new(text.content.as_str()));
        self.add(element);
    }

    fn draw_image(&mut self, image: &Image, origin: Point) {
        let png = match image.encode_png() {
            Ok(png) => png,
            Err(err) => {
                warn!(err; "Skipping image that could not be encoded");
                return;
            }
        };
        let element = svg_element::Image::new()
            .set("x", origin.x)
            .set("y", origin.y)
            .set("width", image.width())
            .set("height", image.height())
            .set(
                "href",
                format!("data:image/png;base64,{}", STANDARD.encode(png)),
            );
        self.add(element);
    }
}

fn matrix(affine: Affine) -> String {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

/// Sets the fill and stroke attributes of a shape element.
fn paint<T>(element: T, fill: Option<Color>, stroke: Option<&StrokeDefinition>) -> T
where
    T: svg::Node,
{
    let mut element = element;
    match fill {
        Some(color) => {
            element.assign("fill", &color);
            element.assign("fill-opacity", color.alpha());
        }
        None => element.assign("fill", "none"),
    }
    match stroke {
        Some(stroke) => {
            element.assign("stroke", stroke.color().to_string());
            element.assign("stroke-opacity", stroke.color().alpha());
            element.assign("stroke-width", stroke.width());
            element.assign("stroke-linecap", stroke.cap().to_svg_value());
            element.assign("stroke-linejoin", stroke.join().to_svg_value());
            if let Some(dasharray) = stroke.style().to_svg_value() {
                element.assign("stroke-dasharray", dasharray);
            }
        }
        None => element.assign("stroke", "none"),
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::{StrokeDefinition, TextHAlign, circle, line, rect, text},
        geometry::PixelSize,
    };

    fn render(f: impl FnOnce(&mut SvgSurface)) -> String {
        let mut surface = SvgSurface::new(Size::new(100.0, 80.0));
        f(&mut surface);
        surface.finish().to_string()
    }

    #[test]
    fn test_document_dimensions() {
        let svg = render(|_| {});
        assert!(svg.contains(r#"viewBox="0 0 100 80""#));
        assert!(svg.contains(r#"width="100""#));
    }

    #[test]
    fn test_nested_groups_close_in_order() {
        let svg = render(|s| {
            s.push_transform(Affine::translate((1.0, 2.0)));
            s.push_transform(Affine::scale(2.0));
            s.draw_circle(&circle(|c| c.radius = 1.0));
            s.pop_transform();
            s.draw_rect(&rect(|r| r.size = Size::new(3.0, 3.0)));
            s.pop_transform();
        });
        let outer = svg.find("matrix(1 0 0 1 1 2)").unwrap();
        let inner = svg.find("matrix(2 0 0 2 0 0)").unwrap();
        let circle_at = svg.find("<circle").unwrap();
        let rect_at = svg.rfind("<rect").unwrap();
        assert!(outer < inner && inner < circle_at && circle_at < rect_at);
    }

    #[test]
    fn test_unbalanced_groups_are_closed_by_finish() {
        let svg = render(|s| {
            s.push_transform(Affine::translate((4.0, 4.0)));
            s.draw_circle(&circle(|c| c.radius = 1.0));
        });
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }

    #[test]
    fn test_unfilled_shape_has_fill_none() {
        let svg = render(|s| {
            s.draw_rect(&rect(|r| {
                r.size = Size::new(3.0, 3.0);
                r.fill = None;
                r.stroke = Some(StrokeDefinition::dashed(Color::rgb(255, 0, 0), 2.0));
            }))
        });
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));
    }

    #[test]
    fn test_line_and_text_attributes() {
        let svg = render(|s| {
            s.draw_line(&line(|l| l.end = Point::new(5.0, 5.0)));
            s.draw_text(&text(|t| {
                t.content = "a < b".to_string();
                t.h_align = TextHAlign::Middle;
            }));
        });
        assert!(svg.contains("<line"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains("a &lt; b"));
    }

    #[test]
    fn test_image_is_embedded_as_png() {
        let image = Image::new(PixelSize::new(2, 2)).unwrap();
        let svg = render(|s| s.draw_image(&image, Point::ORIGIN));
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_background_rect() {
        let mut surface = SvgSurface::new(Size::new(10.0, 10.0));
        surface.set_background(Some(Color::rgb(255, 255, 255)));
        let svg = surface.finish().to_string();
        assert!(svg.contains(r#"height="100%""#));
    }
}
