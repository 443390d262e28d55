use crate::draw::{Circle, Line, Path, Rect, Text};

/// The closed set of things an element can draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle(Circle),
    Line(Line),
    Path(Path),
    Rect(Rect),
    Text(Text),
}

impl Primitive {
    /// Returns a short name for the primitive kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle(_) => "circle",
            Self::Line(_) => "line",
            Self::Path(_) => "path",
            Self::Rect(_) => "rect",
            Self::Text(_) => "text",
        }
    }
}

impl From<Circle> for Primitive {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Path> for Primitive {
    fn from(path: Path) -> Self {
        Self::Path(path)
    }
}

impl From<Rect> for Primitive {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<Text> for Primitive {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

/// Builds a [`Circle`] by applying `init` to the default circle.
pub fn circle(init: impl FnOnce(&mut Circle)) -> Circle {
    let mut circle = Circle::default();
    init(&mut circle);
    circle
}

/// Builds a [`Line`] by applying `init` to the default line.
pub fn line(init: impl FnOnce(&mut Line)) -> Line {
    let mut line = Line::default();
    init(&mut line);
    line
}

/// Builds a [`Path`] by applying `init` to an empty path.
pub fn path(init: impl FnOnce(&mut Path)) -> Path {
    let mut path = Path::default();
    init(&mut path);
    path
}

/// Builds a [`Rect`] by applying `init` to the default rectangle.
pub fn rect(init: impl FnOnce(&mut Rect)) -> Rect {
    let mut rect = Rect::default();
    init(&mut rect);
    rect
}

/// Builds a [`Text`] by applying `init` to the default text.
pub fn text(init: impl FnOnce(&mut Text)) -> Text {
    let mut text = Text::default();
    init(&mut text);
    text
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{color::Color, geometry::Size};

    #[test]
    fn test_builders_apply_init() {
        let c = circle(|c| {
            c.radius = 4.0;
            c.fill = Some(Color::rgb(0, 0, 255));
        });
        assert_approx_eq!(f64, c.radius, 4.0);
        assert_eq!(c.fill, Some(Color::rgb(0, 0, 255)));

        let r = rect(|r| r.size = Size::new(2.0, 3.0));
        assert_approx_eq!(f64, r.size.height, 3.0);

        let t = text(|t| t.content = "label".to_string());
        assert_eq!(t.content, "label");
    }

    #[test]
    fn test_primitive_from_and_kind() {
        let primitives: Vec<Primitive> = vec![
            circle(|_| {}).into(),
            line(|_| {}).into(),
            path(|_| {}).into(),
            rect(|_| {}).into(),
            text(|_| {}).into(),
        ];
        let kinds: Vec<_> = primitives.iter().map(Primitive::kind).collect();
        assert_eq!(kinds, ["circle", "line", "path", "rect", "text"]);
    }

    #[test]
    fn test_primitive_equality_is_by_value() {
        let a: Primitive = circle(|c| c.radius = 1.0).into();
        let b: Primitive = circle(|c| c.radius = 1.0).into();
        let c: Primitive = circle(|c| c.radius = 2.0).into();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
