use crate::{
    draw::{Circle, Line, Path, Rect, Text},
    geometry::{Affine, PixelSize, Point, Size},
    image::Image,
    surface::{Surface, TransformStack},
};

/// A draw call captured by [`RecordingSurface`], paired with the transform
/// that was active when it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Circle(Affine, Circle),
    Line(Affine, Line),
    Path(Affine, Path),
    Rect(Affine, Rect),
    Text(Affine, Text),
    /// Images are recorded by size and origin only.
    Image(Affine, PixelSize, Point),
}

impl DrawOp {
    pub fn transform(&self) -> Affine {
        match self {
            Self::Circle(transform, _)
            | Self::Line(transform, _)
            | Self::Path(transform, _)
            | Self::Rect(transform, _)
            | Self::Text(transform, _)
            | Self::Image(transform, _, _) => *transform,
        }
    }
}

/// A surface that records draw calls instead of producing output.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    transforms: TransformStack,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transforms: TransformStack::new(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the recorded operations and starts a fresh recording.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Returns the number of transforms currently pushed.
    pub fn depth(&self) -> usize {
        self.transforms.depth()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
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
        let transform = self.transform();
        self.ops.push(DrawOp::Circle(transform, circle.clone()));
    }

    fn draw_line(&mut self, line: &Line) {
        let transform = self.transform();
        self.ops.push(DrawOp::Line(transform, line.clone()));
    }

    fn draw_path(&mut self, path: &Path) {
        let transform = self.transform();
        self.ops.push(DrawOp::Path(transform, path.clone()));
    }

    fn draw_rect(&mut self, rect: &Rect) {
        let transform = self.transform();
        self.ops.push(DrawOp::Rect(transform, rect.clone()));
    }

    fn draw_text(&mut self, text: &Text) {
        let transform = self.transform();
        self.ops.push(DrawOp::Text(transform, text.clone()));
    }

    fn draw_image(&mut self, image: &Image, origin: Point) {
        let transform = self.transform();
        self.ops.push(DrawOp::Image(transform, image.size(), origin));
    }
}
