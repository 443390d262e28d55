//! Leaf nodes that draw a list of primitives.

use collage_core::{draw::Primitive, surface::Surface};
use log::trace;

use crate::node::InvalidationSink;

/// A leaf node drawing an ordered list of primitives.
#[derive(Debug, Default)]
pub struct ElementNode {
    primitives: Vec<Primitive>,
    sink: Option<InvalidationSink>,
}

impl ElementNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Replaces the primitives and invalidates.
    ///
    /// The node is invalidated even when the new list equals the old one.
    pub fn set_primitives(&mut self, primitives: Vec<Primitive>) {
        self.primitives = primitives;
        self.invalidate();
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        trace!(count = self.primitives.len(); "Drawing element");
        for primitive in &self.primitives {
            surface.draw_primitive(primitive);
        }
    }

    pub fn invalidate(&self) {
        if let Some(sink) = &self.sink {
            sink.notify();
        }
    }

    pub fn sink(&self) -> Option<&InvalidationSink> {
        self.sink.as_ref()
    }

    pub fn set_sink(&mut self, sink: Option<InvalidationSink>) {
        self.sink = sink;
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use collage_core::{
        draw::{circle, rect},
        geometry::Size,
        surface::{DrawOp, RecordingSurface},
    };

    use super::*;

    fn counting_sink() -> (InvalidationSink, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let sink = {
            let count = Rc::clone(&count);
            InvalidationSink::new(move || count.set(count.get() + 1))
        };
        (sink, count)
    }

    #[test]
    fn test_set_primitives_always_invalidates() {
        let (sink, count) = counting_sink();
        let mut element = ElementNode::new();
        element.set_sink(Some(sink));

        let primitives: Vec<Primitive> = vec![circle(|c| c.radius = 2.0).into()];
        element.set_primitives(primitives.clone());
        element.set_primitives(primitives);

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_draw_in_order() {
        let mut element = ElementNode::new();
        element.set_primitives(vec![
            rect(|r| r.size = Size::new(1.0, 1.0)).into(),
            circle(|c| c.radius = 1.0).into(),
        ]);

        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        element.draw(&mut surface);

        let ops = surface.ops();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], DrawOp::Rect(..)));
        assert!(matches!(ops[1], DrawOp::Circle(..)));
    }

    #[test]
    fn test_without_sink_does_not_panic() {
        let mut element = ElementNode::new();
        element.set_primitives(Vec::new());
        assert!(element.primitives().is_empty());
    }
}
