//! Group nodes: ordered, transformed containers.

use std::cell::Cell;

use log::trace;

use collage_core::{
    geometry::{Affine, Point, Vec2},
    surface::{Surface, with_transform},
};

use crate::node::{InvalidationSink, SceneNode};

/// The transform attributes of a group.
///
/// The resulting matrix rotates and scales around `pivot`, then translates:
///
/// `translate(translation + pivot) · rotate(rotation) · scale(scale) · translate(-pivot)`
///
/// # Examples
///
/// ```
/// use collage::GroupTransform;
/// use collage_core::geometry::Point;
///
/// let transform = GroupTransform::default()
///     .with_rotation(90.0)
///     .with_pivot(Point::new(10.0, 10.0));
/// let p = transform.to_affine() * Point::new(10.0, 0.0);
/// assert!((p.x - 20.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransform {
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub pivot: Point,
    pub scale: Vec2,
    pub translation: Vec2,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            pivot: Point::ORIGIN,
            scale: Vec2::new(1.0, 1.0),
            translation: Vec2::ZERO,
        }
    }
}

impl GroupTransform {
    /// A pure translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self::default().with_translation(Vec2::new(x, y))
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_translation(mut self, translation: Vec2) -> Self {
        self.translation = translation;
        self
    }

    /// Builds the affine matrix for these attributes.
    pub fn to_affine(&self) -> Affine {
        let pivot = self.pivot.to_vec2();
        Affine::translate(self.translation + pivot)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-pivot)
    }
}

/// A container node that draws its children, back to front, under its own
/// transform.
///
/// The matrix is derived lazily from the [`GroupTransform`] and cached until
/// one of the transform attributes changes.
#[derive(Debug, Default)]
pub struct GroupNode {
    children: Vec<SceneNode>,
    transform: GroupTransform,
    matrix: Cell<Option<Affine>>,
    sink: Option<InvalidationSink>,
}

impl GroupNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&SceneNode> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.children.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn transform(&self) -> &GroupTransform {
        &self.transform
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    pub fn pivot(&self) -> Point {
        self.transform.pivot
    }

    pub fn scale(&self) -> Vec2 {
        self.transform.scale
    }

    pub fn translation(&self) -> Vec2 {
        self.transform.translation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.transform.rotation = degrees;
        self.transform_changed();
    }

    pub fn set_pivot(&mut self, pivot: Point) {
        self.transform.pivot = pivot;
        self.transform_changed();
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.transform.scale = scale;
        self.transform_changed();
    }

    pub fn set_translation(&mut self, translation: Vec2) {
        self.transform.translation = translation;
        self.transform_changed();
    }

    /// Sets all transform attributes with a single invalidation.
    pub fn set_transform(&mut self, transform: GroupTransform) {
        self.transform = transform;
        self.transform_changed();
    }

    fn transform_changed(&mut self) {
        self.matrix.set(None);
        self.invalidate();
    }

    /// Returns the group matrix, recomputing it if an attribute changed.
    pub fn matrix(&self) -> Affine {
        if let Some(matrix) = self.matrix.get() {
            return matrix;
        }
        let matrix = self.transform.to_affine();
        self.matrix.set(Some(matrix));
        matrix
    }

    /// Places `child` at `index`.
    ///
    /// An existing child at `index` is replaced, not shifted, and returned
    /// detached from this group's sink. An index at or past the end appends.
    pub fn insert_at(&mut self, index: usize, mut child: SceneNode) -> Option<SceneNode> {
        child.set_sink(self.sink.clone());
        let replaced = if index < self.children.len() {
            let mut old = std::mem::replace(&mut self.children[index], child);
            old.set_sink(None);
            Some(old)
        } else {
            self.children.push(child);
            None
        };
        self.invalidate();
        replaced
    }

    /// Moves `count` children starting at `from` so that they start at `to`
    /// (when moving toward the front) or end just before `to` (when moving
    /// toward the back).
    ///
    /// Moving a range onto itself (`from == to`) does nothing. Steps that run
    /// past the end stop the move early and insertion positions are clamped
    /// to the current length.
    pub fn move_range(&mut self, from: usize, to: usize, count: usize) {
        if from == to {
            return;
        }

        if from > to {
            let mut current = to;
            for step in 0..count {
                let source = from + step;
                if source >= self.children.len() {
                    break;
                }
                let node = self.children.remove(source);
                let dest = current.min(self.children.len());
                self.children.insert(dest, node);
                current += 1;
            }
        } else {
            for _ in 0..count {
                if from >= self.children.len() {
                    break;
                }
                let node = self.children.remove(from);
                let dest = (to - 1).min(self.children.len());
                self.children.insert(dest, node);
            }
        }
        trace!(from, to, count; "Moved children");
        self.invalidate();
    }

    /// Removes up to `count` children starting at `index` and returns them
    /// detached from this group's sink.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Vec<SceneNode> {
        let end = index.saturating_add(count).min(self.children.len());
        let removed: Vec<SceneNode> = if index < end {
            self.children
                .drain(index..end)
                .map(|mut child| {
                    child.set_sink(None);
                    child
                })
                .collect()
        } else {
            Vec::new()
        };
        trace!(index, count, removed = removed.len(); "Removed children");
        self.invalidate();
        removed
    }

    /// Removes every child.
    pub fn clear(&mut self) -> Vec<SceneNode> {
        self.remove_range(0, self.children.len())
    }

    /// Draws every child under this group's matrix.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let matrix = self.matrix();
        with_transform(surface, matrix, |surface| {
            for child in &self.children {
                child.draw(surface);
            }
        });
    }

    pub fn invalidate(&self) {
        if let Some(sink) = &self.sink {
            sink.notify();
        }
    }

    pub fn sink(&self) -> Option<&InvalidationSink> {
        self.sink.as_ref()
    }

    /// Replaces the sink of this group and of every descendant.
    pub fn set_sink(&mut self, sink: Option<InvalidationSink>) {
        for child in &mut self.children {
            child.set_sink(sink.clone());
        }
        self.sink = sink;
    }

    /// Returns the number of nodes below this group.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                SceneNode::Group(group) => 1 + group.descendant_count(),
                SceneNode::Element(_) => 1,
            })
            .sum()
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::tests::{ids, tagged};
    use super::*;

    #[derive(Debug, Clone)]
    enum ChildOp {
        Insert(usize, u32),
        Move(usize, usize, usize),
        Remove(usize, usize),
    }

    // ===================
    // Strategies
    // ===================

    fn child_op_strategy() -> impl Strategy<Value = ChildOp> {
        prop_oneof![
            (0usize..12, 0u32..1000).prop_map(|(index, id)| ChildOp::Insert(index, id)),
            (0usize..12, 0usize..12, 0usize..4)
                .prop_map(|(from, to, count)| ChildOp::Move(from, to, count)),
            (0usize..12, 0usize..4).prop_map(|(index, count)| ChildOp::Remove(index, count)),
        ]
    }

    fn ops_strategy() -> impl Strategy<Value = Vec<ChildOp>> {
        prop::collection::vec(child_op_strategy(), 0..40)
    }

    fn ids_strategy() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(0u32..1000, 1..10)
    }

    // ===================
    // Reference model
    // ===================

    /// Returns true if moving `count` items from `from` to `to` is a
    /// well-formed move for a list of `len` items.
    fn is_valid_move(len: usize, from: usize, to: usize, count: usize) -> bool {
        if from + count > len || to > len {
            return false;
        }
        from > to || to >= from + count
    }

    fn model_move(model: &mut Vec<u32>, from: usize, to: usize, count: usize) {
        let dest = if from > to { to } else { to - count };
        let moved: Vec<u32> = model.drain(from..from + count).collect();
        model.splice(dest..dest, moved);
    }

    fn apply(group: &mut GroupNode, model: &mut Vec<u32>, op: &ChildOp) {
        match *op {
            ChildOp::Insert(index, id) => {
                group.insert_at(index, tagged(id));
                if index < model.len() {
                    model[index] = id;
                } else {
                    model.push(id);
                }
            }
            ChildOp::Move(from, to, count) => {
                if is_valid_move(model.len(), from, to, count) {
                    group.move_range(from, to, count);
                    model_move(model, from, to, count);
                }
            }
            ChildOp::Remove(index, count) => {
                group.remove_range(index, count);
                for _ in 0..count {
                    if index < model.len() {
                        model.remove(index);
                    }
                }
            }
        }
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Random operation sequences agree with a plain list model.
    fn check_matches_list_model(ops: &[ChildOp]) -> Result<(), TestCaseError> {
        let mut group = GroupNode::new();
        let mut model = Vec::new();
        for op in ops {
            apply(&mut group, &mut model, op);
            prop_assert_eq!(ids(&group), model.clone(), "after {:?}", op);
        }
        Ok(())
    }

    /// A move followed by its inverse restores the original order.
    fn check_move_inverse_restores(
        initial: &[u32],
        from: usize,
        to: usize,
        count: usize,
    ) -> Result<(), TestCaseError> {
        prop_assume!(is_valid_move(initial.len(), from, to, count) && from != to && count > 0);

        let mut group = GroupNode::new();
        for &id in initial {
            group.insert_at(usize::MAX, tagged(id));
        }
        group.move_range(from, to, count);
        if from > to {
            group.move_range(to, from + count, count);
        } else {
            group.move_range(to - count, from, count);
        }
        prop_assert_eq!(ids(&group), initial.to_vec());
        Ok(())
    }

    proptest! {
        #[test]
        fn matches_list_model(ops in ops_strategy()) {
            check_matches_list_model(&ops)?;
        }

        #[test]
        fn move_inverse_restores(
            initial in ids_strategy(),
            from in 0usize..10,
            to in 0usize..11,
            count in 1usize..4,
        ) {
            check_move_inverse_restores(&initial, from, to, count)?;
        }
    }
}
