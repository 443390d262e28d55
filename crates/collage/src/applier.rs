//! Tree-diff instructions and the applier that executes them.
//!
//! A [`TreeOp`] stream describes how to edit a retained tree into a new
//! shape. Structural instructions act on the children of the *current*
//! node, which starts at the root group and is moved with [`TreeOp::Down`]
//! and [`TreeOp::Up`].
//!
//! ```
//! use collage::{GroupNode, NodeKind, NodeUpdate, SceneApplier, TreeOp, Applier};
//! use collage_core::draw::circle;
//!
//! let mut root = GroupNode::new();
//! let mut applier = SceneApplier::new(&mut root);
//! for op in [
//!     TreeOp::InsertTopDown(0, NodeKind::Element),
//!     TreeOp::Down(0),
//!     TreeOp::Update(NodeUpdate::Primitives(vec![circle(|c| c.radius = 4.0).into()])),
//!     TreeOp::Up,
//! ] {
//!     applier.apply(op);
//! }
//! assert_eq!(root.len(), 1);
//! ```

use log::trace;

use collage_core::draw::Primitive;

use crate::{
    element::ElementNode,
    group::{GroupNode, GroupTransform},
    node::{NodeKind, SceneNode},
};

/// A property change applied to the current node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeUpdate {
    Transform(GroupTransform),
    Primitives(Vec<Primitive>),
}

/// A single tree-diff instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeOp {
    /// Removes every child of the root group and returns to the root.
    Clear,
    /// Inserts a new empty node at an index of the current node.
    InsertTopDown(usize, NodeKind),
    /// Accepted for completeness; the scene tree is built top-down.
    InsertBottomUp(usize, NodeKind),
    /// `Move(from, to, count)` on the current node's children.
    Move(usize, usize, usize),
    /// `Remove(index, count)` on the current node's children.
    Remove(usize, usize),
    /// Makes the child at an index the current node.
    Down(usize),
    /// Returns to the parent of the current node.
    Up,
    Update(NodeUpdate),
}

/// Executes tree-diff instructions against a tree.
pub trait Applier {
    /// Mutable view of the current node.
    type Current<'a>
    where
        Self: 'a;

    fn current_mut(&mut self) -> Self::Current<'_>;

    fn down(&mut self, index: usize);

    fn up(&mut self);

    fn insert_top_down(&mut self, index: usize, node: SceneNode);

    fn insert_bottom_up(&mut self, index: usize, node: SceneNode);

    fn move_nodes(&mut self, from: usize, to: usize, count: usize);

    fn remove(&mut self, index: usize, count: usize);

    fn clear(&mut self);

    fn update(&mut self, update: NodeUpdate);

    /// Executes one instruction.
    fn apply(&mut self, op: TreeOp) {
        match op {
            TreeOp::Clear => self.clear(),
            TreeOp::InsertTopDown(index, kind) => self.insert_top_down(index, SceneNode::new(kind)),
            TreeOp::InsertBottomUp(index, kind) => {
                self.insert_bottom_up(index, SceneNode::new(kind))
            }
            TreeOp::Move(from, to, count) => self.move_nodes(from, to, count),
            TreeOp::Remove(index, count) => self.remove(index, count),
            TreeOp::Down(index) => self.down(index),
            TreeOp::Up => self.up(),
            TreeOp::Update(update) => self.update(update),
        }
    }

    /// Executes every instruction in order.
    fn apply_all(&mut self, ops: impl IntoIterator<Item = TreeOp>)
    where
        Self: Sized,
    {
        for op in ops {
            self.apply(op);
        }
    }
}

/// Mutable access to the node an applier currently points at.
#[derive(Debug)]
pub enum CurrentNode<'a> {
    Group(&'a mut GroupNode),
    Element(&'a mut ElementNode),
}

impl<'a> CurrentNode<'a> {
    /// Returns the group, panicking if the current node is an element.
    ///
    /// # Panics
    ///
    /// Panics with "not a container" when the current node is an element.
    pub fn into_group(self) -> &'a mut GroupNode {
        match self {
            Self::Group(group) => group,
            Self::Element(_) => panic!("not a container: element nodes cannot hold children"),
        }
    }
}

/// An [`Applier`] over a [`GroupNode`] tree, addressing the current node by
/// its index path from the root group.
#[derive(Debug)]
pub struct SceneApplier<'a> {
    root: &'a mut GroupNode,
    path: Vec<usize>,
}

impl<'a> SceneApplier<'a> {
    pub fn new(root: &'a mut GroupNode) -> Self {
        Self {
            root,
            path: Vec::new(),
        }
    }

    /// Returns the index path of the current node.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    fn current_group(&mut self) -> &mut GroupNode {
        self.current_mut().into_group()
    }
}

impl Applier for SceneApplier<'_> {
    type Current<'b>
        = CurrentNode<'b>
    where
        Self: 'b;

    /// # Panics
    ///
    /// Panics if the path runs through an element or past the end of a
    /// group's children.
    fn current_mut(&mut self) -> CurrentNode<'_> {
        let mut current = CurrentNode::Group(&mut *self.root);
        for &index in &self.path {
            let group = current.into_group();
            current = match group.child_mut(index) {
                Some(SceneNode::Group(group)) => CurrentNode::Group(group),
                Some(SceneNode::Element(element)) => CurrentNode::Element(element),
                None => panic!("no child at index {index}"),
            };
        }
        current
    }

    /// # Panics
    ///
    /// Panics if the current node is an element or has no child at `index`.
    fn down(&mut self, index: usize) {
        let group = self.current_group();
        assert!(
            index < group.len(),
            "no child at index {index} (group has {})",
            group.len()
        );
        self.path.push(index);
    }

    /// # Panics
    ///
    /// Panics when already at the root.
    fn up(&mut self) {
        assert!(self.path.pop().is_some(), "up() without matching down()");
    }

    fn insert_top_down(&mut self, index: usize, node: SceneNode) {
        trace!(index, kind:? = node.kind(); "Inserting node");
        self.current_group().insert_at(index, node);
    }

    fn insert_bottom_up(&mut self, _index: usize, _node: SceneNode) {}

    fn move_nodes(&mut self, from: usize, to: usize, count: usize) {
        self.current_group().move_range(from, to, count);
    }

    fn remove(&mut self, index: usize, count: usize) {
        self.current_group().remove_range(index, count);
    }

    fn clear(&mut self) {
        self.path.clear();
        self.root.clear();
    }

    /// # Panics
    ///
    /// Panics when a transform is applied to an element or primitives to a
    /// group.
    fn update(&mut self, update: NodeUpdate) {
        match (self.current_mut(), update) {
            (CurrentNode::Group(group), NodeUpdate::Transform(transform)) => {
                group.set_transform(transform)
            }
            (CurrentNode::Element(element), NodeUpdate::Primitives(primitives)) => {
                element.set_primitives(primitives)
            }
            (CurrentNode::Element(_), NodeUpdate::Transform(_)) => {
                panic!("group transform applied to an element node")
            }
            (CurrentNode::Group(_), NodeUpdate::Primitives(_)) => {
                panic!("primitives applied to a group node")
            }
        }
    }
}
