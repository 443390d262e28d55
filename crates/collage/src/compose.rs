//! Declarative scene descriptions and the diff that applies them.
//!
//! Scene content is written into a [`SceneBuilder`] as nested groups and
//! elements. The finished [`SceneDesc`] is compared with the previous one by
//! the [`Composer`], which emits the [`TreeOp`] stream that edits the
//! retained tree into the new shape.
//!
//! # Identity
//!
//! Children of a group are matched across compositions by kind plus key
//! when [`SceneBuilder::key`] was used, and by kind plus position among the
//! unkeyed siblings of that kind otherwise. Matched nodes are updated in
//! place; everything else is removed or inserted.
//!
//! ```
//! use collage::{Composer, GroupNode, GroupTransform, SceneApplier, SceneBuilder, Applier};
//! use collage_core::draw::circle;
//!
//! let mut scene = SceneBuilder::new();
//! scene.group(GroupTransform::translate(10.0, 0.0), |scene| {
//!     scene.elements([circle(|c| c.radius = 5.0)]);
//! });
//!
//! let mut root = GroupNode::new();
//! let mut composer = Composer::new();
//! SceneApplier::new(&mut root).apply_all(composer.compose(scene.build()));
//! assert_eq!(root.descendant_count(), 2);
//! ```

use std::{collections::HashMap, mem};

use log::debug;

use collage_core::draw::Primitive;

use crate::{
    applier::{NodeUpdate, TreeOp},
    group::GroupTransform,
    input::{Dependency, Input},
    node::NodeKind,
};

/// Description of a single node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDesc {
    Group {
        key: Option<String>,
        transform: GroupTransform,
        children: Vec<NodeDesc>,
    },
    Element {
        key: Option<String>,
        primitives: Vec<Primitive>,
    },
}

impl NodeDesc {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Group { .. } => NodeKind::Group,
            Self::Element { .. } => NodeKind::Element,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Group { key, .. } | Self::Element { key, .. } => key.as_deref(),
        }
    }
}

/// Description of a whole scene: the children of the root group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDesc {
    children: Vec<NodeDesc>,
}

impl SceneDesc {
    pub fn new(children: Vec<NodeDesc>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[NodeDesc] {
        &self.children
    }
}

/// Collects a scene description and the inputs read while writing it.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    children: Vec<NodeDesc>,
    pending_key: Option<String>,
    dependencies: Vec<Dependency>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an identity key to the next node added at this level.
    pub fn key(&mut self, key: impl Into<String>) -> &mut Self {
        self.pending_key = Some(key.into());
        self
    }

    /// Adds a group with the given transform; `content` writes its children.
    pub fn group(
        &mut self,
        transform: GroupTransform,
        content: impl FnOnce(&mut SceneBuilder),
    ) -> &mut Self {
        let key = self.pending_key.take();
        let mut child = SceneBuilder {
            dependencies: mem::take(&mut self.dependencies),
            ..Self::default()
        };
        content(&mut child);
        self.dependencies = child.dependencies;
        self.children.push(NodeDesc::Group {
            key,
            transform,
            children: child.children,
        });
        self
    }

    /// Adds an element drawing `primitives` in order.
    pub fn elements<I>(&mut self, primitives: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Primitive>,
    {
        let key = self.pending_key.take();
        self.children.push(NodeDesc::Element {
            key,
            primitives: primitives.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Reads `input` and records it as a dependency of this scene.
    pub fn read<T: Clone + 'static>(&mut self, input: &Input<T>) -> T {
        self.dependencies.push(Dependency::on(input));
        input.get()
    }

    /// Like [`read`](Self::read), for values that are not `Clone`.
    pub fn read_with<T: 'static, R>(&mut self, input: &Input<T>, f: impl FnOnce(&T) -> R) -> R {
        self.dependencies.push(Dependency::on(input));
        input.with(f)
    }

    /// Returns the number of nodes added at this level so far.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Finishes the description, discarding recorded dependencies.
    pub fn build(self) -> SceneDesc {
        self.finish().0
    }

    pub(crate) fn finish(self) -> (SceneDesc, Vec<Dependency>) {
        (SceneDesc::new(self.children), self.dependencies)
    }
}

/// Diffs successive scene descriptions into tree operations.
#[derive(Debug, Default)]
pub struct Composer {
    previous: Vec<NodeDesc>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the description the retained tree currently matches.
    pub fn previous(&self) -> &[NodeDesc] {
        &self.previous
    }

    /// Returns the operations that turn the previous scene into `scene`.
    ///
    /// The operations assume the applier starts at the root group and leave
    /// it there.
    pub fn compose(&mut self, scene: SceneDesc) -> Vec<TreeOp> {
        let mut ops = Vec::new();
        diff_children(&self.previous, &scene.children, &mut ops);
        self.previous = scene.children;
        debug!(ops = ops.len(); "Composed scene");
        ops
    }

    /// Forgets the previous scene and returns the operation that empties the
    /// tree.
    pub fn dispose(&mut self) -> Vec<TreeOp> {
        self.previous.clear();
        vec![TreeOp::Clear]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Identity<'a> {
    Keyed(NodeKind, &'a str),
    Ordinal(NodeKind, usize),
}

/// A child position during reordering, named by where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Old(usize),
    New(usize),
}

fn identities(nodes: &[NodeDesc]) -> Vec<Identity<'_>> {
    let mut ordinals: HashMap<NodeKind, usize> = HashMap::new();
    nodes
        .iter()
        .map(|node| match node.key() {
            Some(key) => Identity::Keyed(node.kind(), key),
            None => {
                let ordinal = ordinals.entry(node.kind()).or_default();
                *ordinal += 1;
                Identity::Ordinal(node.kind(), *ordinal - 1)
            }
        })
        .collect()
}

/// For each new child, the index of the old child it continues, if any.
///
/// When identities repeat, the first unused match wins.
fn match_children(old: &[NodeDesc], new: &[NodeDesc]) -> Vec<Option<usize>> {
    let mut available: HashMap<Identity<'_>, usize> = HashMap::new();
    for (index, identity) in identities(old).into_iter().enumerate() {
        available.entry(identity).or_insert(index);
    }
    identities(new)
        .into_iter()
        .map(|identity| available.remove(&identity))
        .collect()
}

fn diff_children(old: &[NodeDesc], new: &[NodeDesc], ops: &mut Vec<TreeOp>) {
    let matches = match_children(old, new);

    let mut kept = vec![false; old.len()];
    for &index in matches.iter().flatten() {
        kept[index] = true;
    }

    // Removals run back to front so earlier indices stay valid
    let mut index = old.len();
    while index > 0 {
        if kept[index - 1] {
            index -= 1;
            continue;
        }
        let end = index;
        while index > 0 && !kept[index - 1] {
            index -= 1;
        }
        ops.push(TreeOp::Remove(index, end - index));
    }

    let mut slots: Vec<Slot> = (0..old.len())
        .filter(|&index| kept[index])
        .map(Slot::Old)
        .collect();

    for (position, node) in new.iter().enumerate() {
        if matches[position].is_some() {
            continue;
        }
        let index = slots.len();
        ops.push(TreeOp::InsertTopDown(index, node.kind()));
        ops.push(TreeOp::Down(index));
        build_node(node, ops);
        ops.push(TreeOp::Up);
        slots.push(Slot::New(position));
    }

    for (position, matched) in matches.iter().enumerate() {
        let target = matched.map_or(Slot::New(position), Slot::Old);
        let Some(offset) = slots[position..].iter().position(|slot| *slot == target) else {
            continue;
        };
        if offset > 0 {
            let from = position + offset;
            ops.push(TreeOp::Move(from, position, 1));
            let slot = slots.remove(from);
            slots.insert(position, slot);
        }
    }

    for (position, (matched, node)) in matches.iter().zip(new).enumerate() {
        let Some(previous) = matched.map(|index| &old[index]) else {
            continue;
        };
        if previous == node {
            continue;
        }
        ops.push(TreeOp::Down(position));
        update_node(previous, node, ops);
        ops.push(TreeOp::Up);
    }
}

/// Emits the properties and children of a freshly inserted node.
fn build_node(node: &NodeDesc, ops: &mut Vec<TreeOp>) {
    match node {
        NodeDesc::Group {
            transform,
            children,
            ..
        } => {
            ops.push(TreeOp::Update(NodeUpdate::Transform(*transform)));
            diff_children(&[], children, ops);
        }
        NodeDesc::Element { primitives, .. } => {
            ops.push(TreeOp::Update(NodeUpdate::Primitives(primitives.clone())));
        }
    }
}

fn update_node(previous: &NodeDesc, node: &NodeDesc, ops: &mut Vec<TreeOp>) {
    match (previous, node) {
        (
            NodeDesc::Group {
                transform: old_transform,
                children: old_children,
                ..
            },
            NodeDesc::Group {
                transform,
                children,
                ..
            },
        ) => {
            if old_transform != transform {
                ops.push(TreeOp::Update(NodeUpdate::Transform(*transform)));
            }
            diff_children(old_children, children, ops);
        }
        (
            NodeDesc::Element {
                primitives: old_primitives,
                ..
            },
            NodeDesc::Element { primitives, .. },
        ) => {
            if old_primitives != primitives {
                ops.push(TreeOp::Update(NodeUpdate::Primitives(primitives.clone())));
            }
        }
        _ => unreachable!("matched nodes always share a kind"),
    }
}


#[cfg(test)]
mod proptest_tests {
    use collage_core::draw::circle;
    use proptest::prelude::*;

    use super::tests::{describe, without_keys};
    use super::*;
    use crate::{
        applier::{Applier, SceneApplier},
        group::GroupNode,
    };

    // ===================
    // Strategies
    // ===================

    fn key_strategy() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from))
    }

    fn element_strategy() -> impl Strategy<Value = NodeDesc> {
        (key_strategy(), prop::collection::vec(1u32..4, 0..3)).prop_map(|(key, radii)| {
            NodeDesc::Element {
                key,
                primitives: radii
                    .into_iter()
                    .map(|r| circle(|c| c.radius = f64::from(r)).into())
                    .collect(),
            }
        })
    }

    fn node_strategy() -> impl Strategy<Value = NodeDesc> {
        element_strategy().prop_recursive(3, 24, 4, |inner| {
            (key_strategy(), 0u32..3, prop::collection::vec(inner, 0..4)).prop_map(
                |(key, dx, children)| NodeDesc::Group {
                    key,
                    transform: GroupTransform::translate(f64::from(dx), 0.0),
                    children,
                },
            )
        })
    }

    fn scene_strategy() -> impl Strategy<Value = SceneDesc> {
        prop::collection::vec(node_strategy(), 0..6).prop_map(SceneDesc::new)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Applying the diff between any two scenes yields the second scene.
    fn check_diff_reproduces_scene(
        first: &SceneDesc,
        second: &SceneDesc,
    ) -> Result<(), TestCaseError> {
        let mut composer = Composer::new();
        let mut root = GroupNode::new();

        SceneApplier::new(&mut root).apply_all(composer.compose(first.clone()));
        prop_assert_eq!(describe(&root), without_keys(first.children()));

        SceneApplier::new(&mut root).apply_all(composer.compose(second.clone()));
        prop_assert_eq!(describe(&root), without_keys(second.children()));
        Ok(())
    }

    /// Every move the composer emits brings a child toward the front.
    fn check_moves_are_front_ward(
        first: &SceneDesc,
        second: &SceneDesc,
    ) -> Result<(), TestCaseError> {
        let mut composer = Composer::new();
        composer.compose(first.clone());
        for op in composer.compose(second.clone()) {
            if let TreeOp::Move(from, to, count) = op {
                prop_assert!(from > to);
                prop_assert_eq!(count, 1);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn diff_reproduces_scene(first in scene_strategy(), second in scene_strategy()) {
            check_diff_reproduces_scene(&first, &second)?;
        }

        #[test]
        fn moves_are_front_ward(first in scene_strategy(), second in scene_strategy()) {
            check_moves_are_front_ward(&first, &second)?;
        }
    }
}
