//! Scene nodes and invalidation.
//!
//! The retained tree is made of [`SceneNode`]s: [`GroupNode`] containers and
//! [`ElementNode`] leaves. Every node may carry an [`InvalidationSink`], a
//! callback handle shared by the whole subtree below the node that set it.
//! Any visible change calls the sink, which is how a change deep in the tree
//! reaches the root.

use std::{fmt, rc::Rc};

use collage_core::surface::Surface;

use crate::{element::ElementNode, group::GroupNode};

/// A callback handle notified whenever a node changes.
///
/// Cloning a sink shares the same callback. Sinks never own the tree they
/// report to: the root hands out a sink that only holds a weak reference
/// to its dirty flag.
#[derive(Clone)]
pub struct InvalidationSink(Rc<dyn Fn()>);

impl InvalidationSink {
    pub fn new(callback: impl Fn() + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn notify(&self) {
        (self.0)();
    }

    /// Returns true if both handles share the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for InvalidationSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InvalidationSink")
            .field(&Rc::as_ptr(&self.0))
            .finish()
    }
}

/// The two kinds of node in a scene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Element,
}

/// A node in the retained scene tree.
#[derive(Debug)]
pub enum SceneNode {
    Group(GroupNode),
    Element(ElementNode),
}

impl SceneNode {
    /// Creates an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Group => Self::Group(GroupNode::new()),
            NodeKind::Element => Self::Element(ElementNode::new()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Group(_) => NodeKind::Group,
            Self::Element(_) => NodeKind::Element,
        }
    }

    /// Draws the node and its descendants into `surface`.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Self::Group(group) => group.draw(surface),
            Self::Element(element) => element.draw(surface),
        }
    }

    /// Notifies the node's sink, if any.
    pub fn invalidate(&self) {
        match self {
            Self::Group(group) => group.invalidate(),
            Self::Element(element) => element.invalidate(),
        }
    }

    pub fn sink(&self) -> Option<&InvalidationSink> {
        match self {
            Self::Group(group) => group.sink(),
            Self::Element(element) => element.sink(),
        }
    }

    /// Replaces the sink of this node and, for groups, of every descendant.
    pub fn set_sink(&mut self, sink: Option<InvalidationSink>) {
        match self {
            Self::Group(group) => group.set_sink(sink),
            Self::Element(element) => element.set_sink(sink),
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Self::Group(group) => Some(group),
            Self::Element(_) => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupNode> {
        match self {
            Self::Group(group) => Some(group),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            Self::Group(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            Self::Group(_) => None,
        }
    }
}

impl From<GroupNode> for SceneNode {
    fn from(group: GroupNode) -> Self {
        Self::Group(group)
    }
}

impl From<ElementNode> for SceneNode {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}
