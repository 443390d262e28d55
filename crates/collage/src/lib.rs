//! Collage - A retained scene graph with incremental, cached redraw.
//!
//! Scenes are written declaratively into a [`SceneBuilder`] and kept as a
//! retained tree of [`GroupNode`] containers and [`ElementNode`] leaves. A
//! [`Painter`] ties the pieces together:
//!
//! 1. The content callback describes the scene, reading any [`Input`]s it
//!    depends on.
//! 2. The [`Composer`] diffs the description against the previous one and
//!    emits [`TreeOp`]s.
//! 3. A [`SceneApplier`] applies those operations to the tree; every change
//!    bubbles through the nodes' [`InvalidationSink`] to the [`RootNode`].
//! 4. The root re-rasterizes into its cached image only when it is dirty or
//!    the output size changed, and otherwise just blits the cache.
//!
//! # Examples
//!
//! ```
//! use collage::{Drawable, GroupTransform, Input, Painter};
//! use collage_core::{draw::circle, geometry::Size, surface::RecordingSurface};
//!
//! let radius = Input::new(10.0);
//! let mut painter = {
//!     let radius = radius.clone();
//!     Painter::builder(Size::new(64.0, 64.0)).build(move |scene, width, height| {
//!         let r = scene.read(&radius);
//!         scene.group(GroupTransform::translate(width / 2.0, height / 2.0), |scene| {
//!             scene.elements([circle(|c| c.radius = r)]);
//!         });
//!     })
//! };
//!
//! let mut surface = RecordingSurface::new(Size::new(64.0, 64.0));
//! painter.draw(&mut surface, Size::new(64.0, 64.0)).unwrap();
//! painter.draw(&mut surface, Size::new(64.0, 64.0)).unwrap();
//! assert_eq!(painter.root().render_count(), 1);
//!
//! radius.set(20.0);
//! painter.draw(&mut surface, Size::new(64.0, 64.0)).unwrap();
//! assert_eq!(painter.root().render_count(), 2);
//! ```

pub mod axis;
pub mod config;
pub mod scale;

mod applier;
mod compose;
mod element;
mod error;
mod group;
mod input;
mod node;
mod painter;
mod root;

pub use collage_core::{color, draw, geometry, image, surface};

pub use applier::{Applier, CurrentNode, NodeUpdate, SceneApplier, TreeOp};
pub use compose::{Composer, NodeDesc, SceneBuilder, SceneDesc};
pub use element::ElementNode;
pub use error::CollageError;
pub use group::{GroupNode, GroupTransform};
pub use input::Input;
pub use node::{InvalidationSink, NodeKind, SceneNode};
pub use painter::{Drawable, Painter, PainterBuilder};
pub use root::RootNode;
