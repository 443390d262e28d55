//! Drawable primitives and their styling.
//!
//! Scenes are built from a closed set of primitives, collected in the
//! [`Primitive`] enum:
//!
//! - [`Circle`]: center and radius
//! - [`Line`]: a single segment between two points
//! - [`Path`]: an arbitrary Bézier path
//! - [`Rect`]: an axis-aligned rectangle
//! - [`Text`]: a single run of text with font and alignment
//!
//! Every shape takes an optional fill color and an optional
//! [`StrokeDefinition`]. The builder functions ([`circle`], [`line`],
//! [`path`], [`rect`], [`text`]) start from a default primitive and hand it
//! to an initializer closure:
//!
//! ```
//! use collage_core::color::Color;
//! use collage_core::draw::{Primitive, StrokeDefinition, circle, line};
//!
//! let primitives: Vec<Primitive> = vec![
//!     circle(|c| {
//!         c.radius = 32.0;
//!         c.fill = Some(Color::rgb(0, 0, 255));
//!     })
//!     .into(),
//!     line(|l| {
//!         l.end = (70.0, 70.0).into();
//!         l.stroke = Some(StrokeDefinition::solid(Color::new("cyan").unwrap(), 12.0));
//!     })
//!     .into(),
//! ];
//! assert_eq!(primitives.len(), 2);
//! ```

mod circle;
mod font;
mod line;
mod path;
mod primitive;
mod rect;
mod stroke;
mod text;

pub use circle::Circle;
pub use font::{FontDefinition, FontFamily, FontPosture, FontWeight, TextHAlign, TextVAlign};
pub use line::Line;
pub use path::Path;
pub use primitive::{Primitive, circle, line, path, rect, text};
pub use rect::Rect;
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{Text, TextMetrics, measure_text};

pub(crate) use text::text_manager;
