//! Collage Core Types and Drawing Surfaces
//!
//! This crate provides the drawing vocabulary that Collage scenes are made of.
//! It includes:
//!
//! - **Colors**: CSS color parsing and conversion ([`color::Color`])
//! - **Geometry**: Points, sizes, affine matrices and Bézier paths ([`geometry`] module)
//! - **Draw**: The closed set of drawable primitives and their styling ([`draw`] module)
//! - **Surfaces**: The [`surface::Surface`] drawing abstraction with raster,
//!   SVG and recording implementations ([`surface`] module)
//! - **Images**: Owned RGBA raster images ([`image::Image`])

pub mod color;
pub mod draw;
pub mod geometry;
pub mod image;
pub mod surface;
