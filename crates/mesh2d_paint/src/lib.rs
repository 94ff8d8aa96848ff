//! mesh2d Paint API
//!
//! The drawing boundary of the layout engine. The engine never rasterizes
//! anything itself: it resolves node coordinates and hands one drawing
//! operation per node to a [`DrawSurface`].
//!
//! # Contents
//!
//! - [`DrawSurface`]: the host drawing surface contract
//! - [`PaintContext`]: a surface that records [`PaintCommand`]s
//! - Colors, rectangles, corner radii, fonts and image handles

pub mod color;
pub mod context;
pub mod font;
pub mod primitives;
pub mod surface;

pub use color::Color;
pub use context::{PaintCommand, PaintContext};
pub use font::{FontSpec, FontWeight};
pub use primitives::{CornerRadius, ImageSource, Point, Rect};
pub use surface::DrawSurface;
