//! The drawing surface contract

use crate::color::Color;
use crate::font::FontSpec;
use crate::primitives::{CornerRadius, ImageSource, Point, Rect};

/// A host drawing surface (an HTML canvas, a GPU frame, a test recorder).
///
/// Coordinates are surface-local pixels with the origin at the top-left
/// corner. The layout engine issues exactly one drawing call per painted
/// node; everything else about rasterization is the surface's business.
pub trait DrawSurface {
    /// Surface width in pixels
    fn width(&self) -> f32;

    /// Surface height in pixels
    fn height(&self) -> f32;

    /// Erase every pixel
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color);

    fn stroke_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color, line_width: f32);

    fn draw_image(&mut self, image: &ImageSource, rect: Rect);

    /// Draw `text` with its baseline (bottom) anchored at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, font: &FontSpec, color: Color);
}
