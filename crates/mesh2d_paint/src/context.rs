//! Paint context - a drawing surface that records commands

use crate::color::Color;
use crate::font::FontSpec;
use crate::primitives::{CornerRadius, ImageSource, Point, Rect};
use crate::surface::DrawSurface;

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    Clear,
    FillRect {
        rect: Rect,
        radius: CornerRadius,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        radius: CornerRadius,
        color: Color,
        line_width: f32,
    },
    DrawImage {
        image: ImageSource,
        rect: Rect,
    },
    DrawText {
        text: String,
        position: Point,
        font: String,
        color: Color,
    },
}

/// Records every drawing call so a host renderer can replay it later.
///
/// `clear` drops everything recorded so far and records a single
/// [`PaintCommand::Clear`], so the command list always describes exactly one
/// frame.
#[derive(Debug)]
pub struct PaintContext {
    width: f32,
    height: f32,
    commands: Vec<PaintCommand>,
}

impl PaintContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl DrawSurface for PaintContext {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        tracing::trace!(dropped = self.commands.len(), "paint context cleared");
        self.commands.clear();
        self.commands.push(PaintCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        self.commands.push(PaintCommand::FillRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color, line_width: f32) {
        self.commands.push(PaintCommand::StrokeRect {
            rect,
            radius,
            color,
            line_width,
        });
    }

    fn draw_image(&mut self, image: &ImageSource, rect: Rect) {
        self.commands.push(PaintCommand::DrawImage {
            image: image.clone(),
            rect,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: &FontSpec, color: Color) {
        self.commands.push(PaintCommand::DrawText {
            text: text.to_string(),
            position: origin,
            font: font.to_string(),
            color,
        });
    }
}
