//! Text nodes and the text metrics boundary
//!
//! A text node is painted with its baseline at the node's `y`, so its box
//! grows downward from a baseline-relative origin. Changing the font size
//! shifts the pixel `y` offset by the height delta plus a fixed pad to keep
//! the visual top in place.

use mesh2d_core::Placement;
use mesh2d_paint::{Color, FontSpec};

/// Host service reporting the rendered width of a string
pub trait TextMetrics {
    /// Rendered width of `text` in pixels at `font`
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Metrics for hosts without a text engine: every glyph advances by a fixed
/// fraction of the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    advance: f32,
}

impl MonospaceMetrics {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.advance
    }
}

impl<F> TextMetrics for F
where
    F: Fn(&str, &FontSpec) -> f32,
{
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        self(text, font)
    }
}

/// Text-specific state of a text node
#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    pub(crate) text: String,
    pub(crate) font: FontSpec,
    pub(crate) color: Color,
    /// Wrap width; `None` means the measured width of the whole string
    pub(crate) fixed_width: Option<f32>,
    /// Companion background rectangle, replaying every move of the node
    pub(crate) background: Placement,
}

impl TextShape {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn fixed_width(&self) -> Option<f32> {
        self.fixed_width
    }

    pub fn background(&self) -> &Placement {
        &self.background
    }

    pub fn width(&self, metrics: &dyn TextMetrics) -> f32 {
        match self.fixed_width {
            Some(width) => width,
            None => metrics.measure(&self.text, &self.font),
        }
    }

    pub fn line_count(&self, metrics: &dyn TextMetrics) -> u32 {
        self.line_count_at(metrics, self.font.size)
    }

    /// `line_count * font_size`
    pub fn height(&self, metrics: &dyn TextMetrics) -> f32 {
        self.line_count(metrics) as f32 * self.font.size
    }

    /// Lines needed to lay the text out at `size`: the measured width over
    /// the box width, rounded up, and never less than one.
    pub(crate) fn line_count_at(&self, metrics: &dyn TextMetrics, size: f32) -> u32 {
        let font = self.font.clone().with_size(size);
        let measured = metrics.measure(&self.text, &font);
        let width = self.fixed_width.unwrap_or(measured);
        if width <= 0.0 || measured <= 0.0 {
            return 1;
        }
        ((measured / width).ceil() as u32).max(1)
    }

    /// Pixel shift of `y` that keeps the visual top anchored when the font
    /// size goes from `old_size` to `new_size`
    pub(crate) fn baseline_correction(
        &self,
        metrics: &dyn TextMetrics,
        old_size: f32,
        new_size: f32,
        pad: f32,
    ) -> f32 {
        let old_lines = self.line_count_at(metrics, old_size) as f32;
        let new_lines = self.line_count_at(metrics, new_size) as f32;
        new_lines * new_size - old_lines * old_size + pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh2d_core::MeasureGraph;

    fn shape(text: &str, size: f32, fixed_width: Option<f32>) -> TextShape {
        let mut graph = MeasureGraph::new();
        TextShape {
            text: text.to_string(),
            font: FontSpec::default().with_size(size),
            color: Color::BLACK,
            fixed_width,
            background: Placement::new(graph.create_unit()),
        }
    }

    /// 10 pixels per character at 16px, scaling with the font size
    fn ten_per_char(text: &str, font: &FontSpec) -> f32 {
        text.len() as f32 * 10.0 * font.size / 16.0
    }

    #[test]
    fn test_auto_width_is_single_line() {
        let metrics = ten_per_char;
        let text = shape("hello", 16.0, None);

        assert_eq!(text.width(&metrics), 50.0);
        assert_eq!(text.line_count(&metrics), 1);
        assert_eq!(text.height(&metrics), 16.0);
    }

    #[test]
    fn test_fixed_width_wraps() {
        let metrics = ten_per_char;
        let text = shape("hello world", 16.0, Some(40.0));

        assert_eq!(text.width(&metrics), 40.0);
        // 110 / 40 -> 3 lines
        assert_eq!(text.line_count(&metrics), 3);
        assert_eq!(text.height(&metrics), 48.0);
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let metrics = ten_per_char;
        let text = shape("", 16.0, None);
        assert_eq!(text.line_count(&metrics), 1);
    }

    #[test]
    fn test_baseline_correction() {
        let metrics = ten_per_char;

        let single = shape("abc", 16.0, None);
        assert_eq!(single.baseline_correction(&metrics, 16.0, 32.0, 2.0), 18.0);

        // 40 px at 16, 80 px at 32 in a 50 px box: 1 line then 2 lines
        let wrapped = shape("abcd", 16.0, Some(50.0));
        assert_eq!(wrapped.line_count_at(&metrics, 16.0), 1);
        assert_eq!(wrapped.line_count_at(&metrics, 32.0), 2);
        assert_eq!(
            wrapped.baseline_correction(&metrics, 16.0, 32.0, 2.0),
            2.0 * 32.0 - 16.0 + 2.0
        );
    }

    #[test]
    fn test_monospace_metrics() {
        let metrics = MonospaceMetrics::new(0.5);
        let font = FontSpec::default().with_size(20.0);
        assert_eq!(metrics.measure("abcd", &font), 40.0);
    }
}
