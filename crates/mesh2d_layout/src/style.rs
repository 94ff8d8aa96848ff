//! Visual attributes and extents shared by every shape

use mesh2d_core::{MeasureGraph, MeasureId};
use mesh2d_paint::{Color, CornerRadius};

use crate::error::{non_negative, Result};

/// A width or height: a literal pixel value or the live value of a measure
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extent {
    Fixed(f32),
    Measure(MeasureId),
}

impl Extent {
    pub fn resolve(&self, graph: &MeasureGraph) -> Result<f32> {
        match *self {
            Extent::Fixed(value) => Ok(value),
            Extent::Measure(id) => Ok(graph.value(id)?),
        }
    }

    pub fn measure(&self) -> Option<MeasureId> {
        match *self {
            Extent::Fixed(_) => None,
            Extent::Measure(id) => Some(id),
        }
    }

    pub(crate) fn validate(self, field: &'static str, graph: &MeasureGraph) -> Result<Self> {
        match self {
            Extent::Fixed(value) => {
                non_negative(field, value)?;
            }
            Extent::Measure(id) => {
                graph.value(id)?;
            }
        }
        Ok(self)
    }
}

impl Default for Extent {
    fn default() -> Self {
        Extent::Fixed(0.0)
    }
}

impl From<f32> for Extent {
    fn from(value: f32) -> Self {
        Extent::Fixed(value)
    }
}

impl From<MeasureId> for Extent {
    fn from(id: MeasureId) -> Self {
        Extent::Measure(id)
    }
}

/// Width and height of a box-shaped node
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxSize {
    pub width: Extent,
    pub height: Extent,
}

impl BoxSize {
    pub fn new(width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }
}

/// Fill mode, background, line width, visibility and stacking of a shape
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Filled shapes paint their background; unfilled ones stroke their
    /// outline in the background color
    pub fill: bool,
    pub hidden: bool,
    pub background: Color,
    pub corner_radius: CornerRadius,
    /// Higher values win when interactive nodes overlap
    pub z_index: i32,
    line_width: f32,
}

impl ShapeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Set the stroke width. Negative and non-finite widths are rejected and
    /// the previous width is kept.
    pub fn set_line_width(&mut self, width: f32) -> Result<()> {
        match non_negative("line_width", width) {
            Ok(width) => {
                self.line_width = width;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(width, "rejected line width; keeping {}", self.line_width);
                Err(err)
            }
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_corner_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.corner_radius = radius.into();
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: true,
            hidden: false,
            background: Color::TRANSPARENT,
            corner_radius: CornerRadius::ZERO,
            z_index: 1,
            line_width: 1.0,
        }
    }
}
