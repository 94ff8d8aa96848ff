//! Font description shared by text nodes, metrics providers and surfaces

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric font weight (CSS scale, 100-900)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Size, weight and family of a run of text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Font size in pixels
    pub size: f32,
    pub weight: FontWeight,
    pub family: String,
}

impl FontSpec {
    pub fn new(size: f32, weight: FontWeight, family: impl Into<String>) -> Self {
        Self {
            size,
            weight,
            family: family.into(),
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size: 16.0,
            weight: FontWeight::NORMAL,
            family: "sans-serif".to_string(),
        }
    }
}

/// Renders the CSS shorthand, e.g. `400 16px sans-serif`
impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px {}", self.weight.0, self.size, self.family)
    }
}
