//! Scene configuration (mesh2d.toml)

use mesh2d_paint::FontSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{non_negative, positive, LayoutError, Result};

/// Top-level scene configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SceneConfig {
    /// Initial value of the scene's default measure
    #[serde(default = "default_unit_measure")]
    pub unit_measure: f32,
    /// Pixels added below text whenever its font size changes
    #[serde(default = "default_text_pad")]
    pub text_pad: f32,
    /// Advance of one glyph, as a fraction of the font size, used by the
    /// built-in monospace metrics
    #[serde(default = "default_glyph_advance")]
    pub glyph_advance: f32,
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Font given to text nodes that do not pick one
    #[serde(default)]
    pub default_font: FontSpec,
}

/// Size of the drawing surface used for surface-relative alignment
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct SurfaceConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    800.0
}

fn default_height() -> f32 {
    600.0
}

fn default_unit_measure() -> f32 {
    1.0
}

fn default_text_pad() -> f32 {
    2.0
}

fn default_glyph_advance() -> f32 {
    0.6
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            unit_measure: default_unit_measure(),
            text_pad: default_text_pad(),
            glyph_advance: default_glyph_advance(),
            surface: SurfaceConfig::default(),
            default_font: FontSpec::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or from `mesh2d.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("mesh2d.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path)?;
        tracing::debug!(path = %config_path.display(), "loaded scene config");
        Self::from_toml_str(&content)
    }

    /// Reject values no scene can be built from
    pub fn validate(&self) -> Result<()> {
        non_negative("surface.width", self.surface.width)?;
        non_negative("surface.height", self.surface.height)?;
        if !self.unit_measure.is_finite() {
            return Err(LayoutError::InvalidValue {
                field: "unit_measure",
                value: self.unit_measure,
            });
        }
        positive("default_font.size", self.default_font.size)?;
        non_negative("text_pad", self.text_pad)?;
        positive("glyph_advance", self.glyph_advance)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.text_pad, 2.0);
        assert_eq!(config.default_font.size, 16.0);
    }

    #[test]
    fn test_partial_document() {
        let config = SceneConfig::from_toml_str(
            r#"
            unit_measure = 12.5

            [surface]
            width = 1024

            [default_font]
            size = 20
            family = "monospace"
            "#,
        )
        .unwrap();

        assert_eq!(config.unit_measure, 12.5);
        assert_eq!(config.surface.width, 1024.0);
        assert_eq!(config.surface.height, 600.0);
        assert_eq!(config.default_font.size, 20.0);
        assert_eq!(config.default_font.family, "monospace");
        assert_eq!(config.default_font.weight.0, 400);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = SceneConfig::from_toml_str("glyph_advance = 0").unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidValue {
                field: "glyph_advance",
                ..
            }
        ));

        let err = SceneConfig::from_toml_str("unit_measure = \"big\"").unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = SceneConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
    }
}
