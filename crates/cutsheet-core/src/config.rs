//! Render configuration: scale, colors, fonts and the label layout thresholds.
//!
//! All values that used to be baked into the drawing routine live here so
//! that callers and tests can override them. [`RenderConfig::default`] is the
//! canonical rotation-aware layout; [`RenderConfig::legacy`] is the older
//! upright-only layout with larger visibility thresholds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::PixelRect;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("stroke width must be non-negative and finite, got {0}")]
    InvalidStrokeWidth(f64),

    #[error("font size for {which} must be positive, got {size}")]
    InvalidFontSize { which: &'static str, size: f64 },

    #[error("threshold {name} must be non-negative and finite, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid render config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Font size and weight. The family is shared and comes from [`RenderConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: f64,
    #[serde(default)]
    pub bold: bool,
}

impl FontSpec {
    pub fn regular(size_px: f64) -> Self {
        Self {
            size_px,
            bold: false,
        }
    }

    pub fn bold(size_px: f64) -> Self {
        Self {
            size_px,
            bold: true,
        }
    }

    /// CSS font shorthand, e.g. `"bold 11px Arial"`.
    pub fn css(&self, family: &str) -> String {
        if self.bold {
            format!("bold {}px {}", self.size_px, family)
        } else {
            format!("{}px {}", self.size_px, family)
        }
    }
}

/// Fonts and vertical offsets for the two text lines of a label.
///
/// Offsets are added to the y of the anchor point: the rectangle center for
/// upright labels, the rotation pivot for rotated ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub label_font: FontSpec,
    pub dims_font: FontSpec,
    pub label_offset: f64,
    pub dims_offset: f64,
}

impl LabelStyle {
    pub fn upright() -> Self {
        Self {
            label_font: FontSpec::bold(11.0),
            dims_font: FontSpec::regular(10.0),
            label_offset: -5.0,
            dims_offset: 10.0,
        }
    }

    pub fn rotated() -> Self {
        Self {
            label_font: FontSpec::bold(10.0),
            dims_font: FontSpec::regular(9.0),
            label_offset: -6.0,
            dims_offset: 8.0,
        }
    }
}

/// When to turn a label 90° counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationPolicy {
    pub enabled: bool,
    /// Rotate when the pixel width is below this and the part is taller than wide.
    pub max_width: f64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_width: 40.0,
        }
    }
}

/// Minimum pixel size for an upright label. Both sides must strictly exceed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityThreshold {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for VisibilityThreshold {
    fn default() -> Self {
        Self {
            min_width: 20.0,
            min_height: 15.0,
        }
    }
}

/// How the label of a single part is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelPlacement {
    Rotated,
    Upright,
    Hidden,
}

/// Everything the sheet renderer needs besides the parts themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per source unit.
    pub scale: f64,
    pub slab_fill: String,
    pub slab_stroke: String,
    pub stroke_width: f64,
    pub text_color: String,
    pub font_family: String,
    /// Appended to every dimension string.
    pub unit_suffix: String,
    pub upright: LabelStyle,
    pub rotated: LabelStyle,
    pub rotation: RotationPolicy,
    pub visibility: VisibilityThreshold,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            slab_fill: "#d2b48c".to_string(),
            slab_stroke: "#5d4037".to_string(),
            stroke_width: 1.5,
            text_color: "black".to_string(),
            font_family: "Arial".to_string(),
            unit_suffix: " cm".to_string(),
            upright: LabelStyle::upright(),
            rotated: LabelStyle::rotated(),
            rotation: RotationPolicy::default(),
            visibility: VisibilityThreshold::default(),
        }
    }
}

impl RenderConfig {
    /// The upright-only layout: no rotation and labels only on parts larger
    /// than 50 × 30 px.
    pub fn legacy() -> Self {
        Self {
            rotation: RotationPolicy {
                enabled: false,
                ..RotationPolicy::default()
            },
            visibility: VisibilityThreshold {
                min_width: 50.0,
                min_height: 30.0,
            },
            ..Self::default()
        }
    }

    /// Parse a config, filling missing fields with defaults, and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "Loaded render config: scale={}, rotation={}",
            config.scale,
            config.rotation.enabled
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }

        for (name, value) in [
            ("slab_fill", &self.slab_fill),
            ("slab_stroke", &self.slab_stroke),
            ("text_color", &self.text_color),
            ("font_family", &self.font_family),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }

        for (which, font) in [
            ("upright label", self.upright.label_font),
            ("upright dims", self.upright.dims_font),
            ("rotated label", self.rotated.label_font),
            ("rotated dims", self.rotated.dims_font),
        ] {
            if !(font.size_px.is_finite() && font.size_px > 0.0) {
                return Err(ConfigError::InvalidFontSize {
                    which,
                    size: font.size_px,
                });
            }
        }

        for (name, value) in [
            ("rotation.max_width", self.rotation.max_width),
            ("visibility.min_width", self.visibility.min_width),
            ("visibility.min_height", self.visibility.min_height),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        Ok(())
    }

    /// Decide the label layout for a part already mapped to pixels.
    ///
    /// Rotation wins over the visibility threshold: a narrow, tall part gets a
    /// rotated label whatever its size.
    pub fn placement(&self, rect: &PixelRect) -> LabelPlacement {
        if self.rotation.enabled && rect.is_narrow_and_tall(self.rotation.max_width) {
            LabelPlacement::Rotated
        } else if rect.exceeds(self.visibility.min_width, self.visibility.min_height) {
            LabelPlacement::Upright
        } else {
            LabelPlacement::Hidden
        }
    }

    /// Dimension text as drawn, with the unit suffix.
    pub fn dims_text(&self, dims: &str) -> String {
        format!("{}{}", dims, self.unit_suffix)
    }
}
