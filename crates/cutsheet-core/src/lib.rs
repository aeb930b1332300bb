//! # Cutsheet Core
//!
//! Data model for cutting sheets: the parts placed on a sheet, their
//! pixel-space geometry, and the render configuration (scale, colors,
//! fonts, label layout thresholds).
//!
//! This crate does no drawing; see `cutsheet-renderer` for that.

pub mod config;
pub mod geometry;
pub mod part;

pub use config::{ConfigError, FontSpec, LabelPlacement, LabelStyle, RenderConfig};
pub use geometry::{PixelRect, Point};
pub use part::{OptimizerResponse, Part, Sheet, SheetGroup, SheetSet};
