//! The drawing abstraction the sheet renderer targets.
//!
//! [`DrawingContext`] mirrors the subset of the HTML canvas 2D API the
//! renderer needs. [`Surface`] is the thing a context is obtained from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("surface has no 2D drawing context")]
    NoContext,

    #[error("drawing backend error: {0}")]
    Backend(String),

    #[error("restore() called without a matching save()")]
    UnbalancedRestore,
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

impl TextAlign {
    /// Canvas `textAlign` keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::End => "end",
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    /// Canvas `textBaseline` keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Ideographic => "ideographic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

/// Immediate-mode 2D drawing commands.
///
/// Style setters and rect operations cannot fail on any backend we target;
/// text and transform calls can (the browser reports them as exceptions).
pub trait DrawingContext {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError>;

    /// Push the full graphics state (styles and transform).
    fn save(&mut self);
    /// Pop the state pushed by the matching [`save`](Self::save).
    fn restore(&mut self) -> Result<(), RenderError>;
    fn translate(&mut self, x: f64, y: f64) -> Result<(), RenderError>;
    /// Rotate by `angle` radians; positive is clockwise in screen space.
    fn rotate(&mut self, angle: f64) -> Result<(), RenderError>;
}

/// A drawing target with a pixel size and a 2D context.
pub trait Surface {
    type Context: DrawingContext;

    /// Width in pixels.
    fn width(&self) -> f64;
    /// Height in pixels.
    fn height(&self) -> f64;
    fn context(&mut self) -> Result<&mut Self::Context, RenderError>;
}
