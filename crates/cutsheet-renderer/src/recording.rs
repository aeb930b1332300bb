//! A drawing backend that records every call instead of painting.
//!
//! Draw commands carry the resolved graphics state at the time of the call
//! (colors, font, transform), so a recording can be asserted on directly or
//! shipped to a frontend as JSON.

use serde::{Deserialize, Serialize};

use cutsheet_core::PixelRect;

use crate::context::{DrawingContext, RenderError, Surface, TextAlign, TextBaseline};
use crate::transform::Affine;

/// A single recorded call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        rect: PixelRect,
    },
    FillRect {
        rect: PixelRect,
        color: String,
        transform: Affine,
    },
    StrokeRect {
        rect: PixelRect,
        color: String,
        line_width: f64,
        transform: Affine,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        font: String,
        color: String,
        align: TextAlign,
        baseline: TextBaseline,
        transform: Affine,
    },
    Save,
    Restore,
    Translate {
        x: f64,
        y: f64,
    },
    Rotate {
        angle: f64,
    },
}

impl DrawCommand {
    /// True for calls that change pixels.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCommand::Clear { .. }
                | DrawCommand::FillRect { .. }
                | DrawCommand::StrokeRect { .. }
                | DrawCommand::FillText { .. }
        )
    }
}

#[derive(Debug, Clone)]
struct RecordedState {
    fill_style: String,
    stroke_style: String,
    line_width: f64,
    font: String,
    text_align: TextAlign,
    text_baseline: TextBaseline,
    transform: Affine,
}

impl Default for RecordedState {
    fn default() -> Self {
        // Canvas defaults.
        Self {
            fill_style: "#000000".to_string(),
            stroke_style: "#000000".to_string(),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            transform: Affine::IDENTITY,
        }
    }
}

/// Records calls with the same state semantics as a canvas context.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    state: RecordedState,
    state_stack: Vec<RecordedState>,
    commands: Vec<DrawCommand>,
}

impl RecordingContext {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of pixel-changing calls (clears, fills, strokes, text).
    pub fn draw_call_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// Current `save()` nesting depth.
    pub fn depth(&self) -> usize {
        self.state_stack.len()
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }
}

impl DrawingContext for RecordingContext {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::Clear {
            rect: PixelRect::new(x, y, w, h),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::FillRect {
            rect: PixelRect::new(x, y, w, h),
            color: self.state.fill_style.clone(),
            transform: self.state.transform,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect: PixelRect::new(x, y, w, h),
            color: self.state.stroke_style.clone(),
            line_width: self.state.line_width,
            transform: self.state.transform,
        });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.fill_style = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.stroke_style = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font: self.state.font.clone(),
            color: self.state.fill_style.clone(),
            align: self.state.text_align,
            baseline: self.state.text_baseline,
            transform: self.state.transform,
        });
        Ok(())
    }

    fn save(&mut self) {
        self.state_stack.push(self.state.clone());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        let state = self
            .state_stack
            .pop()
            .ok_or(RenderError::UnbalancedRestore)?;
        self.state = state;
        self.commands.push(DrawCommand::Restore);
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), RenderError> {
        self.state.transform = self.state.transform.then_translate(x, y);
        self.commands.push(DrawCommand::Translate { x, y });
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> Result<(), RenderError> {
        self.state.transform = self.state.transform.then_rotate(angle);
        self.commands.push(DrawCommand::Rotate { angle });
        Ok(())
    }
}

/// An in-memory surface backed by a [`RecordingContext`].
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ctx: Option<RecordingContext>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ctx: Some(RecordingContext::default()),
        }
    }

    /// A surface that refuses to hand out a context, like a canvas whose
    /// 2D context is unavailable.
    pub fn without_context(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ctx: None,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        match &self.ctx {
            Some(ctx) => ctx.commands(),
            None => &[],
        }
    }

    pub fn draw_call_count(&self) -> usize {
        self.ctx.as_ref().map_or(0, RecordingContext::draw_call_count)
    }

    /// All `fill_text` calls, in order.
    pub fn texts(&self) -> Vec<&DrawCommand> {
        self.commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillText { .. }))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.commands())
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn context(&mut self) -> Result<&mut RecordingContext, RenderError> {
        self.ctx.as_mut().ok_or(RenderError::NoContext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbalanced_restore_is_an_error() {
        let mut ctx = RecordingContext::default();
        assert!(matches!(ctx.restore(), Err(RenderError::UnbalancedRestore)));
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_restore_brings_back_styles() {
        let mut ctx = RecordingContext::default();
        ctx.set_fill_style("red");
        ctx.save();
        ctx.set_fill_style("blue");
        ctx.rotate(1.0).unwrap();
        ctx.restore().unwrap();
        ctx.fill_rect(0.0, 0.0, 1.0, 1.0);

        match ctx.commands().last() {
            Some(DrawCommand::FillRect { color, transform, .. }) => {
                assert_eq!(color, "red");
                assert!(transform.is_identity());
            }
            other => panic!("expected FillRect, got {:?}", other),
        }
    }

    #[test]
    fn test_draw_call_count_ignores_state_calls() {
        let mut ctx = RecordingContext::default();
        ctx.save();
        ctx.translate(1.0, 2.0).unwrap();
        ctx.fill_text("x", 0.0, 0.0).unwrap();
        ctx.restore().unwrap();
        assert_eq!(ctx.commands().len(), 4);
        assert_eq!(ctx.draw_call_count(), 1);
    }

    #[test]
    fn test_json_command_stream() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.context().unwrap().clear_rect(0.0, 0.0, 100.0, 100.0);
        let json = surface.to_json().unwrap();
        assert!(json.contains("\"op\": \"clear\""));
    }

    #[test]
    fn test_surface_without_context() {
        let mut surface = RecordingSurface::without_context(10.0, 10.0);
        assert!(matches!(surface.context(), Err(RenderError::NoContext)));
        assert_eq!(surface.draw_call_count(), 0);
    }
}
