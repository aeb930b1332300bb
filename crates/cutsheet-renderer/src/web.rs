//! Browser canvas backend (`web` feature).
//!
//! Forwards every call to a [`web_sys::CanvasRenderingContext2d`]. Calls the
//! browser can reject surface as [`RenderError::Backend`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::context::{DrawingContext, RenderError, Surface, TextAlign, TextBaseline};

fn js_err(e: JsValue) -> RenderError {
    RenderError::Backend(format!("{:?}", e))
}

impl DrawingContext for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        CanvasRenderingContext2d::set_text_align(self, align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        CanvasRenderingContext2d::set_text_baseline(self, baseline.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        CanvasRenderingContext2d::fill_text(self, text, x, y).map_err(js_err)
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        // The browser ignores an unmatched restore; nothing to report.
        CanvasRenderingContext2d::restore(self);
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), RenderError> {
        CanvasRenderingContext2d::translate(self, x, y).map_err(js_err)
    }

    fn rotate(&mut self, angle: f64) -> Result<(), RenderError> {
        CanvasRenderingContext2d::rotate(self, angle).map_err(js_err)
    }
}

/// An HTML `<canvas>` element together with its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// [`RenderError::NoContext`] if the element has no 2D context (e.g. it
    /// already handed out a WebGL one).
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or(RenderError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Context = CanvasRenderingContext2d;

    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    fn context(&mut self) -> Result<&mut CanvasRenderingContext2d, RenderError> {
        Ok(&mut self.ctx)
    }
}
