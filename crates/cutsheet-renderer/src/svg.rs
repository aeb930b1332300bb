//! SVG backend.
//!
//! Keeps a canvas-style state stack and turns each draw call into an SVG
//! element carrying its own transform, so the output looks the same as the
//! browser canvas without nested groups.

use crate::context::{DrawingContext, RenderError, Surface, TextAlign, TextBaseline};
use crate::transform::Affine;

#[derive(Debug, Clone)]
struct SvgState {
    fill_style: String,
    stroke_style: String,
    line_width: f64,
    font: String,
    text_align: TextAlign,
    text_baseline: TextBaseline,
    transform: Affine,
}

impl Default for SvgState {
    fn default() -> Self {
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

/// Drawing context that accumulates SVG elements.
#[derive(Debug, Clone)]
pub struct SvgContext {
    width: f64,
    height: f64,
    state: SvgState,
    state_stack: Vec<SvgState>,
    elements: Vec<String>,
}

impl SvgContext {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: SvgState::default(),
            state_stack: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn transform_attr(&self) -> String {
        let t = &self.state.transform;
        if t.is_identity() {
            String::new()
        } else {
            format!(
                " transform=\"matrix({} {} {} {} {} {})\"",
                fmt_num(t.a),
                fmt_num(t.b),
                fmt_num(t.c),
                fmt_num(t.d),
                fmt_num(t.e),
                fmt_num(t.f)
            )
        }
    }

    fn covers_viewport(&self, x: f64, y: f64, w: f64, h: f64) -> bool {
        self.state.transform.is_identity()
            && x <= 0.0
            && y <= 0.0
            && x + w >= self.width
            && y + h >= self.height
    }
}

impl DrawingContext for SvgContext {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if self.covers_viewport(x, y, w, h) {
            self.elements.clear();
            return;
        }
        // SVG has no erase; paint the region with the page background.
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#ffffff\"{}/>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h),
            self.transform_attr()
        ));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"{}/>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h),
            escape_xml(&self.state.fill_style),
            self.transform_attr()
        ));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h),
            escape_xml(&self.state.stroke_style),
            fmt_num(self.state.line_width),
            self.transform_attr()
        ));
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
        self.elements.push(format!(
            "<text x=\"{}\" y=\"{}\" fill=\"{}\" style=\"font: {}\" text-anchor=\"{}\" dominant-baseline=\"{}\"{}>{}</text>",
            fmt_num(x),
            fmt_num(y),
            escape_xml(&self.state.fill_style),
            escape_xml(&self.state.font),
            text_anchor(self.state.text_align),
            dominant_baseline(self.state.text_baseline),
            self.transform_attr(),
            escape_xml(text)
        ));
        Ok(())
    }

    fn save(&mut self) {
        self.state_stack.push(self.state.clone());
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        self.state = self
            .state_stack
            .pop()
            .ok_or(RenderError::UnbalancedRestore)?;
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), RenderError> {
        self.state.transform = self.state.transform.then_translate(x, y);
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> Result<(), RenderError> {
        self.state.transform = self.state.transform.then_rotate(angle);
        Ok(())
    }
}

/// A fixed-size SVG canvas.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    ctx: SvgContext,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            ctx: SvgContext::new(width, height),
        }
    }

    /// Serialize everything drawn so far as a standalone SVG document.
    pub fn finish(&self) -> String {
        let mut svg = String::new();
        let width = fmt_num(self.ctx.width);
        let height = fmt_num(self.ctx.height);
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        ));
        for element in &self.ctx.elements {
            svg.push_str("  ");
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    type Context = SvgContext;

    fn width(&self) -> f64 {
        self.ctx.width
    }

    fn height(&self) -> f64 {
        self.ctx.height
    }

    fn context(&mut self) -> Result<&mut SvgContext, RenderError> {
        Ok(&mut self.ctx)
    }
}

fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Center => "middle",
        TextAlign::End | TextAlign::Right => "end",
        TextAlign::Start | TextAlign::Left => "start",
    }
}

fn dominant_baseline(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "text-before-edge",
        TextBaseline::Hanging => "hanging",
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Ideographic => "ideographic",
        TextBaseline::Bottom => "text-after-edge",
    }
}

/// Round to 3 decimals and drop trailing zeros; never prints `-0`.
fn fmt_num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(80.0), "80");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(6.123e-17), "0");
        assert_eq!(fmt_num(-1e-9), "0");
        assert_eq!(fmt_num(-1.0), "-1");
    }

    #[test]
    fn test_full_clear_drops_elements() {
        let mut surface = SvgSurface::new(200.0, 100.0);
        let ctx = surface.context().unwrap();
        ctx.fill_rect(0.0, 0.0, 10.0, 10.0);
        ctx.clear_rect(0.0, 0.0, 200.0, 100.0);
        assert_eq!(ctx.element_count(), 0);

        ctx.fill_rect(0.0, 0.0, 10.0, 10.0);
        ctx.clear_rect(0.0, 0.0, 5.0, 5.0);
        assert_eq!(ctx.element_count(), 2);
    }

    #[test]
    fn test_text_is_escaped_and_transformed() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        let ctx = surface.context().unwrap();
        ctx.save();
        ctx.translate(50.0, 30.0).unwrap();
        ctx.rotate(-std::f64::consts::FRAC_PI_2).unwrap();
        ctx.set_text_align(TextAlign::Center);
        ctx.fill_text("A<B & \"C\"", 0.0, -6.0).unwrap();
        ctx.restore().unwrap();
        ctx.fill_text("plain", 1.0, 2.0).unwrap();

        let svg = surface.finish();
        assert!(svg.contains("A&lt;B &amp; &quot;C&quot;"));
        assert!(svg.contains("transform=\"matrix(0 -1 1 0 50 30)\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        // The second text is outside the saved scope.
        let plain = svg.lines().find(|l| l.contains(">plain<")).unwrap();
        assert!(!plain.contains("transform="));
    }
}
