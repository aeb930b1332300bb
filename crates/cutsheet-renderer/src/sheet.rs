//! Sheet rendering: one slab per part plus its label.
//!
//! Parts are painted in slice order, so later parts cover earlier ones where
//! they overlap. Each part's text is drawn inside a [`StateGuard`], which
//! keeps the rotation used for narrow parts from leaking into the next part.

use std::f64::consts::FRAC_PI_2;

use cutsheet_core::{
    ConfigError, LabelPlacement, LabelStyle, Part, PixelRect, Point, RenderConfig, Sheet,
};

use crate::context::{DrawingContext, RenderError, Surface, TextAlign, TextBaseline};
use crate::guard::StateGuard;

/// Per-render tally, logged at debug level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PlacementTally {
    rotated: usize,
    upright: usize,
    hidden: usize,
}

impl PlacementTally {
    fn record(&mut self, placement: LabelPlacement) {
        match placement {
            LabelPlacement::Rotated => self.rotated += 1,
            LabelPlacement::Upright => self.upright += 1,
            LabelPlacement::Hidden => self.hidden += 1,
        }
    }
}

/// Paints parts onto a [`Surface`] according to a [`RenderConfig`].
#[derive(Debug, Clone, Default)]
pub struct SheetRenderer {
    config: RenderConfig,
}

impl SheetRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Clear the surface and draw every part in order.
    ///
    /// An empty `parts` slice is not an error: a warning is logged and the
    /// surface is left untouched (no context is even acquired).
    ///
    /// # Errors
    ///
    /// Only backend failures: the surface has no context, or the context
    /// rejected a text or transform call.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        parts: &[Part],
    ) -> Result<(), RenderError> {
        if parts.is_empty() {
            log::warn!("No parts to draw");
            return Ok(());
        }

        let width = surface.width();
        let height = surface.height();
        let ctx = surface.context()?;
        ctx.clear_rect(0.0, 0.0, width, height);

        let mut tally = PlacementTally::default();
        for (index, part) in parts.iter().enumerate() {
            let placement = self.draw_part(ctx, part)?;
            log::trace!("Part {} ({}): {:?}", index, part.label, placement);
            tally.record(placement);
        }

        log::debug!(
            "Rendered {} parts on {}x{} surface: {} rotated, {} upright, {} unlabeled",
            parts.len(),
            width,
            height,
            tally.rotated,
            tally.upright,
            tally.hidden
        );
        Ok(())
    }

    pub fn render_sheet<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        sheet: &Sheet,
    ) -> Result<(), RenderError> {
        self.render(surface, &sheet.parts)
    }

    fn draw_part<C: DrawingContext + ?Sized>(
        &self,
        ctx: &mut C,
        part: &Part,
    ) -> Result<LabelPlacement, RenderError> {
        let config = &self.config;
        let rect = PixelRect::from_part(part, config.scale);

        ctx.set_fill_style(&config.slab_fill);
        ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
        ctx.set_stroke_style(&config.slab_stroke);
        ctx.set_line_width(config.stroke_width);
        ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);

        let center = rect.center();
        let placement = config.placement(&rect);

        let mut scoped = StateGuard::new(ctx);
        scoped.set_fill_style(&config.text_color);
        scoped.set_text_align(TextAlign::Center);
        scoped.set_text_baseline(TextBaseline::Middle);

        match placement {
            LabelPlacement::Rotated => {
                scoped.translate(center.x, center.y)?;
                scoped.rotate(-FRAC_PI_2)?;
                self.draw_label(&mut *scoped, part, &config.rotated, Point::new(0.0, 0.0))?;
            }
            LabelPlacement::Upright => {
                self.draw_label(&mut *scoped, part, &config.upright, center)?;
            }
            LabelPlacement::Hidden => {}
        }

        Ok(placement)
    }

    fn draw_label<C: DrawingContext + ?Sized>(
        &self,
        ctx: &mut C,
        part: &Part,
        style: &LabelStyle,
        anchor: Point,
    ) -> Result<(), RenderError> {
        let family = &self.config.font_family;

        ctx.set_font(&style.label_font.css(family));
        ctx.fill_text(&part.label, anchor.x, anchor.y + style.label_offset)?;

        ctx.set_font(&style.dims_font.css(family));
        ctx.fill_text(
            &self.config.dims_text(&part.dims),
            anchor.x,
            anchor.y + style.dims_offset,
        )
    }
}

/// Render `parts` with the default configuration.
pub fn draw_sheet<S: Surface + ?Sized>(surface: &mut S, parts: &[Part]) -> Result<(), RenderError> {
    SheetRenderer::default().render(surface, parts)
}
