//! # Cutsheet Renderer
//!
//! Paints cutting sheets onto 2D drawing surfaces: a filled and stroked slab
//! per part, labeled with its name and dimensions. Narrow, tall parts get
//! their label rotated 90° counter-clockwise; parts too small for text stay
//! unlabeled.
//!
//! The renderer targets the [`DrawingContext`] / [`Surface`] traits. Backends:
//! - [`RecordingSurface`]: records calls as serializable [`DrawCommand`]s.
//! - [`SvgSurface`]: writes a standalone SVG document.
//! - `CanvasSurface` (feature `web`): an HTML canvas through `web-sys`.

pub mod context;
pub mod guard;
pub mod recording;
pub mod sheet;
pub mod svg;
pub mod transform;
#[cfg(feature = "web")]
pub mod web;

pub use context::{DrawingContext, RenderError, Surface, TextAlign, TextBaseline};
pub use guard::StateGuard;
pub use recording::{DrawCommand, RecordingContext, RecordingSurface};
pub use sheet::{draw_sheet, SheetRenderer};
pub use svg::{SvgContext, SvgSurface};
pub use transform::Affine;
#[cfg(feature = "web")]
pub use web::CanvasSurface;
