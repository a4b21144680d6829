//! Turning a projected document into pixels.

pub mod clip;
pub mod compositor;
pub mod export;
pub mod surface;

pub use clip::ClipWindow;
pub use compositor::{Diagnostic, LayerCompositor, RenderDiagnostics, LAYER_ORDER};
pub use export::{plan_export, write_image, ExportPlan, ImageFormat};
pub use surface::{FillRule, Outline, PathCommand, RasterSurface, RenderSurface};

use crate::data::document::Document;
use crate::errors::Result;
use crate::style::StyleConfig;

/// Renders `document` onto a fresh offscreen surface of the document's canvas size.
pub fn render_raster(
    document: &Document,
    config: &StyleConfig,
    scale: f64,
) -> Result<(RasterSurface, RenderDiagnostics)> {
    let projector = document.projector();
    let mut surface = RasterSurface::new(
        projector.width().round() as u32,
        projector.height().round() as u32,
    )?;
    let report = LayerCompositor::new(document, config)
        .with_scale(scale as f32)
        .render(&mut surface);
    Ok((surface, report))
}
