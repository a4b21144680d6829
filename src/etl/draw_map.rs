use std::path::PathBuf;

use log::{info, warn};

use super::parse_osm::read_osm_file;
use super::Etl;
use crate::config::RenderJob;
use crate::data::document::Document;
use crate::data::OsmMapData;
use crate::errors::Result;
use crate::render::{self, plan_export, RasterSurface, RenderDiagnostics, RenderSurface};
use crate::style::{JsonFileStore, StyleConfig, StyleStore};

pub const ETL_NAME: &str = "draw_map";

pub struct Rendered {
    surface: RasterSurface,
    document: Document,
    config: StyleConfig,
    diagnostics: RenderDiagnostics,
}

/// What a finished render left on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub image: PathBuf,
    pub snapshot: PathBuf,
    pub width: u32,
    pub height: u32,
    pub diagnostics: RenderDiagnostics,
}

/// Parses an extract, renders it, writes the image and a copy of the styles used.
pub struct DrawMapEtl<'a> {
    job: &'a RenderJob,
    store: &'a mut dyn StyleStore,
}

impl<'a> DrawMapEtl<'a> {
    pub fn new(job: &'a RenderJob, store: &'a mut dyn StyleStore) -> DrawMapEtl<'a> {
        DrawMapEtl { job, store }
    }

    /// Builds the document to draw and the stroke scale that goes with it.
    ///
    /// Exports get their own document at the planned size rather than a resampled preview.
    fn target_document(&self, data: &OsmMapData) -> Result<(Document, f64)> {
        let preview = Document::build(data, self.job.width, self.job.height)?;
        let Some(max_dim) = self.job.max_dim else {
            return Ok((preview, 1.0));
        };

        let plan = plan_export(preview.projector(), max_dim)?;
        info!(width = plan.width, height = plan.height, scale = plan.scale; "Planned export");
        let document = Document::build(data, plan.width.into(), plan.height.into())?;
        Ok((document, plan.scale))
    }
}

impl Etl for DrawMapEtl<'_> {
    type Input = OsmMapData;
    type Transformed = Rendered;
    type Output = RenderOutcome;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn extract(&mut self) -> Result<Self::Input> {
        read_osm_file(&self.job.input)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Transformed> {
        let config = self.store.read()?;
        let (document, scale) = self.target_document(&input)?;
        let (surface, diagnostics) = render::render_raster(&document, &config, scale)?;

        if !diagnostics.is_clean() {
            warn!(
                etl_name = ETL_NAME,
                skipped = diagnostics.diagnostics.len();
                "Some features were skipped"
            );
        }
        info!(
            etl_name = ETL_NAME,
            ways = diagnostics.ways_drawn,
            relations = diagnostics.relations_drawn;
            "Rendered map"
        );

        Ok(Rendered {
            surface,
            document,
            config,
            diagnostics,
        })
    }

    fn load(&mut self, rendered: Self::Transformed) -> Result<Self::Output> {
        render::write_image(&rendered.surface, &self.job.output, &rendered.document)?;

        let snapshot = self.job.snapshot_path();
        JsonFileStore::new(&snapshot).write(&rendered.config)?;
        info!(path = snapshot.display().to_string().as_str(); "Saved style snapshot");

        Ok(RenderOutcome {
            image: self.job.output.clone(),
            snapshot,
            width: rendered.surface.width(),
            height: rendered.surface.height(),
            diagnostics: rendered.diagnostics,
        })
    }
}
