use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use log::info;

use super::surface::{RasterSurface, RenderSurface};
use crate::data::document::Document;
use crate::errors::{Error, Result};
use crate::projection::GeoProjector;

const JPEG_QUALITY: u8 = 100;

/// Output size for an export and the stroke scale that goes with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportPlan {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

/// Sizes an export so its longest side is `max_dim`, keeping the preview's content
/// region (the canvas without letterbox) in proportion.
pub fn plan_export(preview: &GeoProjector, max_dim: u32) -> Result<ExportPlan> {
    let (content_width, content_height) = preview.content_size();
    let invalid = || Error::InvalidCanvas {
        width: max_dim.into(),
        height: max_dim.into(),
    };
    if max_dim == 0 || !(content_width > 0.0 && content_height > 0.0) {
        return Err(invalid());
    }

    let longest = content_width.max(content_height);
    let scale = f64::from(max_dim) / longest;
    let short_side = |side: f64| ((side * scale).round() as u32).max(1);

    let (width, height) = if content_width >= content_height {
        (max_dim, short_side(content_height))
    } else {
        (short_side(content_width), max_dim)
    };

    Ok(ExportPlan { width, height, scale })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Writes the surface to `path`, picking the encoder from the file extension.
pub fn write_image(surface: &RasterSurface, path: &Path, document: &Document) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    let writer = BufWriter::new(File::create(path)?);
    let (width, height) = (surface.width(), surface.height());

    match format {
        ImageFormat::Png => {
            let mut encoder = png::Encoder::new(writer, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.add_text_chunk("Copyright".to_string(), document.copyright().to_string())?;
            encoder.add_text_chunk("Attribution".to_string(), document.attribution().to_string())?;
            encoder.add_text_chunk("License".to_string(), document.license().to_string())?;

            let mut png_writer = encoder.write_header()?;
            png_writer.write_image_data(&surface.to_rgba8())?;
            png_writer.finish()?;
        }
        ImageFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
            encoder.encode(&surface.to_rgb8(), width, height, ExtendedColorType::Rgb8)?;
        }
    }

    info!(
        path = path.display().to_string().as_str(),
        width = width,
        height = height;
        "Wrote image"
    );
    Ok(())
}
