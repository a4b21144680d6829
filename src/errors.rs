use std::io;

use thiserror::Error;

/// Errors that abort loading or exporting a map.
///
/// Problems with single features (unknown tag values, relations pointing at missing
/// ways) are not errors; they end up in `RenderDiagnostics` instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bounding box has zero span (lat {min_lat}..{max_lat}, lon {min_lon}..{max_lon})")]
    DegenerateBounds {
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    },

    #[error("input has no <bounds> element")]
    MissingBounds,

    #[error("malformed input at byte {position}: {reason}")]
    MalformedInput { position: usize, reason: String },

    #[error("canvas must have a positive size, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("invalid style: {0}")]
    InvalidStyle(String),

    #[error("unknown style key '{0}'")]
    UnknownStyleKey(String),

    #[error("no {0} given on the command line or in the job file")]
    MissingSetting(&'static str),

    #[error("unsupported output format '{0}'")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("could not encode png: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error("could not encode image: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            position,
            reason: reason.into(),
        }
    }

    /// Whether this error was caused by the map input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::DegenerateBounds { .. } | Error::MissingBounds | Error::MalformedInput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
