//! Job files and the settings a render runs with.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{Error, Result};

pub const DEFAULT_WIDTH: f64 = 1000.0;
pub const DEFAULT_HEIGHT: f64 = 800.0;
pub const DEFAULT_STYLE_CONFIG: &str = "user.config";

/// Contents of a `--job` file. Every field is optional; command line flags win.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub max_dim: Option<u32>,
    pub style_config: Option<PathBuf>,
    pub snapshot_dir: Option<PathBuf>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Fields set in `overrides` replace ours.
    pub fn overridden_by(self, overrides: RunConfig) -> Self {
        RunConfig {
            input: overrides.input.or(self.input),
            output: overrides.output.or(self.output),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            max_dim: overrides.max_dim.or(self.max_dim),
            style_config: overrides.style_config.or(self.style_config),
            snapshot_dir: overrides.snapshot_dir.or(self.snapshot_dir),
        }
    }

    pub fn style_config_path(&self) -> PathBuf {
        self.style_config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STYLE_CONFIG))
    }

    pub fn render_job(&self) -> Result<RenderJob> {
        Ok(RenderJob {
            input: self.input.clone().ok_or(Error::MissingSetting("input file"))?,
            output: self.output.clone().ok_or(Error::MissingSetting("output file"))?,
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            height: self.height.unwrap_or(DEFAULT_HEIGHT),
            max_dim: self.max_dim,
            snapshot_dir: self.snapshot_dir.clone(),
        })
    }
}

/// Fully resolved settings for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Preview canvas; exports are planned from its content region.
    pub width: f64,
    pub height: f64,
    pub max_dim: Option<u32>,
    pub snapshot_dir: Option<PathBuf>,
}

impl RenderJob {
    /// `<snapshot dir or image dir>/<image stem>.config`
    pub fn snapshot_path(&self) -> PathBuf {
        let stem = self
            .output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "map".to_string());
        let dir = match &self.snapshot_dir {
            Some(dir) => dir.clone(),
            None => self.output.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        dir.join(format!("{stem}.config"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn job_file_fields_are_optional() {
        let config: RunConfig =
            serde_json::from_str(r#"{"input": "london.osm", "max_dim": 4000}"#).unwrap();

        assert_eq!(config.input, Some(PathBuf::from("london.osm")));
        assert_eq!(config.max_dim, Some(4000));
        assert_eq!(config.width, None);
    }

    #[test]
    fn unknown_job_fields_are_rejected() {
        assert!(serde_json::from_str::<RunConfig>(r#"{"inptu": "london.osm"}"#).is_err());
    }

    #[test]
    fn flags_override_job_file_and_defaults_fill_the_rest() {
        let job_file = RunConfig {
            input: Some("a.osm".into()),
            output: Some("a.png".into()),
            width: Some(640.0),
            ..Default::default()
        };
        let flags = RunConfig {
            output: Some("out/b.jpg".into()),
            ..Default::default()
        };

        let job = job_file.overridden_by(flags).render_job().unwrap();

        assert_eq!(job.input, PathBuf::from("a.osm"));
        assert_eq!(job.output, PathBuf::from("out/b.jpg"));
        assert_eq!(job.width, 640.0);
        assert_eq!(job.height, DEFAULT_HEIGHT);
        assert_eq!(job.snapshot_path(), PathBuf::from("out/b.config"));
    }

    #[test]
    fn missing_input_is_reported() {
        assert_matches!(
            RunConfig::default().render_job(),
            Err(Error::MissingSetting("input file"))
        );
    }

    #[test]
    fn snapshot_dir_wins_over_image_dir() {
        let job = RunConfig {
            input: Some("a.osm".into()),
            output: Some("out/poster.png".into()),
            snapshot_dir: Some("configs/user".into()),
            ..Default::default()
        }
        .render_job()
        .unwrap();

        assert_eq!(job.snapshot_path(), PathBuf::from("configs/user/poster.config"));
        assert_eq!(RunConfig::default().style_config_path(), PathBuf::from(DEFAULT_STYLE_CONFIG));
    }
}
