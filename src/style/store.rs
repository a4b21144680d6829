use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::defaults::{default_styles, BACKGROUND_COLOR};
use super::entry::{Color, StyleEntry};
use crate::errors::{Error, Result};

/// Snapshot of the user's style configuration.
///
/// Edits return a new value; persisting it is the job of a [`StyleStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    entries: BTreeMap<String, StyleEntry>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            entries: default_styles(),
        }
    }
}

impl StyleConfig {
    /// Lays `stored` over the defaults. Keys the defaults do not know are dropped, keys
    /// missing from `stored` keep their default.
    pub fn merged_over_defaults(stored: BTreeMap<String, StyleEntry>) -> Self {
        let mut config = StyleConfig::default();
        for (key, entry) in stored {
            match config.entries.get_mut(&key) {
                Some(slot) => *slot = entry,
                None => debug!(key = key.as_str(); "Ignoring unknown style key"),
            }
        }
        config
    }

    pub fn style_of(&self, key: &str) -> Option<&StyleEntry> {
        self.entries.get(key)
    }

    /// Unknown keys count as disabled.
    pub fn is_enabled(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(StyleEntry::enabled)
    }

    pub fn background(&self) -> Color {
        self.entries
            .get(BACKGROUND_COLOR)
            .map(StyleEntry::color)
            .unwrap_or(Color::rgb(20, 20, 20))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Returns a copy with `key` replaced. Only known keys can be set.
    pub fn with_entry(&self, key: &str, entry: StyleEntry) -> Result<Self> {
        let current = self
            .entries
            .get(key)
            .ok_or_else(|| Error::UnknownStyleKey(key.to_string()))?;
        if current.kind() != entry.kind() {
            return Err(Error::InvalidStyle(format!(
                "'{key}' is a {:?} style, got a {:?}",
                current.kind(),
                entry.kind()
            )));
        }

        let mut edited = self.clone();
        edited.entries.insert(key.to_string(), entry);
        Ok(edited)
    }

    pub fn with_enabled(&self, key: &str, enabled: bool) -> Result<Self> {
        let entry = self
            .style_of(key)
            .ok_or_else(|| Error::UnknownStyleKey(key.to_string()))?
            .clone();
        self.with_entry(key, entry.with_enabled(enabled))
    }
}

/// Where the style configuration lives between runs.
pub trait StyleStore {
    fn read(&mut self) -> Result<StyleConfig>;
    fn write(&mut self, config: &StyleConfig) -> Result<()>;
}

/// JSON object of style key to style record, the format of `user.config` files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Reads any configuration file, without touching the store's own file.
    pub fn load_file(path: &Path) -> Result<StyleConfig> {
        let reader = BufReader::new(File::open(path)?);
        let stored: BTreeMap<String, StyleEntry> = serde_json::from_reader(reader)?;
        Ok(StyleConfig::merged_over_defaults(stored))
    }
}

impl StyleStore for JsonFileStore {
    fn read(&mut self) -> Result<StyleConfig> {
        if !self.path.try_exists()? {
            let path = self.path.display().to_string();
            info!(path = path.as_str(); "No style configuration found, writing defaults");
            let config = StyleConfig::default();
            self.write(&config)?;
            return Ok(config);
        }

        Self::load_file(&self.path)
    }

    fn write(&mut self, config: &StyleConfig) -> Result<()> {
        write_json(&self.path, config)
    }
}

fn write_json(path: &Path, config: &StyleConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &config.entries)?;
    writer.flush()?;
    Ok(())
}

/// Keeps the configuration in memory. Counts writes so tests can check persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: Option<StyleConfig>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_config(config: StyleConfig) -> Self {
        MemoryStore {
            config: Some(config),
            writes: 0,
        }
    }
}

impl StyleStore for MemoryStore {
    fn read(&mut self) -> Result<StyleConfig> {
        Ok(self.config.get_or_insert_with(StyleConfig::default).clone())
    }

    fn write(&mut self, config: &StyleConfig) -> Result<()> {
        self.config = Some(config.clone());
        self.writes += 1;
        Ok(())
    }
}
