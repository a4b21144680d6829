use super::entry::StyleEntry;
use super::store::StyleConfig;
use super::table::{self, Category};

/// A tag value the static table does not know for its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupMiss {
    pub category: Category,
    pub value: String,
}

/// Read-only view joining the static table with one configuration snapshot.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    config: &'a StyleConfig,
}

impl<'a> StyleResolver<'a> {
    pub fn new(config: &'a StyleConfig) -> Self {
        StyleResolver { config }
    }

    pub fn resolve(&self, category: Category, value: &str) -> Result<&'static str, LookupMiss> {
        table::style_key(category, value).ok_or_else(|| LookupMiss {
            category,
            value: value.to_string(),
        })
    }

    pub fn is_enabled(&self, style_key: &str) -> bool {
        self.config.is_enabled(style_key)
    }

    pub fn style_of(&self, style_key: &str) -> Option<&'a StyleEntry> {
        self.config.style_of(style_key)
    }

    /// Resolves and looks up in one go. `Ok(None)` means the key is known but disabled.
    pub fn enabled_style(
        &self,
        category: Category,
        value: &str,
    ) -> Result<Option<&'a StyleEntry>, LookupMiss> {
        let key = self.resolve(category, value)?;
        Ok(self.style_of(key).filter(|entry| entry.enabled()))
    }

    pub fn config(&self) -> &'a StyleConfig {
        self.config
    }
}
