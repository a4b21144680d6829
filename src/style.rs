//! Style configuration and the static tag to style table.

mod defaults;
mod entry;
mod resolver;
mod store;
mod table;

pub use defaults::{default_styles, BACKGROUND_COLOR};
pub use entry::{
    CapStyle, Color, DashPattern, FillEntry, JoinStyle, StrokeEntry, StyleEntry, StyleKind,
};
pub use resolver::{LookupMiss, StyleResolver};
pub use store::{JsonFileStore, MemoryStore, StyleConfig, StyleStore};
pub use table::{style_key, Category, TAG_STYLES};
