//! Renders OpenStreetMap extracts into styled raster map posters.
//!
//! The pipeline is parse ([`etl::parse_osm`]) → project ([`data::document::Document`]) →
//! composite ([`render::LayerCompositor`]) → export ([`render::write_image`]), with the
//! look of every feature coming from a [`style::StyleConfig`].

pub mod config;
pub mod data;
pub mod errors;
pub mod etl;
pub mod projection;
pub mod render;
pub mod style;
