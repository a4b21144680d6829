use std::collections::BTreeMap;

pub type OsmId = i64;

/// Tag key to tag value, as attached directly to a way or relation.
pub type Tags = BTreeMap<String, String>;

/// The `<bounds>` element of an extract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// A node as read from the file, before projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: OsmId,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Way {
    pub id: OsmId,
    pub node_ids: Vec<OsmId>,
    pub tags: Tags,
}

/// Only `type="way"` members are kept; node and relation members are dropped while parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relation {
    pub id: OsmId,
    pub way_ids: Vec<OsmId>,
    pub tags: Tags,
}

impl Way {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

impl Relation {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
