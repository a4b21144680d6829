use std::collections::BTreeMap;

use self::osm::{Bounds, Node, OsmId, Relation, Way};

pub mod document;
pub mod osm;

/// Map data as defined in the .osm file. Nodes are buffered unprojected, since the
/// `<bounds>` element is not guaranteed to come before them.
#[derive(Debug, Default, Clone)]
pub struct OsmMapData {
    pub bounds: Option<Bounds>,
    pub nodes: Vec<Node>,
    pub ways: BTreeMap<OsmId, Way>,
    pub relations: BTreeMap<OsmId, Relation>,
}
