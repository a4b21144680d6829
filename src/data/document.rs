use std::collections::{BTreeMap, BTreeSet};

use crate::data::osm::{OsmId, Relation, Way};
use crate::data::OsmMapData;
use crate::errors::{Error, Result};
use crate::projection::GeoProjector;
use crate::style::Category;

pub const COPYRIGHT: &str = "OpenStreetMap and contributors";
pub const ATTRIBUTION: &str = "http://www.openstreetmap.org/copyright";
pub const LICENSE: &str = "http://opendatacommons.org/licenses/odbl/1-0/";

/// A node with its pixel position on the canvas the document was built for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: OsmId,
    pub lat: f64,
    pub lon: f64,
    pub x: f64,
    pub y: f64,
}

/// A parsed extract projected onto one canvas size.
///
/// Changing the canvas means building a new document from the same [`OsmMapData`];
/// points are never re-projected in place.
#[derive(Debug, Clone)]
pub struct Document {
    points: BTreeMap<OsmId, Point>,
    ways: BTreeMap<OsmId, Way>,
    relations: BTreeMap<OsmId, Relation>,
    projector: GeoProjector,
}

impl Document {
    pub fn build(data: &OsmMapData, width: f64, height: f64) -> Result<Self> {
        let bounds = data.bounds.ok_or(Error::MissingBounds)?;
        let projector = GeoProjector::new(bounds, width, height)?;
        Ok(Self::with_projector(data, projector))
    }

    pub fn with_projector(data: &OsmMapData, projector: GeoProjector) -> Self {
        let points = data
            .nodes
            .iter()
            .map(|node| {
                let (x, y) = projector.project(node.lat, node.lon);
                let point = Point {
                    id: node.id,
                    lat: node.lat,
                    lon: node.lon,
                    x,
                    y,
                };
                (node.id, point)
            })
            .collect();

        Document {
            points,
            ways: data.ways.clone(),
            relations: data.relations.clone(),
            projector,
        }
    }

    pub fn projector(&self) -> &GeoProjector {
        &self.projector
    }

    pub fn point(&self, id: OsmId) -> Option<&Point> {
        self.points.get(&id)
    }

    pub fn way(&self, id: OsmId) -> Option<&Way> {
        self.ways.get(&id)
    }

    /// Ways in ascending id order.
    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.ways.values()
    }

    /// Relations in ascending id order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    /// Pixel positions of a way's nodes, or the first node id that is not in the document.
    pub fn way_points(&self, way: &Way) -> std::result::Result<Vec<(f64, f64)>, OsmId> {
        way.node_ids
            .iter()
            .map(|id| self.points.get(id).map(|p| (p.x, p.y)).ok_or(*id))
            .collect()
    }

    /// Every value used per known category, on ways and relations alike.
    pub fn used_tags(&self) -> BTreeMap<Category, BTreeSet<String>> {
        let mut used: BTreeMap<Category, BTreeSet<String>> = BTreeMap::new();
        let tag_sets = self
            .ways
            .values()
            .map(|way| &way.tags)
            .chain(self.relations.values().map(|relation| &relation.tags));

        for tags in tag_sets {
            for category in Category::ALL {
                if let Some(value) = tags.get(category.key()) {
                    used.entry(category).or_default().insert(value.clone());
                }
            }
        }
        used
    }

    pub fn copyright(&self) -> &'static str {
        COPYRIGHT
    }

    pub fn attribution(&self) -> &'static str {
        ATTRIBUTION
    }

    pub fn license(&self) -> &'static str {
        LICENSE
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::data::osm::{Bounds, Node};

    fn sample() -> OsmMapData {
        let mut data = OsmMapData {
            bounds: Some(Bounds {
                min_lat: 0.0,
                max_lat: 1.0,
                min_lon: 0.0,
                max_lon: 1.0,
            }),
            nodes: vec![
                Node { id: 1, lat: 0.0, lon: 0.0 },
                Node { id: 2, lat: 1.0, lon: 1.0 },
            ],
            ..Default::default()
        };
        let mut way = Way {
            id: 10,
            node_ids: vec![1, 2],
            ..Default::default()
        };
        way.tags.insert("highway".into(), "primary".into());
        way.tags.insert("name".into(), "Main Street".into());
        data.ways.insert(10, way);

        let mut relation = Relation {
            id: 20,
            way_ids: vec![10],
            ..Default::default()
        };
        relation.tags.insert("natural".into(), "water".into());
        data.relations.insert(20, relation);
        data
    }

    #[test]
    fn points_are_projected_on_build() {
        let document = Document::build(&sample(), 100.0, 100.0).unwrap();
        let projector = document.projector();

        let far_corner = document.point(2).unwrap();
        assert_eq!(far_corner.x, projector.project_lon(1.0));
        assert_eq!(far_corner.y, projector.project_lat(1.0));
    }

    #[test]
    fn rebuilding_for_another_canvas_leaves_original_untouched() {
        let data = sample();
        let small = Document::build(&data, 100.0, 100.0).unwrap();
        let large = Document::build(&data, 400.0, 400.0).unwrap();

        assert!(large.point(2).unwrap().x > small.point(2).unwrap().x);
        assert_eq!(small.projector().width(), 100.0);
    }

    #[test]
    fn missing_bounds_fail_the_build() {
        let data = OsmMapData {
            bounds: None,
            ..sample()
        };
        assert_matches!(Document::build(&data, 10.0, 10.0), Err(Error::MissingBounds));
    }

    #[test]
    fn way_points_report_unknown_nodes() {
        let document = Document::build(&sample(), 100.0, 100.0).unwrap();
        let dangling = Way {
            id: 11,
            node_ids: vec![1, 99, 2],
            ..Default::default()
        };

        assert_eq!(document.way_points(&dangling), Err(99));
        assert_eq!(document.way_points(document.way(10).unwrap()).unwrap().len(), 2);
    }

    #[test]
    fn used_tags_cover_known_categories_only() {
        let document = Document::build(&sample(), 100.0, 100.0).unwrap();
        let used = document.used_tags();

        assert_eq!(used.len(), 2);
        assert!(used[&Category::Highway].contains("primary"));
        assert!(used[&Category::Natural].contains("water"));
    }
}
