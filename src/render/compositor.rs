use log::{debug, warn};

use super::surface::{FillRule, Outline, RenderSurface};
use crate::data::document::Document;
use crate::data::osm::{OsmId, Relation, Way};
use crate::style::{Category, Color, StrokeEntry, StyleConfig, StyleEntry, StyleResolver};

/// Way layers, bottom first. Natural relations are drawn before all of them.
pub const LAYER_ORDER: [Category; 5] = [
    Category::Landuse,
    Category::Waterway,
    Category::Natural,
    Category::Highway,
    Category::Building,
];

/// Relations of this category are painted as compound areas below every way layer.
pub const RELATION_CATEGORY: Category = Category::Natural;

const LETTERBOX_COLOR: Color = Color::WHITE;

/// A feature that was left out of the picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    StyleLookupMiss {
        feature_id: OsmId,
        category: Category,
        value: String,
    },
    UnresolvedRelationMember {
        relation_id: OsmId,
        way_id: OsmId,
    },
    UnresolvedWayNode {
        way_id: OsmId,
        node_id: OsmId,
    },
}

/// Outcome of one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDiagnostics {
    pub diagnostics: Vec<Diagnostic>,
    pub ways_drawn: usize,
    pub relations_drawn: usize,
}

impl RenderDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::StyleLookupMiss {
                feature_id,
                category,
                value,
            } => warn!(
                feature_id = *feature_id,
                category = category.key(),
                value = value.as_str();
                "Unknown tag value, feature will not render until it is added to the style table"
            ),
            Diagnostic::UnresolvedRelationMember { relation_id, way_id } => warn!(
                relation_id = *relation_id,
                way_id = *way_id;
                "Relation references a way missing from the extract, skipping relation"
            ),
            Diagnostic::UnresolvedWayNode { way_id, node_id } => warn!(
                way_id = *way_id,
                node_id = *node_id;
                "Way references a node missing from the extract, skipping way"
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn lookup_misses(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| matches!(diagnostic, Diagnostic::StyleLookupMiss { .. }))
    }
}

/// Paints a [`Document`] onto a [`RenderSurface`] in a fixed layer order.
///
/// Holds no state between renders, so rendering twice gives the same picture.
pub struct LayerCompositor<'a> {
    document: &'a Document,
    resolver: StyleResolver<'a>,
    scale: f32,
}

impl<'a> LayerCompositor<'a> {
    pub fn new(document: &'a Document, config: &'a StyleConfig) -> Self {
        LayerCompositor {
            document,
            resolver: StyleResolver::new(config),
            scale: 1.0,
        }
    }

    /// Multiplies every stroke width, for renders at a size other than the preview.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> RenderDiagnostics {
        let mut report = RenderDiagnostics::default();
        let projector = self.document.projector();
        let (width, height) = (projector.width(), projector.height());

        surface.fill_rect(0.0, 0.0, width, height, self.resolver.config().background());

        for relation in self.document.relations() {
            if self.draw_relation(surface, relation, &mut report) {
                report.relations_drawn += 1;
            }
        }

        for (category, queue) in LAYER_ORDER.iter().zip(self.build_queues(&mut report)) {
            for (way, style) in queue {
                if self.draw_way(surface, way, style, &mut report) {
                    report.ways_drawn += 1;
                    debug!(way_id = way.id, category = category.key(); "Drew way");
                }
            }
        }

        let (x_offset, y_offset) = (projector.x_offset(), projector.y_offset());
        let bands = [
            (0.0, 0.0, width, y_offset),
            (0.0, height - y_offset, width, y_offset),
            (0.0, 0.0, x_offset, height),
            (width - x_offset, 0.0, x_offset, height),
        ];
        for (x, y, w, h) in bands {
            if w > 0.0 && h > 0.0 {
                surface.fill_rect(x, y, w, h, LETTERBOX_COLOR);
            }
        }

        report
    }

    /// One queue per entry of [`LAYER_ORDER`], each in way id order.
    fn build_queues(&self, report: &mut RenderDiagnostics) -> Vec<Vec<(&'a Way, &'a StyleEntry)>> {
        let mut queues: Vec<Vec<(&'a Way, &'a StyleEntry)>> = vec![Vec::new(); LAYER_ORDER.len()];

        for way in self.document.ways() {
            for (queue, category) in queues.iter_mut().zip(LAYER_ORDER) {
                let Some(value) = way.tag(category.key()) else {
                    continue;
                };
                match self.resolver.enabled_style(category, value) {
                    Ok(Some(style)) => queue.push((way, style)),
                    Ok(None) => (),
                    Err(miss) => report.report(Diagnostic::StyleLookupMiss {
                        feature_id: way.id,
                        category: miss.category,
                        value: miss.value,
                    }),
                }
            }
        }
        queues
    }

    fn draw_way<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        way: &Way,
        style: &StyleEntry,
        report: &mut RenderDiagnostics,
    ) -> bool {
        let points = match self.document.way_points(way) {
            Ok(points) => points,
            Err(node_id) => {
                report.report(Diagnostic::UnresolvedWayNode {
                    way_id: way.id,
                    node_id,
                });
                return false;
            }
        };
        if points.len() < 2 {
            return false;
        }

        match style {
            StyleEntry::Stroke(stroke) => {
                surface.stroke_path(&Outline::polyline(&points), &self.scaled(stroke));
            }
            // The last point repeats the first on closed ways.
            StyleEntry::Fill(fill) => {
                surface.fill_path(&Outline::polygon(&points[..points.len() - 1]), fill.color);
            }
        }
        true
    }

    /// Draws a relation as one compound path. Nothing is drawn unless every member resolves.
    fn draw_relation<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        relation: &Relation,
        report: &mut RenderDiagnostics,
    ) -> bool {
        let Some(value) = relation.tag(RELATION_CATEGORY.key()) else {
            return false;
        };
        let style = match self.resolver.enabled_style(RELATION_CATEGORY, value) {
            Ok(Some(style)) => style,
            Ok(None) => return false,
            Err(miss) => {
                report.report(Diagnostic::StyleLookupMiss {
                    feature_id: relation.id,
                    category: miss.category,
                    value: miss.value,
                });
                return false;
            }
        };

        let mut outline = Outline::new(FillRule::EvenOdd);
        for &way_id in &relation.way_ids {
            let Some(way) = self.document.way(way_id) else {
                report.report(Diagnostic::UnresolvedRelationMember {
                    relation_id: relation.id,
                    way_id,
                });
                return false;
            };
            match self.document.way_points(way) {
                Ok(points) if points.is_empty() => (),
                Ok(points) => {
                    outline.trace(&points);
                    outline.close();
                }
                Err(node_id) => {
                    report.report(Diagnostic::UnresolvedWayNode { way_id, node_id });
                    return false;
                }
            }
        }
        if outline.is_empty() {
            return false;
        }

        match style {
            StyleEntry::Stroke(stroke) => surface.stroke_path(&outline, &self.scaled(stroke)),
            StyleEntry::Fill(fill) => surface.fill_path(&outline, fill.color),
        }
        true
    }

    fn scaled(&self, stroke: &StrokeEntry) -> StrokeEntry {
        StrokeEntry {
            width: stroke.width * self.scale,
            ..stroke.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::osm::{Bounds, Node};
    use crate::data::OsmMapData;
    use crate::render::surface::PathCommand;
    use crate::style::{MemoryStore, StyleStore};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Rect(f64, f64, f64, f64, Color),
        Fill(Outline, Color),
        Stroke(Outline, f32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl RenderSurface for RecordingSurface {
        fn width(&self) -> u32 {
            100
        }

        fn height(&self) -> u32 {
            100
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
            self.calls.push(Call::Rect(x, y, width, height, color));
        }

        fn fill_path(&mut self, outline: &Outline, color: Color) {
            self.calls.push(Call::Fill(outline.clone(), color));
        }

        fn stroke_path(&mut self, outline: &Outline, stroke: &StrokeEntry) {
            self.calls.push(Call::Stroke(outline.clone(), stroke.width));
        }
    }

    fn data(bounds: Bounds) -> OsmMapData {
        let nodes = [
            (1, 0.2, 0.2),
            (2, 0.2, 0.8),
            (3, 0.8, 0.8),
            (4, 0.8, 0.2),
            (5, 0.5, 0.0),
            (6, 0.5, 1.0),
        ]
        .into_iter()
        .map(|(id, lat, lon)| Node { id, lat, lon })
        .collect();
        OsmMapData {
            bounds: Some(bounds),
            nodes,
            ..Default::default()
        }
    }

    fn unit_bounds() -> Bounds {
        Bounds {
            min_lat: 0.0,
            max_lat: 1.0,
            min_lon: 0.0,
            max_lon: 1.0,
        }
    }

    fn way(id: OsmId, node_ids: &[OsmId], tags: &[(&str, &str)]) -> Way {
        Way {
            id,
            node_ids: node_ids.to_vec(),
            tags: tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    fn render(data: &OsmMapData, config: &StyleConfig) -> (Vec<Call>, RenderDiagnostics) {
        let document = Document::build(data, 100.0, 100.0).unwrap();
        let mut surface = RecordingSurface::default();
        let report = LayerCompositor::new(&document, config).render(&mut surface);
        (surface.calls, report)
    }

    #[test]
    fn layers_follow_the_fixed_order() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[1, 2, 3, 4, 1], &[("building", "house")]));
        data.ways.insert(2, way(2, &[5, 6], &[("highway", "primary")]));
        data.ways.insert(3, way(3, &[1, 2, 3, 4, 1], &[("landuse", "grass")]));
        let config = StyleConfig::default();

        let (calls, report) = render(&data, &config);

        assert!(report.is_clean());
        assert_eq!(report.ways_drawn, 3);
        let house = config.style_of("House Style").unwrap().color();
        let kinds: Vec<&str> = calls
            .iter()
            .map(|call| match call {
                Call::Rect(..) => "rect",
                Call::Fill(_, color) if *color == house => "house",
                Call::Fill(..) => "landuse",
                Call::Stroke(..) => "highway",
            })
            .collect();
        assert_eq!(kinds, ["rect", "landuse", "highway", "house", "rect", "rect"]);
        assert_eq!(calls[0], Call::Rect(0.0, 0.0, 100.0, 100.0, config.background()));
    }

    #[test]
    fn fills_drop_the_closing_point() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[1, 2, 3, 4, 1], &[("building", "house")]));

        let (calls, _) = render(&data, &StyleConfig::default());

        let Call::Fill(outline, _) = &calls[1] else {
            panic!("expected a fill, got {:?}", calls[1]);
        };
        let commands = outline.commands();
        assert_eq!(commands.len(), 5);
        assert!(matches!(commands[0], PathCommand::MoveTo(..)));
        assert_eq!(commands[4], PathCommand::Close);
    }

    #[test]
    fn strokes_are_scaled() {
        let mut data = data(unit_bounds());
        data.ways.insert(2, way(2, &[5, 6], &[("highway", "motorway")]));
        let config = StyleConfig::default();
        let document = Document::build(&data, 100.0, 100.0).unwrap();
        let mut surface = RecordingSurface::default();

        LayerCompositor::new(&document, &config)
            .with_scale(2.5)
            .render(&mut surface);

        assert!(surface.calls.contains(&Call::Stroke(
            Outline::polyline(&document.way_points(document.way(2).unwrap()).unwrap()),
            25.0
        )));
    }

    #[test]
    fn unknown_values_are_skipped_but_others_render() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[5, 6], &[("highway", "some_unknown_value")]));
        data.ways.insert(2, way(2, &[5, 6], &[("highway", "primary")]));

        let (calls, report) = render(&data, &StyleConfig::default());

        assert_eq!(report.ways_drawn, 1);
        assert_eq!(
            report.lookup_misses().collect::<Vec<_>>(),
            [&Diagnostic::StyleLookupMiss {
                feature_id: 1,
                category: Category::Highway,
                value: "some_unknown_value".into()
            }]
        );
        assert_eq!(calls.iter().filter(|call| matches!(call, Call::Stroke(..))).count(), 1);
    }

    #[test]
    fn disabled_styles_are_not_queued() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[1, 2, 3, 4, 1], &[("building", "house")]));
        let mut store = MemoryStore::default();
        let config = store.read().unwrap().with_enabled("House Style", false).unwrap();
        store.write(&config).unwrap();

        let (calls, report) = render(&data, &store.read().unwrap());

        assert_eq!(report.ways_drawn, 0);
        assert!(calls.iter().all(|call| matches!(call, Call::Rect(..))));
    }

    #[test]
    fn ways_with_several_categories_are_queued_twice() {
        let mut data = data(unit_bounds());
        data.ways.insert(
            1,
            way(1, &[1, 2, 3, 4, 1], &[("landuse", "grass"), ("building", "house")]),
        );

        let (_, report) = render(&data, &StyleConfig::default());

        assert_eq!(report.ways_drawn, 2);
    }

    #[test]
    fn relations_become_one_compound_path() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[1, 2, 3, 4, 1], &[]));
        data.ways.insert(2, way(2, &[5, 6, 3], &[]));
        data.relations.insert(
            7,
            Relation {
                id: 7,
                way_ids: vec![1, 2],
                tags: [("natural".to_string(), "water".to_string())].into(),
            },
        );

        let (calls, report) = render(&data, &StyleConfig::default());

        assert_eq!(report.relations_drawn, 1);
        let Call::Fill(outline, _) = &calls[1] else {
            panic!("expected a fill, got {:?}", calls[1]);
        };
        assert_eq!(outline.subpath_count(), 2);
        assert_eq!(outline.fill_rule(), FillRule::EvenOdd);
    }

    #[test]
    fn relations_with_missing_members_are_skipped_whole() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[1, 2, 3, 4, 1], &[]));
        data.relations.insert(
            7,
            Relation {
                id: 7,
                way_ids: vec![1, 99],
                tags: [("natural".to_string(), "water".to_string())].into(),
            },
        );

        let (calls, report) = render(&data, &StyleConfig::default());

        assert_eq!(report.relations_drawn, 0);
        assert_eq!(
            report.diagnostics,
            [Diagnostic::UnresolvedRelationMember {
                relation_id: 7,
                way_id: 99
            }]
        );
        assert!(calls.iter().all(|call| matches!(call, Call::Rect(..))));
    }

    #[test]
    fn ways_with_missing_nodes_are_skipped() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[5, 42, 6], &[("highway", "primary")]));

        let (_, report) = render(&data, &StyleConfig::default());

        assert_eq!(
            report.diagnostics,
            [Diagnostic::UnresolvedWayNode { way_id: 1, node_id: 42 }]
        );
    }

    #[test]
    fn single_node_ways_are_not_drawn_or_counted() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[5], &[("highway", "primary")]));
        data.ways.insert(2, way(2, &[5, 6], &[("highway", "primary")]));

        let (calls, report) = render(&data, &StyleConfig::default());

        assert!(report.is_clean());
        assert_eq!(report.ways_drawn, 1);
        assert_eq!(calls.iter().filter(|call| matches!(call, Call::Stroke(..))).count(), 1);
    }

    #[test]
    fn letterbox_bands_are_masked_last() {
        let wide = Bounds {
            min_lat: 0.0,
            max_lat: 0.5,
            min_lon: 0.0,
            max_lon: 1.0,
        };
        let data = data(wide);
        let document = Document::build(&data, 100.0, 100.0).unwrap();
        let y_offset = document.projector().y_offset();

        let (calls, _) = render(&data, &StyleConfig::default());

        assert!(y_offset > 0.0);
        assert_eq!(
            calls[1..],
            [
                Call::Rect(0.0, 0.0, 100.0, y_offset, Color::WHITE),
                Call::Rect(0.0, 100.0 - y_offset, 100.0, y_offset, Color::WHITE),
            ]
        );
    }

    #[test]
    fn rendering_twice_issues_identical_calls() {
        let mut data = data(unit_bounds());
        data.ways.insert(1, way(1, &[1, 2, 3, 4, 1], &[("building", "house")]));
        data.ways.insert(2, way(2, &[5, 6], &[("highway", "nope")]));
        let config = StyleConfig::default();

        assert_eq!(render(&data, &config), render(&data, &config));
    }
}
