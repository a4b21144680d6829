use std::fs::{self, File};
use std::path::PathBuf;

use assert_matches::assert_matches;

use osm_poster::config::RunConfig;
use osm_poster::data::document::Document;
use osm_poster::errors::Error;
use osm_poster::etl::draw_map::DrawMapEtl;
use osm_poster::etl::parse_osm::parse_osm;
use osm_poster::etl::Etl;
use osm_poster::render::{plan_export, render_raster, Diagnostic, RasterSurface};
use osm_poster::style::{Color, MemoryStore, StyleConfig, StyleStore};

const SQUARE_NODES: &str = r#"
  <node id="1" lat="0.25" lon="0.25"/>
  <node id="2" lat="0.25" lon="0.75"/>
  <node id="3" lat="0.75" lon="0.75"/>
  <node id="4" lat="0.75" lon="0.25"/>
  <node id="5" lat="0.5" lon="0.0"/>
  <node id="6" lat="0.5" lon="1.0"/>"#;

fn extract(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <bounds minlat="0" minlon="0" maxlat="1" maxlon="1"/>{SQUARE_NODES}
{body}
</osm>"#
    )
}

fn square_way(id: i64, key: &str, value: &str) -> String {
    format!(
        r#"<way id="{id}">
  <nd ref="1"/><nd ref="2"/><nd ref="3"/><nd ref="4"/><nd ref="1"/>
  <tag k="{key}" v="{value}"/>
</way>"#
    )
}

fn line_way(id: i64, key: &str, value: &str) -> String {
    format!(r#"<way id="{id}"><nd ref="5"/><nd ref="6"/><tag k="{key}" v="{value}"/></way>"#)
}

fn render(xml: &str, config: &StyleConfig) -> (RasterSurface, Vec<Diagnostic>) {
    let data = parse_osm(xml.as_bytes()).unwrap();
    let document = Document::build(&data, 100.0, 100.0).unwrap();
    let (surface, report) = render_raster(&document, config, 1.0).unwrap();
    (surface, report.diagnostics)
}

/// A house near the middle of a small London extract, with one vertex at `far_lon`.
fn house_reaching_east(far_lon: f64) -> String {
    format!(
        r#"<osm>
  <bounds minlat="51.50" minlon="-0.13" maxlat="51.51" maxlon="-0.12"/>
  <node id="1" lat="51.502" lon="-0.128"/>
  <node id="2" lat="51.502" lon="-0.122"/>
  <node id="3" lat="51.505" lon="{far_lon}"/>
  <node id="4" lat="51.508" lon="-0.122"/>
  <node id="5" lat="51.508" lon="-0.128"/>
  <node id="6" lat="51.5045" lon="-{far_lon}"/>
  <node id="7" lat="51.5045" lon="{far_lon}"/>
  <way id="10">
    <nd ref="1"/><nd ref="2"/><nd ref="3"/><nd ref="4"/><nd ref="5"/><nd ref="1"/>
    <tag k="building" v="house"/>
  </way>
  <way id="11"><nd ref="6"/><nd ref="7"/><tag k="highway" v="primary"/></way>
</osm>"#
    )
}

fn color_of(config: &StyleConfig, key: &str) -> Color {
    config.style_of(key).unwrap().color()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("osm_poster_it_{}", std::process::id()))
        .join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn house_is_filled_inside_its_outline_only() {
    let config = StyleConfig::default();
    let (surface, diagnostics) = render(&extract(&square_way(10, "building", "house")), &config);

    assert!(diagnostics.is_empty());
    let house = color_of(&config, "House Style");
    assert_eq!(surface.pixel(50, 50), Some(house));
    assert_eq!(surface.pixel(30, 30), Some(house));
    assert_eq!(surface.pixel(70, 70), Some(house));

    let background = config.background();
    for (x, y) in [(50, 21), (50, 79), (21, 50), (79, 50)] {
        assert_eq!(surface.pixel(x, y), Some(background), "pixel ({x}, {y})");
    }
}

#[test]
fn unknown_value_does_not_stop_later_ways() {
    let config = StyleConfig::default();
    let body = format!(
        "{}\n{}",
        line_way(1, "highway", "some_unknown_value"),
        line_way(2, "highway", "primary")
    );

    let (surface, diagnostics) = render(&extract(&body), &config);

    assert_matches!(
        diagnostics.as_slice(),
        [Diagnostic::StyleLookupMiss { feature_id: 1, value, .. }] if value == "some_unknown_value"
    );
    assert_eq!(surface.pixel(50, 50), Some(color_of(&config, "Primary Style")));
}

#[test]
fn relation_with_missing_member_is_not_drawn_at_all() {
    let config = StyleConfig::default();
    let body = format!(
        r#"{}
<relation id="30">
  <member type="way" ref="20" role="outer"/>
  <member type="way" ref="404" role="inner"/>
  <tag k="natural" v="water"/>
</relation>"#,
        square_way(20, "note", "member only")
    );

    let (surface, diagnostics) = render(&extract(&body), &config);

    assert_eq!(
        diagnostics,
        [Diagnostic::UnresolvedRelationMember {
            relation_id: 30,
            way_id: 404
        }]
    );
    assert_eq!(surface.pixel(40, 40), Some(config.background()));
}

#[test]
fn complete_relation_is_drawn_below_ways() {
    let config = StyleConfig::default();
    let body = format!(
        r#"{}
<relation id="30">
  <member type="way" ref="20" role="outer"/>
  <tag k="natural" v="water"/>
</relation>"#,
        square_way(20, "note", "member only")
    );

    let (surface, diagnostics) = render(&extract(&body), &config);

    assert!(diagnostics.is_empty());
    assert_eq!(surface.pixel(40, 40), Some(color_of(&config, "Water Style")));
}

#[test]
fn highway_is_drawn_over_landuse() {
    let config = StyleConfig::default();
    // The road has the lower id, so only the layer order can put it on top.
    let body = format!(
        "{}\n{}",
        line_way(1, "highway", "primary"),
        square_way(2, "landuse", "grass")
    );

    let (surface, _) = render(&extract(&body), &config);

    assert_eq!(surface.pixel(50, 50), Some(color_of(&config, "Primary Style")));
    assert_eq!(surface.pixel(50, 35), Some(color_of(&config, "Grass Land Use Style")));
}

#[test]
fn disabled_style_is_not_drawn() {
    let mut store = MemoryStore::default();
    let config = store.read().unwrap().with_enabled("House Style", false).unwrap();
    store.write(&config).unwrap();

    let xml = extract(&square_way(10, "building", "house"));
    let (surface, _) = render(&xml, &store.read().unwrap());

    assert_eq!(surface.pixel(50, 50), Some(config.background()));
}

#[test]
fn rendering_is_repeatable() {
    let config = StyleConfig::default();
    let body = format!(
        "{}\n{}\n{}",
        square_way(1, "landuse", "grass"),
        line_way(2, "highway", "motorway"),
        line_way(3, "waterway", "river")
    );
    let xml = extract(&body);

    let (first, _) = render(&xml, &config);
    let (second, _) = render(&xml, &config);

    assert_eq!(first.to_rgba8(), second.to_rgba8());
}

#[test]
fn load_errors_are_fatal() {
    let malformed = parse_osm(r#"<osm><node id="1" lat="x" lon="0"/></osm>"#.as_bytes());
    assert_matches!(malformed, Err(Error::MalformedInput { .. }));

    let no_bounds = parse_osm(r#"<osm><node id="1" lat="0" lon="0"/></osm>"#.as_bytes()).unwrap();
    assert_matches!(Document::build(&no_bounds, 100.0, 100.0), Err(Error::MissingBounds));

    let flat = r#"<osm><bounds minlat="1" minlon="0" maxlat="1" maxlon="1"/></osm>"#;
    let flat = parse_osm(flat.as_bytes()).unwrap();
    assert_matches!(Document::build(&flat, 100.0, 100.0), Err(Error::DegenerateBounds { .. }));
}

#[test]
fn export_writes_image_and_style_snapshot() {
    let dir = scratch_dir("export");
    let input = dir.join("square.osm");
    fs::write(&input, extract(&square_way(10, "building", "house"))).unwrap();

    let job = RunConfig {
        input: Some(input),
        output: Some(dir.join("poster.png")),
        max_dim: Some(300),
        snapshot_dir: Some(dir.join("configs")),
        ..Default::default()
    }
    .render_job()
    .unwrap();
    let mut store = MemoryStore::default();

    let outcome = DrawMapEtl::new(&job, &mut store).process().unwrap();

    assert_eq!(outcome.height, 300);
    assert!((299..=300).contains(&outcome.width));
    assert_eq!(outcome.snapshot, dir.join("configs").join("poster.config"));
    assert!(outcome.snapshot.exists());

    let decoder = png::Decoder::new(File::open(&outcome.image).unwrap());
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    assert_eq!((info.width, info.height), (outcome.width, outcome.height));
    assert!(info
        .uncompressed_latin1_text
        .iter()
        .any(|chunk| chunk.keyword == "Copyright" && chunk.text.contains("OpenStreetMap")));
}

#[test]
fn jpeg_export_follows_extension() {
    let dir = scratch_dir("jpeg");
    let input = dir.join("square.osm");
    fs::write(&input, extract(&line_way(1, "highway", "primary"))).unwrap();

    let job = RunConfig {
        input: Some(input),
        output: Some(dir.join("poster.jpg")),
        width: Some(120.0),
        height: Some(90.0),
        ..Default::default()
    }
    .render_job()
    .unwrap();

    let outcome = DrawMapEtl::new(&job, &mut MemoryStore::default()).process().unwrap();

    let bytes = fs::read(&outcome.image).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!((outcome.width, outcome.height), (120, 90));
    assert_eq!(outcome.snapshot, dir.join("poster.config"));
}

#[test]
fn ways_reaching_far_outside_the_bounds_are_drawn() {
    let config = StyleConfig::default();
    let house = color_of(&config, "House Style");
    let primary = color_of(&config, "Primary Style");

    for far_lon in [3.0, 30.0] {
        let data = parse_osm(house_reaching_east(far_lon).as_bytes()).unwrap();
        let preview = Document::build(&data, 1000.0, 800.0).unwrap();
        let plan = plan_export(preview.projector(), 4000).unwrap();
        let export = Document::build(&data, plan.width.into(), plan.height.into()).unwrap();

        for (document, scale) in [(&preview, 1.0), (&export, plan.scale)] {
            let (surface, report) = render_raster(document, &config, scale).unwrap();
            let projector = document.projector();

            assert!(report.is_clean());
            assert_eq!(report.ways_drawn, 2);
            let (x, y) = projector.project(51.506, -0.125);
            assert_eq!(
                surface.pixel(x as u32, y as u32),
                Some(house),
                "house at far_lon={far_lon} scale={scale}"
            );
            let (x, y) = projector.project(51.5045, -0.129);
            assert_eq!(
                surface.pixel(x as u32, y as u32),
                Some(primary),
                "road at far_lon={far_lon} scale={scale}"
            );
        }
    }
}
