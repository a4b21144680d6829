use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use xz::bufread::XzDecoder;

use crate::data::osm::{Bounds, Node, OsmId, Relation, Way};
use crate::data::OsmMapData;
use crate::errors::{Error, Result};

const LAT_LIMIT: f64 = 90.0;
const LON_LIMIT: f64 = 180.0;

enum ParserState {
    Top,
    Node,
    Way(Way),
    Relation(Relation),
}

/// Streaming reader for `.osm` XML.
pub struct OsmParser<R: BufRead> {
    reader: Reader<R>,
    state: ParserState,
    data: OsmMapData,
}

impl<R: BufRead> OsmParser<R> {
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(true);
        OsmParser {
            reader,
            state: ParserState::Top,
            data: OsmMapData::default(),
        }
    }

    pub fn parse(mut self) -> Result<OsmMapData> {
        let mut buf = Vec::new();
        loop {
            let event = match self.reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(quick_xml::Error::Io(err)) => {
                    return Err(io::Error::new(err.kind(), err.to_string()).into())
                }
                Err(err) => {
                    let position = self.reader.buffer_position();
                    return Err(Error::malformed(position, err.to_string()));
                }
            };
            match event {
                Event::Eof => break,
                Event::Start(element) => self.open(&element, false)?,
                Event::Empty(element) => self.open(&element, true)?,
                Event::End(element) => self.close(element.name().as_ref()),
                _ => (),
            }
            buf.clear();
        }

        if !matches!(self.state, ParserState::Top) {
            return Err(Error::malformed(
                self.reader.buffer_position(),
                "file ends inside an element",
            ));
        }
        Ok(self.data)
    }

    fn open(&mut self, element: &BytesStart, empty: bool) -> Result<()> {
        let position = self.reader.buffer_position();
        match (&mut self.state, element.name().as_ref()) {
            (ParserState::Top, b"bounds") => {
                self.data.bounds = Some(parse_bounds(element, position)?);
            }
            (ParserState::Top, b"node") => {
                self.data.nodes.push(parse_node(element, position)?);
                if !empty {
                    self.state = ParserState::Node;
                }
            }
            (ParserState::Top, b"way") => {
                let way = Way {
                    id: parse_id(element, "way", position)?,
                    ..Default::default()
                };
                if empty {
                    self.data.ways.insert(way.id, way);
                } else {
                    self.state = ParserState::Way(way);
                }
            }
            (ParserState::Top, b"relation") => {
                let relation = Relation {
                    id: parse_id(element, "relation", position)?,
                    ..Default::default()
                };
                if empty {
                    self.data.relations.insert(relation.id, relation);
                } else {
                    self.state = ParserState::Relation(relation);
                }
            }
            (ParserState::Way(way), b"nd") => {
                let [node_ref] = read_attributes(element, ["ref"], position)?;
                way.node_ids.push(required(node_ref, "nd", "ref", position)?);
            }
            (ParserState::Way(way), b"tag") => {
                let (key, value) = parse_tag(element, position)?;
                way.tags.insert(key, value);
            }
            (ParserState::Relation(relation), b"member") => {
                let [member_type, member_ref] =
                    read_attributes(element, ["type", "ref"], position)?;
                if member_type.as_deref() == Some("way") {
                    relation.way_ids.push(required(member_ref, "member", "ref", position)?);
                }
            }
            (ParserState::Relation(relation), b"tag") => {
                let (key, value) = parse_tag(element, position)?;
                relation.tags.insert(key, value);
            }
            (_, name) => {
                debug!(element = &*String::from_utf8_lossy(name); "Skipping element");
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        let closes_state = matches!(
            (&self.state, name),
            (ParserState::Node, b"node")
                | (ParserState::Way(_), b"way")
                | (ParserState::Relation(_), b"relation")
        );
        if !closes_state {
            return;
        }
        match std::mem::replace(&mut self.state, ParserState::Top) {
            ParserState::Way(way) => {
                self.data.ways.insert(way.id, way);
            }
            ParserState::Relation(relation) => {
                self.data.relations.insert(relation.id, relation);
            }
            ParserState::Node | ParserState::Top => (),
        }
    }
}

/// Parses an `.osm` document from any buffered reader.
pub fn parse_osm<R: BufRead>(input: R) -> Result<OsmMapData> {
    OsmParser::new(input).parse()
}

/// Reads an extract from disk, decompressing `.xz` files on the fly.
pub fn read_osm_file(path: &Path) -> Result<OsmMapData> {
    let file_reader = BufReader::new(File::open(path)?);
    let is_xz = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("xz"));

    let data = if is_xz {
        let xz_reader = XzDecoder::new(file_reader);
        parse_osm(BufReader::new(xz_reader))?
    } else {
        parse_osm(file_reader)?
    };

    info!(
        path = path.display().to_string().as_str(),
        nodes = data.nodes.len(),
        ways = data.ways.len(),
        relations = data.relations.len();
        "Parsed extract"
    );
    Ok(data)
}

fn read_attributes<const N: usize>(
    element: &BytesStart,
    names: [&str; N],
    position: usize,
) -> Result<[Option<String>; N]> {
    let mut values: [Option<String>; N] = std::array::from_fn(|_| None);
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|err| Error::malformed(position, err.to_string()))?;
        let Some(index) = names
            .iter()
            .position(|name| attribute.key.as_ref() == name.as_bytes())
        else {
            continue;
        };
        let value = attribute
            .unescape_value()
            .map_err(|err| Error::malformed(position, err.to_string()))?;
        values[index] = Some(value.into_owned());
    }
    Ok(values)
}

fn required<T: FromStr>(
    value: Option<String>,
    element: &str,
    name: &str,
    position: usize,
) -> Result<T> {
    let value =
        value.ok_or_else(|| Error::malformed(position, format!("<{element}> without '{name}'")))?;
    value.trim().parse().map_err(|_| {
        Error::malformed(position, format!("<{element}> has invalid {name}=\"{value}\""))
    })
}

/// Degrees within `[-limit, limit]`. `f64` parsing alone lets `NaN` and `inf` through.
fn coordinate(
    value: Option<String>,
    element: &str,
    name: &str,
    limit: f64,
    position: usize,
) -> Result<f64> {
    let degrees: f64 = required(value, element, name, position)?;
    if !(degrees.is_finite() && (-limit..=limit).contains(&degrees)) {
        return Err(Error::malformed(
            position,
            format!("<{element}> has {name}=\"{degrees}\" outside [-{limit}, {limit}]"),
        ));
    }
    Ok(degrees)
}

fn parse_id(element: &BytesStart, name: &str, position: usize) -> Result<OsmId> {
    let [id] = read_attributes(element, ["id"], position)?;
    required(id, name, "id", position)
}

fn parse_bounds(element: &BytesStart, position: usize) -> Result<Bounds> {
    let [min_lat, max_lat, min_lon, max_lon] =
        read_attributes(element, ["minlat", "maxlat", "minlon", "maxlon"], position)?;
    Ok(Bounds {
        min_lat: coordinate(min_lat, "bounds", "minlat", LAT_LIMIT, position)?,
        max_lat: coordinate(max_lat, "bounds", "maxlat", LAT_LIMIT, position)?,
        min_lon: coordinate(min_lon, "bounds", "minlon", LON_LIMIT, position)?,
        max_lon: coordinate(max_lon, "bounds", "maxlon", LON_LIMIT, position)?,
    })
}

fn parse_node(element: &BytesStart, position: usize) -> Result<Node> {
    let [id, lat, lon] = read_attributes(element, ["id", "lat", "lon"], position)?;
    Ok(Node {
        id: required(id, "node", "id", position)?,
        lat: coordinate(lat, "node", "lat", LAT_LIMIT, position)?,
        lon: coordinate(lon, "node", "lon", LON_LIMIT, position)?,
    })
}

fn parse_tag(element: &BytesStart, position: usize) -> Result<(String, String)> {
    let [key, value] = read_attributes(element, ["k", "v"], position)?;
    Ok((
        key.ok_or_else(|| Error::malformed(position, "<tag> without 'k'"))?,
        value.ok_or_else(|| Error::malformed(position, "<tag> without 'v'"))?,
    ))
}
