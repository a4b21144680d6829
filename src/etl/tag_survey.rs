use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use log::info;
use serde::Serialize;

use super::parse_osm::read_osm_file;
use super::Etl;
use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::data::document::Document;
use crate::data::OsmMapData;
use crate::errors::Result;
use crate::style::{Category, StyleConfig, StyleResolver, StyleStore};

pub const ETL_NAME: &str = "tag_survey";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyEntry {
    pub category: Category,
    pub value: String,
    /// `None` when the style table does not know the value.
    pub style_key: Option<&'static str>,
    pub enabled: Option<bool>,
}

/// Every drawable tag value an extract uses, and how it would be styled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagSurvey {
    pub entries: Vec<SurveyEntry>,
}

impl TagSurvey {
    pub fn collect(document: &Document, config: &StyleConfig) -> Self {
        let resolver = StyleResolver::new(config);
        let entries = document
            .used_tags()
            .into_iter()
            .flat_map(|(category, values)| values.into_iter().map(move |value| (category, value)))
            .map(|(category, value)| {
                let style_key = resolver.resolve(category, &value).ok();
                SurveyEntry {
                    category,
                    enabled: style_key.map(|key| resolver.is_enabled(key)),
                    style_key,
                    value,
                }
            })
            .collect();
        TagSurvey { entries }
    }

    /// Values that need a style table entry before they can be drawn.
    pub fn unknown(&self) -> impl Iterator<Item = &SurveyEntry> {
        self.entries.iter().filter(|entry| entry.style_key.is_none())
    }
}

/// Lists the tags of an extract as JSON, to a file or stdout.
pub struct TagSurveyEtl<'a> {
    input: PathBuf,
    output: Option<PathBuf>,
    store: &'a mut dyn StyleStore,
}

impl<'a> TagSurveyEtl<'a> {
    pub fn new(
        input: PathBuf,
        output: Option<PathBuf>,
        store: &'a mut dyn StyleStore,
    ) -> TagSurveyEtl<'a> {
        TagSurveyEtl { input, output, store }
    }
}

impl Etl for TagSurveyEtl<'_> {
    type Input = OsmMapData;
    type Transformed = TagSurvey;
    type Output = TagSurvey;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn extract(&mut self) -> Result<Self::Input> {
        read_osm_file(&self.input)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Transformed> {
        let config = self.store.read()?;
        let document = Document::build(&input, DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
        let survey = TagSurvey::collect(&document, &config);
        info!(
            etl_name = ETL_NAME,
            values = survey.entries.len(),
            unknown = survey.unknown().count();
            "Surveyed tags"
        );
        Ok(survey)
    }

    fn load(&mut self, survey: Self::Transformed) -> Result<Self::Output> {
        match &self.output {
            Some(path) => {
                let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
                if let Some(parent) = parent {
                    fs::create_dir_all(parent)?;
                }
                let mut writer = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(&mut writer, &survey)?;
                writer.flush()?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, &survey)?;
                writeln!(stdout)?;
            }
        }
        Ok(survey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::parse_osm::parse_osm;

    const EXTRACT: &str = r#"<osm>
  <bounds minlat="0" minlon="0" maxlat="1" maxlon="1"/>
  <way id="1"><tag k="highway" v="primary"/></way>
  <way id="2"><tag k="highway" v="hoverlane"/><tag k="building" v="house"/></way>
  <relation id="3"><tag k="natural" v="water"/></relation>
</osm>"#;

    #[test]
    fn survey_marks_known_and_unknown_values() {
        let data = parse_osm(EXTRACT.as_bytes()).unwrap();
        let document = Document::build(&data, 100.0, 100.0).unwrap();
        let config = StyleConfig::default().with_enabled("House Style", false).unwrap();

        let survey = TagSurvey::collect(&document, &config);

        assert_eq!(survey.entries.len(), 4);
        assert_eq!(
            survey.unknown().collect::<Vec<_>>(),
            [&SurveyEntry {
                category: Category::Highway,
                value: "hoverlane".into(),
                style_key: None,
                enabled: None,
            }]
        );
        let house = survey.entries.iter().find(|entry| entry.value == "house").unwrap();
        assert_eq!(house.style_key, Some("House Style"));
        assert_eq!(house.enabled, Some(false));
    }

    #[test]
    fn survey_serializes_categories_as_tag_keys() {
        let data = parse_osm(EXTRACT.as_bytes()).unwrap();
        let document = Document::build(&data, 100.0, 100.0).unwrap();

        let survey = TagSurvey::collect(&document, &StyleConfig::default());
        let json = serde_json::to_string(&survey).unwrap();

        assert!(json.contains(r#""category":"natural""#));
        assert!(json.contains(r#""style_key":"Water Style""#));
    }
}
