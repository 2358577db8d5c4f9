use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::chart::{Difficulty, Part};
use crate::error::{Error, Result};

/// Intermediate chart document exchanged between format handlers.
///
/// Only the fields the core reads are typed; everything else a handler
/// emits is carried in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<Vec<ChartEntry>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub header: ChartHeader,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartHeader {
    pub difficulty: u8,
    pub game_type: u8,
    #[serde(default, deserialize_with = "flag_from_bool_or_int")]
    pub is_metadata: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartDocument {
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn chart_count(&self) -> usize {
        self.charts.as_ref().map_or(0, Vec::len)
    }
}

impl ChartEntry {
    pub fn new(difficulty: Difficulty, part: Part) -> Self {
        Self {
            header: ChartHeader {
                difficulty: difficulty as u8,
                game_type: part as u8,
                is_metadata: false,
                extra: Map::new(),
            },
            body: Map::new(),
        }
    }

    pub fn metadata(difficulty: u8) -> Self {
        Self {
            header: ChartHeader {
                difficulty,
                game_type: 0,
                is_metadata: true,
                extra: Map::new(),
            },
            body: Map::new(),
        }
    }
}

impl ChartHeader {
    pub fn difficulty(&self) -> Result<Difficulty> {
        Difficulty::from_u8(self.difficulty).ok_or_else(|| {
            Error::InvalidChart(format!("difficulty {} out of range", self.difficulty))
        })
    }

    pub fn part(&self) -> Result<Part> {
        Part::from_game_type(self.game_type)
            .ok_or_else(|| Error::InvalidChart(format!("game_type {} out of range", self.game_type)))
    }
}

/// Handlers emit `is_metadata` as either a JSON bool or 0/1.
fn flag_from_bool_or_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_unknown_fields() {
        let json = br#"{
            "musicid": 1234,
            "charts": [
                {"header": {"difficulty": 2, "game_type": 1, "is_metadata": 0, "time_division": 300},
                 "timing": [1, 2, 3]}
            ]
        }"#;
        let doc = ChartDocument::from_slice(json).unwrap();

        assert_eq!(doc.chart_count(), 1);
        assert_eq!(doc.extra["musicid"], 1234);

        let chart = &doc.charts.as_ref().unwrap()[0];
        assert!(!chart.header.is_metadata);
        assert_eq!(chart.header.extra["time_division"], 300);
        assert_eq!(chart.body["timing"], serde_json::json!([1, 2, 3]));

        let written = doc.to_json_pretty().unwrap();
        let reparsed = ChartDocument::from_slice(written.as_bytes()).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_is_metadata_accepts_bool_and_int() {
        let doc = ChartDocument::from_slice(
            br#"{"charts": [
                {"header": {"difficulty": 0, "game_type": 0, "is_metadata": true}},
                {"header": {"difficulty": 0, "game_type": 0, "is_metadata": 1}},
                {"header": {"difficulty": 0, "game_type": 0}}
            ]}"#,
        )
        .unwrap();
        let flags: Vec<bool> = doc
            .charts
            .unwrap()
            .iter()
            .map(|c| c.header.is_metadata)
            .collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_out_of_range_header_is_error() {
        let mut entry = ChartEntry::new(Difficulty::Master, Part::Open);
        assert_eq!(entry.header.difficulty().unwrap(), Difficulty::Master);
        assert_eq!(entry.header.part().unwrap(), Part::Open);

        entry.header.difficulty = 5;
        entry.header.game_type = 4;
        assert!(matches!(entry.header.difficulty(), Err(Error::InvalidChart(_))));
        assert!(matches!(entry.header.part(), Err(Error::InvalidChart(_))));
    }

    #[test]
    fn test_document_without_charts() {
        let doc = ChartDocument::from_slice(br#"{"bgm": "song.wav"}"#).unwrap();
        assert!(doc.charts.is_none());
        assert_eq!(doc.chart_count(), 0);
        assert!(!doc.to_json_pretty().unwrap().contains("charts"));
    }
}
