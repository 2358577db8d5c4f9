use std::fs;

use serde_json::Value;
use tracing::{debug, info};

use crate::chart::ChartDocument;
use crate::error::{Error, Result};
use crate::format::{ConversionRequest, FormatHandler};

/// The intermediate document itself, stored as a `.json` file
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHandler;

impl FormatHandler for JsonHandler {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn probe(&self, data: &[u8]) -> Result<bool> {
        let value: Value = serde_json::from_slice(data)?;
        Ok(value.get("charts").is_some())
    }

    /// Reads the single input document, or merges the charts of every split
    /// input (in part/difficulty order) when there is no single input.
    fn to_json(&self, request: &ConversionRequest) -> Result<ChartDocument> {
        if let Some(input) = &request.input {
            return ChartDocument::from_slice(&fs::read(input)?);
        }

        if request.input_split.is_empty() {
            return Err(Error::Configuration("no chart input given".to_string()));
        }

        let mut merged = ChartDocument::default();
        for ((part, difficulty), path) in &request.input_split {
            debug!("Merging {} {} chart from {:?}", part, difficulty, path);
            let document = ChartDocument::from_slice(&fs::read(path)?)?;
            for (key, value) in document.extra {
                merged.extra.entry(key).or_insert(value);
            }
            merged
                .charts
                .get_or_insert_with(Vec::new)
                .extend(document.charts.unwrap_or_default());
        }
        Ok(merged)
    }

    fn to_chart(&self, document: &ChartDocument, request: &ConversionRequest) -> Result<()> {
        let mut document = document.clone();
        if let Some(music_id) = request.music_id {
            document.extra.insert("musicid".to_string(), Value::from(music_id));
        }

        let path = request
            .output
            .join(format!("{}.json", request.output_stem()));
        fs::write(&path, document.to_json_pretty()?)?;
        info!("Wrote {} charts to {:?}", document.chart_count(), path);
        Ok(())
    }
}
