use std::fs;

use strum::IntoStaticStr;
use tracing::{debug, info};

use crate::chart::filter_charts;
use crate::config::{SAME_FORMAT, WAV_FORMAT};
use crate::error::Result;
use crate::format::{ConversionRequest, FormatRegistry};

/// Steps of a single conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Stage {
    Resolve,
    Decode,
    Filter,
    EncodePrep,
    Encode,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Convert one input through the intermediate document to the output format.
///
/// The output handler falls back to the input handler when the output
/// format names no registered handler. A missing input handler is fatal
/// for this conversion.
pub fn process_file(request: &ConversionRequest, registry: &FormatRegistry) -> Result<Stage> {
    let mut stage = Stage::Resolve;
    debug!("{}: {:?}", stage, request.input);

    let output_format = if request.output_format.eq_ignore_ascii_case(SAME_FORMAT) {
        request.input_format.clone().unwrap_or_default()
    } else {
        request.output_format.clone()
    };

    let input_handler = registry.require(request.input.as_deref(), request.input_format.as_deref())?;
    let output_handler = registry
        .resolve(None, Some(&output_format))
        .unwrap_or_else(|| input_handler.clone());
    info!(
        "Using {} handler to process {}",
        input_handler.format_name(),
        request.output_stem()
    );

    stage = Stage::Decode;
    debug!("{}", stage);
    let document = input_handler.to_json(request)?;

    stage = Stage::Filter;
    debug!("{}", stage);
    let document = filter_charts(document, &request.selection)?;

    stage = Stage::EncodePrep;
    debug!("{}", stage);
    if !output_format.eq_ignore_ascii_case(WAV_FORMAT) && !request.output.exists() {
        fs::create_dir_all(&request.output)?;
    }

    stage = Stage::Encode;
    debug!("{} with {}", stage, output_handler.format_name());
    output_handler.to_chart(&document, request)?;

    stage = Stage::Done;
    Ok(stage)
}
