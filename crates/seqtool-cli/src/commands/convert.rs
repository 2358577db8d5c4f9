use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use seqtool_core::format::parse_split_input;
use seqtool_core::{
    ContainerInput, IfsToolsExtractor, RunConfig, RunReport, Selection, Toolkit,
    VgmstreamConverter,
};
use tracing::info;

use crate::cli::ConvertArgs;

/// Map parsed arguments onto the core run configuration.
pub fn build_config(args: ConvertArgs) -> Result<RunConfig> {
    let mut input_split = seqtool_core::format::SplitInputs::new();
    for token in &args.input_split {
        let (key, path) = parse_split_input(token)?;
        input_split.insert(key, path);
    }

    let container = args.input_ifs_seq.map(|sequence| ContainerInput {
        sequence,
        bgm: args.input_ifs_bgm,
        target: args.ifs_target,
    });

    Ok(RunConfig {
        input: args.input,
        input_format: args.input_format,
        input_split,
        container,
        sound_folder: args.sound_folder,
        event_file: args.event_file,
        sound_defaults: args.sound_defaults,
        output: args.output,
        output_format: args.output_format,
        selection: Selection::normalized(args.parts, args.difficulty),
        single_threaded: args.single_threaded,
        no_sounds: args.no_sounds,
        music_id: args.music_id,
    })
}

pub fn run(args: ConvertArgs, vgmstream: &Path, ifstools: &Path) -> Result<RunReport> {
    let config = build_config(args)?;
    let toolkit = Toolkit::new(
        Arc::new(VgmstreamConverter::new(vgmstream)),
        Arc::new(IfsToolsExtractor::new(ifstools)),
    );

    info!("Converting to {} in {:?}", config.output_format, config.output);
    let report = seqtool_core::run(&config, &toolkit).context("Conversion failed")?;
    Ok(report)
}
