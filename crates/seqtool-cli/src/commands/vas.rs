use std::path::Path;

use anyhow::{Context, Result};
use seqtool_core::archive::default_output_folder;
use seqtool_core::{extract_archive, ArchiveOptions, Error, SampleMetadata, VgmstreamConverter};
use tracing::info;

use crate::cli::VasArgs;

pub fn run(args: VasArgs, vgmstream: &Path) -> Result<SampleMetadata> {
    if !args.guitar && args.input_fre.is_none() {
        return Err(Error::Configuration(
            "Drum archives need a default keysound table (-r/--input-fre)".to_string(),
        )
        .into());
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output_folder(&args.input));
    let options = ArchiveOptions {
        force_hex: args.force_hex,
        is_guitar: args.guitar,
    };

    info!("Extracting {:?} to {:?}", args.input, output);
    let metadata = extract_archive(
        &args.input,
        args.input_fre.as_deref(),
        &output,
        options,
        &VgmstreamConverter::new(vgmstream),
    )
    .with_context(|| format!("Failed to extract {:?}", args.input))?;
    Ok(metadata)
}
