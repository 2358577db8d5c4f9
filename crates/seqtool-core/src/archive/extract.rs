use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::archive::{
    decode_archive, intermediate_stream, ArchiveType, InstrumentDefaults, SampleEntry, SampleFlag,
    SampleMetadata,
};
use crate::audio::{wav_duration, AudioConverter};
use crate::config::archive::ENTRY_EXTRA;
use crate::error::Result;

/// Options for extracting one sample archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Write sample filenames with hex instead of decimal ids
    pub force_hex: bool,
    pub is_guitar: bool,
}

impl ArchiveOptions {
    pub fn archive_type(&self) -> ArchiveType {
        ArchiveType::from_guitar_flag(self.is_guitar)
    }
}

/// Lowercased file stem of an archive path
pub fn archive_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Name a sample is referred to by in chart data
pub fn sample_filename(stem: &str, sound_id: u32, force_hex: bool) -> String {
    if force_hex {
        format!("{}.{:04x}", stem, sound_id)
    } else {
        format!("{}.{:04}", stem, sound_id)
    }
}

/// Extract every sample of an archive into `output` as WAV files and write
/// the `metadata.json` sidecar beside them.
///
/// Audio files are named `<stem>_<index:04x>.wav`; archives of different
/// parts can share an output folder without clobbering each other's audio.
pub fn extract_archive(
    input: &Path,
    defaults_table: Option<&Path>,
    output: &Path,
    options: ArchiveOptions,
    converter: &dyn AudioConverter,
) -> Result<SampleMetadata> {
    let data = fs::read(input)?;
    let stem = archive_stem(input);
    let archive_type = options.archive_type();

    let archive = decode_archive(&data, archive_type)?;

    let table = defaults_table.map(fs::read).transpose()?;
    let defaults = InstrumentDefaults::from_table(table.as_deref(), &stem)?;

    fs::create_dir_all(output)?;

    let mut metadata = SampleMetadata::new(archive_type, defaults);
    for entry in &archive.entries {
        let payload = archive.payload(&data, entry)?;
        let name = format!("{}_{:04x}", stem, entry.index);
        let pcm_path = output.join(format!("{}.pcm", name));
        let wav_path = output.join(format!("{}.wav", name));

        debug!(
            "Extracting {:?} | {} {} {}",
            wav_path, entry.index, entry.volume, entry.pan
        );
        fs::write(&pcm_path, intermediate_stream(payload, archive_type))?;
        converter.pcm_to_wav(&pcm_path, &wav_path)?;
        fs::remove_file(&pcm_path)?;

        metadata.entries.push(SampleEntry {
            sound_id: entry.index,
            filename: sample_filename(&stem, entry.index, options.force_hex),
            volume: entry.volume,
            pan: entry.pan,
            extra: ENTRY_EXTRA,
            flags: vec![SampleFlag::NoFilename],
            duration: wav_duration(&wav_path)?,
        });
    }

    metadata.save(output)?;
    info!(
        "Extracted {} samples from {:?} ({})",
        metadata.entries.len(),
        input,
        archive_type.tag()
    );
    Ok(metadata)
}

/// Default extraction folder: the archive stem next to the working directory
pub fn default_output_folder(input: &Path) -> PathBuf {
    PathBuf::from(
        input
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_default(),
    )
}
