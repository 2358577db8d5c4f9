use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::archive::InstrumentDefaults;
use crate::config::archive::{DRUM_PAN_OFFSET, GUITAR_PAN_OFFSET, METADATA_FILENAME};
use crate::error::Result;

/// Sample archive variant, named by its sidecar type tag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
pub enum ArchiveType {
    #[serde(rename = "GDXG")]
    #[strum(serialize = "GDXG")]
    Guitar,
    #[serde(rename = "GDXH")]
    #[strum(serialize = "GDXH")]
    Drum,
}

impl ArchiveType {
    pub fn from_guitar_flag(is_guitar: bool) -> Self {
        if is_guitar { Self::Guitar } else { Self::Drum }
    }

    pub fn tag(&self) -> &'static str {
        self.into()
    }

    /// Stored pan for a raw pan byte
    pub fn remap_pan(&self, raw: u8) -> i16 {
        let offset = match self {
            Self::Guitar => GUITAR_PAN_OFFSET,
            Self::Drum => DRUM_PAN_OFFSET,
        };
        i16::from(raw) + offset
    }
}

/// Per-sample flags, stored by name in the sidecar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleFlag {
    /// 0x04
    DefaultSound,
    /// 0x0100
    NoFilename,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleEntry {
    pub sound_id: u32,
    pub filename: String,
    pub volume: u8,
    pub pan: i16,
    pub extra: u8,
    pub flags: Vec<SampleFlag>,
    /// Seconds, millisecond precision
    pub duration: f64,
}

/// The `metadata.json` sidecar describing an extracted archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetadata {
    #[serde(rename = "type")]
    pub archive_type: ArchiveType,
    pub version: u32,
    pub defaults: InstrumentDefaults,
    pub gdx_type_unk1: u32,
    pub gdx_volume_flag: u32,
    pub entries: Vec<SampleEntry>,
}

impl SampleMetadata {
    pub fn new(archive_type: ArchiveType, defaults: InstrumentDefaults) -> Self {
        Self {
            archive_type,
            version: 1,
            defaults,
            gdx_type_unk1: 0,
            gdx_volume_flag: 1,
            entries: Vec::new(),
        }
    }

    /// Write `metadata.json` into `folder`.
    ///
    /// The document is written to a temporary sibling and renamed into place,
    /// so a reader never sees a partially written sidecar even when several
    /// archives extract into the same folder. The folder holds one sidecar:
    /// the last archive saved wins, and replacing an existing one is logged.
    pub fn save(&self, folder: &Path) -> Result<()> {
        let path = folder.join(METADATA_FILENAME);
        if path.exists() {
            warn!(
                "Replacing existing {:?} with {} metadata",
                path,
                self.archive_type.tag()
            );
        }
        let mut file = tempfile::NamedTempFile::new_in(folder)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        file.persist(&path).map_err(|e| e.error)?;
        debug!("Wrote {:?}", path);
        Ok(())
    }
}

/// Read the sidecar of a sound folder; a missing sidecar is not an error.
pub fn load_sound_metadata(folder: Option<&Path>) -> Result<Option<SampleMetadata>> {
    let Some(folder) = folder else {
        return Ok(None);
    };

    let path = folder.join(METADATA_FILENAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
