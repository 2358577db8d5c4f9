use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archive::ByteBuffer;
use crate::config::defaults::{FLOOR_TOM, LEFT_CYMBAL, LEFT_PEDAL, NAME_SIZE, RECORD_SIZE, TABLE_SIZE};
use crate::error::{Error, Result};

/// Default sample id per drum kit slot.
///
/// Field names follow the `metadata.json` sidecar layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentDefaults {
    #[serde(rename = "default_hihat")]
    pub hihat: u16,
    #[serde(rename = "default_snare")]
    pub snare: u16,
    #[serde(rename = "default_bass")]
    pub bass: u16,
    #[serde(rename = "default_hightom")]
    pub hightom: u16,
    #[serde(rename = "default_lowtom")]
    pub lowtom: u16,
    #[serde(rename = "default_rightcymbal")]
    pub rightcymbal: u16,
    #[serde(rename = "default_leftcymbal")]
    pub leftcymbal: u16,
    #[serde(rename = "default_floortom")]
    pub floortom: u16,
    #[serde(rename = "default_leftpedal")]
    pub leftpedal: u16,
}

impl InstrumentDefaults {
    /// Resolve defaults for the archive named `archive_stem`.
    ///
    /// A 12-byte table applies to any archive. A longer table is a list of
    /// 24-byte records keyed by a null-padded name, matched case-insensitively
    /// against the archive stem; the first match wins.
    pub fn from_table(table: Option<&[u8]>, archive_stem: &str) -> Result<Self> {
        // no table: every slot, sentinels included, is zero
        let Some(table) = table else {
            return Ok(Self::default());
        };

        if table.len() == TABLE_SIZE {
            return Self::from_record(table);
        }

        let search = archive_stem.to_lowercase();
        let buf = ByteBuffer::new(table);
        for index in 0..table.len() / RECORD_SIZE {
            let offset = index * RECORD_SIZE;
            let mut record = ByteBuffer::new(buf.slice_at(offset, RECORD_SIZE)?);
            let name = record.read_padded_name(NAME_SIZE)?;

            if name.to_lowercase() == search {
                debug!("Default table record {} matches {}", index, archive_stem);
                return Self::from_record(record.read_bytes(TABLE_SIZE)?);
            }
        }

        Err(Error::DefaultLookupFailed(archive_stem.to_string()))
    }

    /// Six little-endian slots; the remaining three are fixed sentinels.
    fn from_record(record: &[u8]) -> Result<Self> {
        let mut buf = ByteBuffer::new(record);
        Ok(Self {
            hihat: buf.read_u16()?,
            snare: buf.read_u16()?,
            bass: buf.read_u16()?,
            hightom: buf.read_u16()?,
            lowtom: buf.read_u16()?,
            rightcymbal: buf.read_u16()?,
            leftcymbal: LEFT_CYMBAL,
            floortom: FLOOR_TOM,
            leftpedal: LEFT_PEDAL,
        })
    }
}
