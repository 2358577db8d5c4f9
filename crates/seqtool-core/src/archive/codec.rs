//! Sample archive table decoding.
//!
//! Layout (all little-endian):
//!
//! ```text
//! 0x00            i32 entry count
//! 0x04            count x { u32 metadata_offset, u32 data_offset, u32 size }
//! 0x04 + count*12 metadata table, records addressed by metadata_offset:
//!                 { u8 unk, u8 volume, u8 pan, u8 sound_id, u8 instrument_id,
//!                   3 x u8 reserved, u16 unk, u16 sample_rate }
//! ```
//!
//! Stored data offsets are short by `count*12*2 + 4`.

use tracing::debug;

use crate::archive::{ArchiveType, ByteBuffer};
use crate::config::archive::{
    COUNT_SIZE, DRUM_STREAM_SAMPLE_RATE, ENTRY_SIZE, FORCED_SAMPLE_RATE, METADATA_SIZE,
    STREAM_PADDING,
};
use crate::error::{Error, Result};

/// One metadata table record as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataRecord {
    pub volume: u8,
    pub pan: u8,
    pub sound_id: u8,
    pub instrument_id: u8,
    /// Stored rate; not trusted for output
    pub sample_rate: u16,
}

/// One decoded archive entry with its payload location resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub payload_offset: usize,
    pub payload_size: usize,
    pub index: u32,
    pub volume: u8,
    /// Remapped pan
    pub pan: i16,
    pub record: MetadataRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArchive {
    pub archive_type: ArchiveType,
    pub entries: Vec<ArchiveEntry>,
    /// Total archive length; no payload may extend past it
    pub boundary: usize,
}

impl DecodedArchive {
    pub fn payload<'a>(&self, data: &'a [u8], entry: &ArchiveEntry) -> Result<&'a [u8]> {
        ByteBuffer::new(&data[..self.boundary.min(data.len())])
            .slice_at(entry.payload_offset, entry.payload_size)
    }
}

/// Decode the entry and metadata tables of a sample archive.
pub fn decode_archive(data: &[u8], archive_type: ArchiveType) -> Result<DecodedArchive> {
    let mut buf = ByteBuffer::new(data);
    let count = buf.read_i32()?;
    if count <= 0 {
        return Err(Error::EmptyArchive(format!("{} entries", count)));
    }
    let count = count as usize;

    let entry_table_size = count
        .checked_mul(ENTRY_SIZE)
        .ok_or_else(|| Error::decode(0, format!("entry count {} overflows", count)))?;
    let metadata_start = COUNT_SIZE + entry_table_size;
    let correction = entry_table_size * 2 + COUNT_SIZE;
    let boundary = data.len();
    if metadata_start > boundary {
        return Err(Error::decode(
            COUNT_SIZE,
            format!("{} entries do not fit in {} bytes", count, boundary),
        ));
    }

    let mut entries = Vec::with_capacity(count);
    for index in 0..count {
        let mut entry = ByteBuffer::at(data, COUNT_SIZE + index * ENTRY_SIZE)?;
        let metadata_offset = entry.read_u32()? as usize;
        let data_offset = entry.read_u32()? as usize;
        let payload_size = entry.read_u32()? as usize;

        let record_offset = metadata_start
            .checked_add(metadata_offset)
            .ok_or_else(|| Error::decode(metadata_start, "metadata offset overflow"))?;
        let record = read_metadata_record(data, record_offset)?;

        let payload_offset = data_offset
            .checked_add(correction)
            .ok_or_else(|| Error::decode(entry.position(), "data offset overflow"))?;
        if payload_offset.saturating_add(payload_size) > boundary {
            return Err(Error::decode(
                payload_offset,
                format!(
                    "entry {} payload of {} bytes exceeds archive length {}",
                    index, payload_size, boundary
                ),
            ));
        }

        debug!(
            "{:04x} | {:08x} {:08x} {:08x} | vol {} pan {} id {} inst {} rate {}",
            index,
            metadata_offset,
            payload_offset,
            payload_size,
            record.volume,
            record.pan,
            record.sound_id,
            record.instrument_id,
            record.sample_rate
        );

        entries.push(ArchiveEntry {
            payload_offset,
            payload_size,
            index: index as u32,
            volume: record.volume,
            pan: archive_type.remap_pan(record.pan),
            record,
        });
    }

    Ok(DecodedArchive {
        archive_type,
        entries,
        boundary,
    })
}

fn read_metadata_record(data: &[u8], offset: usize) -> Result<MetadataRecord> {
    let mut buf = ByteBuffer::new(ByteBuffer::new(data).slice_at(offset, METADATA_SIZE)?);
    buf.skip(1)?;
    let volume = buf.read_u8()?;
    let pan = buf.read_u8()?;
    let sound_id = buf.read_u8()?;
    let instrument_id = buf.read_u8()?;
    buf.skip(3 + 2)?;
    let sample_rate = buf.read_u16()?;

    Ok(MetadataRecord {
        volume,
        pan,
        sound_id,
        instrument_id,
        sample_rate,
    })
}

/// Sample rate written into the intermediate stream header
pub fn stream_sample_rate(archive_type: ArchiveType) -> u16 {
    match archive_type {
        ArchiveType::Guitar => FORCED_SAMPLE_RATE,
        ArchiveType::Drum => DRUM_STREAM_SAMPLE_RATE,
    }
}

/// Build the headered stream the PCM converter consumes:
/// `[size u32 BE][2 reserved][rate u16 BE][channels u8][7 reserved][0x800 pad][payload]`
pub fn intermediate_stream(payload: &[u8], archive_type: ArchiveType) -> Vec<u8> {
    let mut stream = Vec::with_capacity(16 + STREAM_PADDING + payload.len());
    stream.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    stream.extend_from_slice(&[0, 0]);
    stream.extend_from_slice(&stream_sample_rate(archive_type).to_be_bytes());
    stream.push(1);
    stream.extend_from_slice(&[0; 7]);
    stream.resize(stream.len() + STREAM_PADDING, 0);
    stream.extend_from_slice(payload);
    stream
}
