//! Format constants and run configuration.
//!
//! This module contains:
//! - Sample archive layout constants
//! - Container member naming conventions
//! - `RunConfig` - the plain configuration a conversion run is driven by

mod run;

pub use run::*;

/// Sample archive layout.
pub mod archive {
    /// Size of the leading entry count field.
    pub const COUNT_SIZE: usize = 0x04;

    /// Size of one entry table record (metadata offset, data offset, size).
    pub const ENTRY_SIZE: usize = 0x0c;

    /// Size of one metadata table record.
    pub const METADATA_SIZE: usize = 0x0c;

    /// Sample rate every archive entry is decoded at, whatever the record says.
    pub const FORCED_SAMPLE_RATE: u16 = 22050;

    /// Sample rate written into drum intermediate streams.
    pub const DRUM_STREAM_SAMPLE_RATE: u16 = 44100;

    /// Zero padding between the intermediate header and the payload.
    pub const STREAM_PADDING: usize = 0x800;

    /// Pan offset applied to guitar archives.
    pub const GUITAR_PAN_OFFSET: i16 = 64;

    /// Pan offset applied to drum archives.
    pub const DRUM_PAN_OFFSET: i16 = -100;

    /// Value of the reserved `extra` field on every emitted entry.
    pub const ENTRY_EXTRA: u8 = 255;

    /// Name of the sidecar written beside extracted sounds.
    pub const METADATA_FILENAME: &str = "metadata.json";
}

/// Default keysound tables.
pub mod defaults {
    /// Size of a bare default table (six u16 values).
    pub const TABLE_SIZE: usize = 12;

    /// Size of one named record in a multi-song table.
    pub const RECORD_SIZE: usize = 0x18;

    /// Size of the null-padded name at the start of a named record.
    pub const NAME_SIZE: usize = 12;

    pub const LEFT_CYMBAL: u16 = 0xfff0;
    pub const FLOOR_TOM: u16 = 0xfff1;
    pub const LEFT_PEDAL: u16 = 0xfff2;
}

/// Container member naming.
pub mod members {
    /// Chart extensions tried when no target is configured, in priority order.
    pub const DEFAULT_CHART_EXTENSIONS: [&str; 2] = ["sq3", "sq2"];

    /// Event extensions tried when no target is configured, in priority order.
    pub const DEFAULT_EVENT_EXTENSIONS: [&str; 2] = ["ev2", "evt"];

    /// Extension of sample archives inside a sequence container.
    pub const SAMPLE_ARCHIVE_EXTENSION: &str = "va3";

    /// Extension of background music members inside a BGM container.
    pub const BGM_EXTENSION: &str = "bin";

    /// Leading (charts) or trailing (archives) marker of drum members.
    pub const DRUM_MARKER: char = 'd';

    /// Leading (charts) or trailing (archives) marker of guitar members.
    pub const GUITAR_MARKER: char = 'g';
}

/// Output format that renders audio instead of chart files.
pub const WAV_FORMAT: &str = "wav";

/// Output format token that reuses the input format.
pub const SAME_FORMAT: &str = "same";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_correction_constants() {
        // count field plus both tables counted twice
        let count = 3;
        let correction = (count * archive::ENTRY_SIZE) * 2 + archive::COUNT_SIZE;
        assert_eq!(correction, 76);
    }

    #[test]
    fn test_named_record_layout() {
        assert_eq!(defaults::NAME_SIZE + defaults::TABLE_SIZE, defaults::RECORD_SIZE);
    }
}
