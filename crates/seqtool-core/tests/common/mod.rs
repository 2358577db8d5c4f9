//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use seqtool_core::archive::ByteBuffer;
use seqtool_core::{AudioConverter, ContainerExtractor, Result};

/// Decodes intermediate streams into silent WAVs: one 16-bit frame per two
/// payload bytes, at the rate written in the stream header.
#[derive(Default)]
pub struct SilentConverter {
    pub converted: Mutex<Vec<PathBuf>>,
}

impl AudioConverter for SilentConverter {
    fn pcm_to_wav(&self, input: &Path, output: &Path) -> Result<()> {
        let data = fs::read(input)?;
        let header = ByteBuffer::new(&data).slice_at(0, 8)?;
        let size = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let rate = u16::from_be_bytes([header[6], header[7]]);
        write_silence(output, u32::from(rate), size as usize / 2);
        self.converted.lock().unwrap().push(input.to_path_buf());
        Ok(())
    }

    fn bgm_to_wav(&self, input: &Path, output: &Path) -> Result<()> {
        write_silence(output, 44100, 441);
        self.converted.lock().unwrap().push(input.to_path_buf());
        Ok(())
    }
}

pub fn write_silence(path: &Path, rate: u32, frames: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..frames {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Extractor that must never be reached (inputs are directories)
pub struct NoExtractor;

impl ContainerExtractor for NoExtractor {
    fn extract(&self, container: &Path, _dest: &Path) -> Result<Vec<PathBuf>> {
        panic!("unexpected container extraction of {:?}", container);
    }
}

/// Build a sample archive whose entries carry the given raw pans and payload sizes.
pub fn build_archive(pans: &[u8], payload_sizes: &[usize]) -> Vec<u8> {
    assert_eq!(pans.len(), payload_sizes.len());
    let count = pans.len();

    let mut data = (count as u32).to_le_bytes().to_vec();
    let mut offset = 0u32;
    for (i, size) in payload_sizes.iter().enumerate() {
        data.extend(((i * 12) as u32).to_le_bytes());
        data.extend(offset.to_le_bytes());
        data.extend((*size as u32).to_le_bytes());
        offset += *size as u32;
    }
    for (i, pan) in pans.iter().enumerate() {
        data.extend([0, 100 + i as u8, *pan, i as u8, 0, 0, 0, 0, 0, 0]);
        data.extend(32000u16.to_le_bytes());
    }
    for (i, size) in payload_sizes.iter().enumerate() {
        data.extend(std::iter::repeat(i as u8).take(*size));
    }
    data
}

/// A JSON chart document with one chart per `(game_type, difficulty)`.
pub fn chart_json(charts: &[(u8, u8)]) -> String {
    let charts: Vec<String> = charts
        .iter()
        .map(|(game_type, difficulty)| {
            format!(
                r#"{{"header": {{"difficulty": {}, "game_type": {}, "is_metadata": 0}}, "events": []}}"#,
                difficulty, game_type
            )
        })
        .collect();
    format!(r#"{{"musicid": 1, "charts": [{}]}}"#, charts.join(","))
}
