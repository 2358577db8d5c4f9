//! Audio conversion boundary.
//!
//! Sample archives and BGM containers carry encoded audio that an external
//! decoder turns into WAV files. The core only needs the `AudioConverter`
//! trait; `VgmstreamConverter` is the implementation the CLI wires in.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Turns encoded audio into playable WAV files.
pub trait AudioConverter: Send + Sync {
    /// Decode an intermediate headered PCM stream (see `archive::intermediate_stream`).
    fn pcm_to_wav(&self, input: &Path, output: &Path) -> Result<()>;

    /// Decode a BGM container member.
    fn bgm_to_wav(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Runs an external vgmstream-compatible decoder: `<program> -o <output> <input>`.
#[derive(Debug, Clone)]
pub struct VgmstreamConverter {
    program: PathBuf,
}

impl VgmstreamConverter {
    pub const DEFAULT_PROGRAM: &'static str = "vgmstream-cli";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, input: &Path, output: &Path) -> Result<()> {
        debug!("{:?} -o {:?} {:?}", self.program, output, input);
        let result = Command::new(&self.program)
            .arg("-o")
            .arg(output)
            .arg(input)
            .output()
            .map_err(|e| Error::Tool {
                program: self.program.display().to_string(),
                message: e.to_string(),
            })?;

        if !result.status.success() {
            return Err(Error::Tool {
                program: self.program.display().to_string(),
                message: format!(
                    "{} ({})",
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }
        if !output.exists() {
            return Err(Error::Tool {
                program: self.program.display().to_string(),
                message: format!("no output written to {:?}", output),
            });
        }
        Ok(())
    }
}

impl Default for VgmstreamConverter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl AudioConverter for VgmstreamConverter {
    fn pcm_to_wav(&self, input: &Path, output: &Path) -> Result<()> {
        self.run(input, output)
    }

    fn bgm_to_wav(&self, input: &Path, output: &Path) -> Result<()> {
        self.run(input, output)
    }
}

/// Length of a WAV file in seconds, rounded to the millisecond.
pub fn wav_duration(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path)?;
    let rate = reader.spec().sample_rate;
    if rate == 0 {
        return Ok(0.0);
    }
    let millis = (f64::from(reader.duration()) * 1000.0 / f64::from(rate)).round();
    Ok(millis / 1000.0)
}
