use std::path::PathBuf;

use crate::chart::{DifficultyFilter, Selection};
use crate::config::WAV_FORMAT;
use crate::container::ContainerTarget;
use crate::error::{Error, Result};
use crate::format::SplitInputs;

/// Where sequence charts come from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerInput {
    /// Container file, or a directory holding its extracted members
    pub sequence: PathBuf,
    /// BGM container file or directory
    pub bgm: Option<PathBuf>,
    /// Preferred chart format token (`sq3`/`sq2`)
    pub target: Option<String>,
}

/// Configuration for one conversion run.
///
/// Built by the command line front end; the core never parses arguments.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub input: Option<PathBuf>,
    pub input_format: Option<String>,
    pub input_split: SplitInputs,
    pub container: Option<ContainerInput>,
    pub sound_folder: Option<PathBuf>,
    pub event_file: Option<PathBuf>,
    /// Default keysound table applied to extracted sample archives
    pub sound_defaults: Option<PathBuf>,
    pub output: PathBuf,
    pub output_format: String,
    /// Normalized part/difficulty selection
    pub selection: Selection,
    pub single_threaded: bool,
    pub no_sounds: bool,
    pub music_id: Option<u32>,
}

impl RunConfig {
    pub fn is_wav_output(&self) -> bool {
        self.output_format.eq_ignore_ascii_case(WAV_FORMAT)
    }

    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.output_format.is_empty() {
            return Err(Error::Configuration("no output format given".to_string()));
        }

        let difficulties = &self.selection.difficulties;
        let many = difficulties.contains(&DifficultyFilter::All) || difficulties.len() > 1;
        if self.is_wav_output() && many {
            return Err(Error::Configuration(
                "Can only specify one difficulty for WAV export mode".to_string(),
            ));
        }

        if self.container.is_none() && self.input.is_none() && self.input_split.is_empty() {
            return Err(Error::Configuration("no input given".to_string()));
        }

        self.container_target()?;
        Ok(())
    }

    /// Parsed container target, if one was configured
    pub fn container_target(&self) -> Result<Option<ContainerTarget>> {
        self.container
            .as_ref()
            .and_then(|c| c.target.as_deref())
            .map(ContainerTarget::parse)
            .transpose()
    }
}
