use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::archive::SampleMetadata;
use crate::chart::{Difficulty, Part, Selection};
use crate::container::EventMap;
use crate::error::{Error, Result};

/// Per-part, per-difficulty chart inputs for formats that store each chart
/// in its own file
pub type SplitInputs = BTreeMap<(Part, Difficulty), PathBuf>;

/// Parse a `PART:DIFF=PATH` split input token, e.g. `drum:ext=d1234_ext.seq`.
pub fn parse_split_input(token: &str) -> Result<((Part, Difficulty), PathBuf)> {
    let invalid = || Error::Configuration(format!("invalid split input '{}'", token));

    let (key, path) = token.split_once('=').ok_or_else(invalid)?;
    let (part, difficulty) = key.split_once(':').ok_or_else(invalid)?;
    let part = Part::from_str(part.trim()).map_err(|_| invalid())?;
    let difficulty = Difficulty::from_str(difficulty.trim()).map_err(|_| invalid())?;
    if path.is_empty() {
        return Err(invalid());
    }

    Ok(((part, difficulty), PathBuf::from(path)))
}

/// Everything a format handler needs for one conversion unit
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    pub input: Option<PathBuf>,
    pub input_format: Option<String>,
    pub output: PathBuf,
    pub output_format: String,
    pub sound_folder: Option<PathBuf>,
    pub sound_metadata: Option<SampleMetadata>,
    pub events: Arc<EventMap>,
    pub selection: Selection,
    pub music_id: Option<u32>,
    pub input_split: SplitInputs,
    pub no_sounds: bool,
}

impl ConversionRequest {
    /// Stem used to name encoded output files
    pub fn output_stem(&self) -> String {
        self.input
            .as_deref()
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned())
            .or_else(|| self.music_id.map(|id| id.to_string()))
            .unwrap_or_else(|| "chart".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split_input() {
        let ((part, difficulty), path) = parse_split_input("drum:ext=charts/d_ext.json").unwrap();
        assert_eq!(part, Part::Drum);
        assert_eq!(difficulty, Difficulty::Extreme);
        assert_eq!(path, PathBuf::from("charts/d_ext.json"));

        let ((part, difficulty), _) = parse_split_input("Bass:master=b.json").unwrap();
        assert_eq!((part, difficulty), (Part::Bass, Difficulty::Master));
    }

    #[test]
    fn test_parse_split_input_rejects_garbage() {
        for token in ["drum=x", "drum:ext", "keys:ext=x", "drum:hard=x", "drum:ext="] {
            assert!(
                matches!(parse_split_input(token), Err(Error::Configuration(_))),
                "{} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_output_stem() {
        let mut request = ConversionRequest::default();
        assert_eq!(request.output_stem(), "chart");

        request.music_id = Some(1234);
        assert_eq!(request.output_stem(), "1234");

        request.input = Some(PathBuf::from("seq/d1234.sq3"));
        assert_eq!(request.output_stem(), "d1234");
    }
}
