//! Container extraction and per-part file pairing.
//!
//! This module contains:
//! - `ContainerExtractor` - unpacks an outer container (IFS) to a directory
//! - `EventExtractor` - reads bonus-note events from event stream members
//! - `demux` - sorts container members into drum and guitar `FileSet`s

mod demux;
mod events;

pub use demux::*;
pub use events::*;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::convert::TempStore;
use crate::error::{Error, Result};

/// Unpacks an outer container into a directory.
pub trait ContainerExtractor: Send + Sync {
    /// Extract `container` under `dest` and return every extracted file.
    fn extract(&self, container: &Path, dest: &Path) -> Result<Vec<PathBuf>>;
}

/// Runs an external `ifstools`-compatible unpacker: `<program> -y -o <dest> <container>`.
#[derive(Debug, Clone)]
pub struct IfsToolsExtractor {
    program: PathBuf,
}

impl IfsToolsExtractor {
    pub const DEFAULT_PROGRAM: &'static str = "ifstools";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for IfsToolsExtractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl ContainerExtractor for IfsToolsExtractor {
    fn extract(&self, container: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
        let tool_error = |message: String| Error::Tool {
            program: self.program.display().to_string(),
            message,
        };

        let output = Command::new(&self.program)
            .arg("-y")
            .arg("-o")
            .arg(dest)
            .arg(container)
            .output()
            .map_err(|e| tool_error(e.to_string()))?;
        if !output.status.success() {
            return Err(tool_error(format!(
                "{} ({})",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dest).sort_by_file_name() {
            let entry = entry.map_err(|e| tool_error(e.to_string()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        info!("Extracted {} members from {:?}", files.len(), container);
        Ok(files)
    }
}

/// Members of a container given either as a pre-extracted directory (its
/// direct children, sorted by name) or as a container file to unpack into
/// the run's temporary store.
pub fn list_members(
    path: &Path,
    extractor: &dyn ContainerExtractor,
    temp: &TempStore,
) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut members = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                members.push(entry.path());
            }
        }
        members.sort();
        debug!("{} members in {:?}", members.len(), path);
        return Ok(members);
    }

    let dest = temp.make_dir("ifs")?;
    extractor.extract(path, &dest)
}

/// Lowercased extension of a member, without the dot
pub(crate) fn member_extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}
