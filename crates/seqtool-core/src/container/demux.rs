use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use strum::{EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::chart::Part;
use crate::config::members::{
    DEFAULT_CHART_EXTENSIONS, DEFAULT_EVENT_EXTENSIONS, DRUM_MARKER, GUITAR_MARKER,
    SAMPLE_ARCHIVE_EXTENSION,
};
use crate::container::{member_extension, EventExtractor, EventMap};
use crate::error::{Error, Result};

/// Chart format preferred when a container holds several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContainerTarget {
    Sq3,
    Sq2,
}

impl ContainerTarget {
    /// Parse a target token; anything unknown is a configuration error.
    pub fn parse(token: &str) -> Result<Self> {
        Self::from_str(token)
            .map_err(|_| Error::Configuration(format!("Invalid IFS target selected: {}", token)))
    }

    pub fn chart_extensions(target: Option<Self>) -> &'static [&'static str] {
        match target {
            None => &DEFAULT_CHART_EXTENSIONS,
            Some(Self::Sq3) => &["sq3"],
            Some(Self::Sq2) => &["sq2"],
        }
    }

    /// Event extensions, highest priority first
    pub fn event_extensions(target: Option<Self>) -> &'static [&'static str] {
        match target {
            None | Some(Self::Sq3) => &DEFAULT_EVENT_EXTENSIONS,
            Some(Self::Sq2) => &["evt", "ev2"],
        }
    }
}

/// Files belonging to one instrument part
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    pub sequence: Option<PathBuf>,
    pub sound_archive: Option<PathBuf>,
    pub events: Option<Arc<EventMap>>,
}

/// Container members sorted into drum and guitar sets
#[derive(Debug, Clone, Default)]
pub struct Demuxed {
    pub drum: FileSet,
    pub guitar: FileSet,
}

impl Demuxed {
    pub fn set_mut(&mut self, part: Part) -> &mut FileSet {
        if part.is_guitar_family() {
            &mut self.guitar
        } else {
            &mut self.drum
        }
    }

    pub fn into_sets(self) -> [(Part, FileSet); 2] {
        [(Part::Guitar, self.guitar), (Part::Drum, self.drum)]
    }
}

fn part_for_marker(marker: Option<char>) -> Option<Part> {
    match marker.map(|c| c.to_ascii_lowercase()) {
        Some(DRUM_MARKER) => Some(Part::Drum),
        Some(GUITAR_MARKER) => Some(Part::Guitar),
        _ => None,
    }
}

/// Sort container members into per-part file sets.
///
/// - chart members (by target extension) go to drum/guitar by their first
///   character;
/// - sample archives go to drum/guitar by the last character of their stem,
///   and are skipped entirely with `no_sounds`;
/// - event members are decoded through `events`; once events have been read,
///   members with a lower-priority extension are skipped. The decoded events
///   are shared by both sets.
pub fn demux(
    members: &[PathBuf],
    target: Option<ContainerTarget>,
    no_sounds: bool,
    events: &dyn EventExtractor,
) -> Result<Demuxed> {
    let chart_extensions = ContainerTarget::chart_extensions(target);
    let event_extensions = ContainerTarget::event_extensions(target);

    let mut sets = Demuxed::default();
    for member in members {
        let Some(extension) = member_extension(member) else {
            continue;
        };
        let name = file_name(member);

        if chart_extensions.contains(&extension.as_str()) {
            if let Some(part) = part_for_marker(name.chars().next()) {
                debug!("{} sequence: {:?}", part, member);
                sets.set_mut(part).sequence = Some(member.clone());
            }
        } else if extension == SAMPLE_ARCHIVE_EXTENSION {
            if no_sounds {
                continue;
            }
            let stem = member
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if let Some(part) = part_for_marker(stem.chars().last()) {
                debug!("{} sound archive: {:?}", part, member);
                sets.set_mut(part).sound_archive = Some(member.clone());
            }
        } else if event_extensions.contains(&extension.as_str()) {
            if extension != event_extensions[0] && sets.drum.events.is_some() {
                debug!("Skipping lower priority events {:?}", member);
                continue;
            }

            match events.extract(&fs::read(member)?)? {
                Some(map) => {
                    debug!("{} events from {:?}", map.len(), member);
                    let map = Arc::new(map);
                    sets.drum.events = Some(Arc::clone(&map));
                    sets.guitar.events = Some(map);
                }
                None => warn!("No event data in {:?}", member),
            }
        }
    }

    Ok(sets)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
