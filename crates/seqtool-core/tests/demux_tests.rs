use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use seqtool_core::container::{demux, EventMap, NullEventExtractor};
use seqtool_core::{ContainerTarget, EventExtractor, Result};

/// Reads the member's first byte as a single event timestamp and remembers
/// what it was asked to decode.
#[derive(Default)]
struct RecordingEvents {
    seen: Mutex<Vec<u8>>,
}

impl EventExtractor for RecordingEvents {
    fn extract(&self, data: &[u8]) -> Result<Option<EventMap>> {
        let Some(&first) = data.first() else {
            return Ok(None);
        };
        self.seen.lock().unwrap().push(first);
        Ok(Some(EventMap::from([(u32::from(first), true)])))
    }
}

fn members(dir: &Path, names: &[(&str, u8)]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = names
        .iter()
        .map(|(name, tag)| {
            let path = dir.join(name);
            fs::write(&path, [*tag]).unwrap();
            path
        })
        .collect();
    paths.sort();
    paths
}

fn name(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
}

#[test]
fn test_members_sorted_by_part() {
    let dir = tempfile::tempdir().unwrap();
    let members = members(
        dir.path(),
        &[
            ("d1234.sq3", 0),
            ("g1234.sq3", 0),
            ("x1234d.va3", 0),
            ("x1234g.va3", 0),
            ("readme.txt", 0),
        ],
    );

    let sets = demux(&members, None, false, &NullEventExtractor).unwrap();
    assert_eq!(name(&sets.drum.sequence).as_deref(), Some("d1234.sq3"));
    assert_eq!(name(&sets.guitar.sequence).as_deref(), Some("g1234.sq3"));
    assert_eq!(name(&sets.drum.sound_archive).as_deref(), Some("x1234d.va3"));
    assert_eq!(name(&sets.guitar.sound_archive).as_deref(), Some("x1234g.va3"));
    assert!(sets.drum.events.is_none());
}

#[test]
fn test_no_sounds_skips_archives() {
    let dir = tempfile::tempdir().unwrap();
    let members = members(dir.path(), &[("d1234.sq3", 0), ("x1234d.va3", 0)]);

    let sets = demux(&members, None, true, &NullEventExtractor).unwrap();
    assert!(sets.drum.sequence.is_some());
    assert!(sets.drum.sound_archive.is_none());
    assert!(sets.guitar.sound_archive.is_none());
}

#[test]
fn test_target_selects_chart_format() {
    let dir = tempfile::tempdir().unwrap();
    let members = members(dir.path(), &[("d1234.sq2", 0), ("d1234.sq3", 0)]);

    let sets = demux(&members, Some(ContainerTarget::Sq2), false, &NullEventExtractor).unwrap();
    assert_eq!(name(&sets.drum.sequence).as_deref(), Some("d1234.sq2"));

    let sets = demux(&members, Some(ContainerTarget::Sq3), false, &NullEventExtractor).unwrap();
    assert_eq!(name(&sets.drum.sequence).as_deref(), Some("d1234.sq3"));
}

#[test]
fn test_events_shared_by_both_parts() {
    let dir = tempfile::tempdir().unwrap();
    let members = members(dir.path(), &[("d1234.sq3", 0), ("g1234.sq3", 0), ("m1234.ev2", 7)]);

    let events = RecordingEvents::default();
    let sets = demux(&members, None, false, &events).unwrap();
    let drum = sets.drum.events.unwrap();
    let guitar = sets.guitar.events.unwrap();
    assert_eq!(drum.get(&7), Some(&true));
    assert_eq!(drum, guitar);
}

#[test]
fn test_lower_priority_events_skipped_after_primary() {
    let dir = tempfile::tempdir().unwrap();
    // ev2 sorts before evt, so the primary member is read first
    let members = members(dir.path(), &[("m1234.ev2", 1), ("m1234.evt", 2)]);

    let events = RecordingEvents::default();
    let sets = demux(&members, None, false, &events).unwrap();
    assert_eq!(*events.seen.lock().unwrap(), vec![1]);
    assert_eq!(sets.drum.events.unwrap().keys().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_primary_events_override_secondary() {
    let dir = tempfile::tempdir().unwrap();
    // with the sq2 target evt is primary and is listed after ev2
    let members = members(dir.path(), &[("m1234.ev2", 1), ("m1234.evt", 2)]);

    let events = RecordingEvents::default();
    let sets = demux(&members, Some(ContainerTarget::Sq2), false, &events).unwrap();
    assert_eq!(*events.seen.lock().unwrap(), vec![1, 2]);
    assert_eq!(sets.guitar.events.unwrap().keys().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_unknown_target_rejected() {
    assert!(ContainerTarget::parse("sq1").is_err());
    assert_eq!(ContainerTarget::parse("SQ3").unwrap(), ContainerTarget::Sq3);
}
