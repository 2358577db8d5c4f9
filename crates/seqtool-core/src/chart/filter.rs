use std::collections::BTreeSet;

use tracing::debug;

use crate::chart::{ChartDocument, Difficulty, DifficultyFilter, Part, PartFilter};
use crate::error::Result;

/// Parts and difficulties requested for a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub parts: BTreeSet<PartFilter>,
    pub difficulties: BTreeSet<DifficultyFilter>,
}

impl Selection {
    pub fn new(
        parts: impl IntoIterator<Item = PartFilter>,
        difficulties: impl IntoIterator<Item = DifficultyFilter>,
    ) -> Self {
        Self {
            parts: parts.into_iter().collect(),
            difficulties: difficulties.into_iter().collect(),
        }
    }

    /// Everything: every part at every difficulty
    pub fn all() -> Self {
        Self::new([PartFilter::All], [DifficultyFilter::All])
    }

    /// Clean up tokens the way the command line accepts them.
    ///
    /// `all` parts expands to the four parts. `all` difficulty expands to the
    /// five labels; otherwise `min` or `max` (in that order) replace any
    /// other difficulty token.
    pub fn normalized(
        parts: impl IntoIterator<Item = PartFilter>,
        difficulties: impl IntoIterator<Item = DifficultyFilter>,
    ) -> Self {
        let mut selection = Self::new(parts, difficulties);

        if selection.parts.is_empty() || selection.parts.contains(&PartFilter::All) {
            selection.parts = [
                PartFilter::Drum,
                PartFilter::Guitar,
                PartFilter::Bass,
                PartFilter::Open,
            ]
            .into_iter()
            .collect();
        }

        let difficulties = std::mem::take(&mut selection.difficulties);
        selection.difficulties =
            if difficulties.is_empty() || difficulties.contains(&DifficultyFilter::All) {
                [
                    DifficultyFilter::Novice,
                    DifficultyFilter::Basic,
                    DifficultyFilter::Advanced,
                    DifficultyFilter::Extreme,
                    DifficultyFilter::Master,
                ]
                .into_iter()
                .collect()
            } else if difficulties.contains(&DifficultyFilter::Min) {
                [DifficultyFilter::Min].into_iter().collect()
            } else if difficulties.contains(&DifficultyFilter::Max) {
                [DifficultyFilter::Max].into_iter().collect()
            } else {
                difficulties
            };

        selection
    }

    pub fn includes_part(&self, part: Part) -> bool {
        self.parts.contains(&PartFilter::All) || self.parts.contains(&part.into())
    }

    fn includes_difficulty(&self, difficulty: Difficulty, min: u8, max: u8) -> bool {
        let value = difficulty as u8;
        (self.difficulties.contains(&DifficultyFilter::Min) && value == min)
            || (self.difficulties.contains(&DifficultyFilter::Max) && value == max)
            || self.difficulties.contains(&DifficultyFilter::All)
            || self.difficulties.contains(&difficulty.into())
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

/// Remove charts that do not match the selection.
///
/// Metadata charts always survive. A chart of an unselected part is dropped
/// without looking at its difficulty; a chart of a selected part is dropped
/// unless its difficulty matches one of the difficulty tokens. `min`/`max`
/// refer to the lowest/highest difficulty across the whole document,
/// metadata charts included, measured before anything is removed.
pub fn filter_charts(mut document: ChartDocument, selection: &Selection) -> Result<ChartDocument> {
    let Some(charts) = document.charts.take() else {
        return Ok(document);
    };

    let min = charts.iter().map(|c| c.header.difficulty).min().unwrap_or(0);
    let max = charts.iter().map(|c| c.header.difficulty).max().unwrap_or(0);

    let total = charts.len();
    let mut kept = Vec::with_capacity(total);
    for chart in charts {
        if chart.header.is_metadata {
            kept.push(chart);
            continue;
        }

        let part = chart.header.part()?;
        if !selection.includes_part(part) {
            continue;
        }

        let difficulty = chart.header.difficulty()?;
        if selection.includes_difficulty(difficulty, min, max) {
            kept.push(chart);
        }
    }

    debug!("Kept {} of {} charts", kept.len(), total);
    document.charts = Some(kept);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartEntry;
    use crate::error::Error;

    fn document(entries: Vec<ChartEntry>) -> ChartDocument {
        ChartDocument {
            charts: Some(entries),
            ..Default::default()
        }
    }

    fn labels(document: &ChartDocument) -> Vec<(u8, u8)> {
        document
            .charts
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| (c.header.game_type, c.header.difficulty))
            .collect()
    }

    #[test]
    fn test_normalized_expands_all() {
        let selection = Selection::normalized([PartFilter::All], [DifficultyFilter::All]);
        assert_eq!(selection.parts.len(), 4);
        assert_eq!(selection.difficulties.len(), 5);
        assert!(!selection.parts.contains(&PartFilter::All));
    }

    #[test]
    fn test_normalized_min_wins_over_labels() {
        let selection = Selection::normalized(
            [PartFilter::Drum],
            [DifficultyFilter::Extreme, DifficultyFilter::Max, DifficultyFilter::Min],
        );
        assert_eq!(
            selection.difficulties.into_iter().collect::<Vec<_>>(),
            vec![DifficultyFilter::Min]
        );
    }

    #[test]
    fn test_normalized_max_and_labels() {
        let selection =
            Selection::normalized([PartFilter::Bass], [DifficultyFilter::Max, DifficultyFilter::Basic]);
        assert_eq!(
            selection.difficulties.into_iter().collect::<Vec<_>>(),
            vec![DifficultyFilter::Max]
        );

        let selection = Selection::normalized(
            [PartFilter::Bass],
            [DifficultyFilter::Basic, DifficultyFilter::Advanced],
        );
        assert_eq!(selection.difficulties.len(), 2);
    }

    #[test]
    fn test_part_gate_skips_difficulty() {
        let doc = document(vec![
            ChartEntry::new(Difficulty::Master, Part::Drum),
            ChartEntry::new(Difficulty::Master, Part::Guitar),
        ]);
        let selection = Selection::new([PartFilter::Guitar], [DifficultyFilter::Master]);
        let filtered = filter_charts(doc, &selection).unwrap();
        assert_eq!(labels(&filtered), vec![(1, 4)]);
    }

    #[test]
    fn test_selected_part_with_unmatched_difficulty_is_removed() {
        let doc = document(vec![
            ChartEntry::new(Difficulty::Basic, Part::Bass),
            ChartEntry::new(Difficulty::Extreme, Part::Bass),
        ]);
        let selection = Selection::new([PartFilter::Bass], [DifficultyFilter::Extreme]);
        let filtered = filter_charts(doc, &selection).unwrap();
        assert_eq!(labels(&filtered), vec![(2, 3)]);
    }

    #[test]
    fn test_min_max_include_metadata_difficulty() {
        // metadata chart at difficulty 0 drags the minimum below every real chart
        let doc = document(vec![
            ChartEntry::metadata(0),
            ChartEntry::new(Difficulty::Basic, Part::Drum),
            ChartEntry::new(Difficulty::Extreme, Part::Drum),
        ]);
        let selection = Selection::new([PartFilter::All], [DifficultyFilter::Min]);
        let filtered = filter_charts(doc, &selection).unwrap();
        assert_eq!(filtered.chart_count(), 1);
        assert!(filtered.charts.unwrap()[0].header.is_metadata);
    }

    #[test]
    fn test_metadata_ignores_invalid_game_type() {
        let mut meta = ChartEntry::metadata(2);
        meta.header.game_type = 9;
        let doc = document(vec![meta]);
        let selection = Selection::new([PartFilter::Drum], [DifficultyFilter::Novice]);
        assert_eq!(filter_charts(doc, &selection).unwrap().chart_count(), 1);
    }

    #[test]
    fn test_invalid_game_type_is_error() {
        let mut entry = ChartEntry::new(Difficulty::Novice, Part::Drum);
        entry.header.game_type = 7;
        let result = filter_charts(document(vec![entry]), &Selection::all());
        assert!(matches!(result, Err(Error::InvalidChart(_))));
    }

    #[test]
    fn test_pass_through_without_charts() {
        let mut doc = ChartDocument::default();
        doc.extra.insert("bgm".into(), "song.wav".into());
        let filtered = filter_charts(doc.clone(), &Selection::new([PartFilter::Drum], [DifficultyFilter::Novice])).unwrap();
        assert_eq!(filtered, doc);
    }
}
