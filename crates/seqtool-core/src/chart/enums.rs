use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, FromRepr, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Difficulty {
    #[strum(to_string = "nov", serialize = "novice", ascii_case_insensitive)]
    Novice = 0,
    #[strum(to_string = "bsc", serialize = "basic", ascii_case_insensitive)]
    Basic = 1,
    #[strum(to_string = "adv", serialize = "advanced", ascii_case_insensitive)]
    Advanced = 2,
    #[strum(to_string = "ext", serialize = "extreme", ascii_case_insensitive)]
    Extreme = 3,
    #[strum(to_string = "mst", serialize = "master", ascii_case_insensitive)]
    Master = 4,
}

impl Difficulty {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Three-letter label used on the command line and in file names
    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Part {
    Drum = 0,
    Guitar = 1,
    Bass = 2,
    Open = 3,
}

impl Part {
    /// Map a chart header `game_type` to its part
    pub fn from_game_type(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Guitar, bass and open charts all come from the guitar sequence
    pub fn is_guitar_family(&self) -> bool {
        !matches!(self, Self::Drum)
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Part token accepted by a selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PartFilter {
    #[strum(serialize = "drum")]
    Drum,
    #[strum(serialize = "guitar")]
    Guitar,
    #[strum(serialize = "bass")]
    Bass,
    #[strum(serialize = "open")]
    Open,
    #[strum(serialize = "all")]
    All,
}

impl From<Part> for PartFilter {
    fn from(part: Part) -> Self {
        match part {
            Part::Drum => Self::Drum,
            Part::Guitar => Self::Guitar,
            Part::Bass => Self::Bass,
            Part::Open => Self::Open,
        }
    }
}

/// Difficulty token accepted by a selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DifficultyFilter {
    #[strum(to_string = "nov", serialize = "novice")]
    Novice,
    #[strum(to_string = "bsc", serialize = "basic")]
    Basic,
    #[strum(to_string = "adv", serialize = "advanced")]
    Advanced,
    #[strum(to_string = "ext", serialize = "extreme")]
    Extreme,
    #[strum(to_string = "mst", serialize = "master")]
    Master,
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "min")]
    Min,
    #[strum(serialize = "max")]
    Max,
}

impl From<Difficulty> for DifficultyFilter {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Novice => Self::Novice,
            Difficulty::Basic => Self::Basic,
            Difficulty::Advanced => Self::Advanced,
            Difficulty::Extreme => Self::Extreme,
            Difficulty::Master => Self::Master,
        }
    }
}
