use crate::error::AddressingError;
use crate::model::TeamSide;
use serde::{Deserialize, Serialize};

/// Number of sections a summary renders: the ban header, then each team.
pub const SECTION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Bans = 0,
    Blue = 1,
    Red = 2,
}

impl Section {
    pub const ALL: [Section; SECTION_COUNT] = [Section::Bans, Section::Blue, Section::Red];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Bans => "Banned Champions",
            Section::Blue => "Blue Team",
            Section::Red => "Red Team",
        }
    }

    /// The team a participant section lists. The ban section spans both.
    pub fn side(&self) -> Option<TeamSide> {
        match self {
            Section::Bans => None,
            Section::Blue => Some(TeamSide::Blue),
            Section::Red => Some(TeamSide::Red),
        }
    }
}

impl TryFrom<usize> for Section {
    type Error = AddressingError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Section::Bans),
            1 => Ok(Section::Blue),
            2 => Ok(Section::Red),
            other => Err(AddressingError::UnknownSection(other)),
        }
    }
}

/// A (section, row) coordinate as requested by the display layer.
///
/// In the [`Section::Bans`] section, row 0 is the blue ban slot-set and row 1
/// is the red one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowAddress {
    pub section: Section,
    pub index: usize,
}

impl RowAddress {
    pub fn new(section: Section, index: usize) -> Self {
        Self { section, index }
    }

    /// Build an address from raw display coordinates.
    pub fn from_raw(section: usize, index: usize) -> Result<Self, AddressingError> {
        Ok(Self {
            section: section.try_into()?,
            index,
        })
    }
}
