use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Team ID the Riot API assigns to the blue side. Every other ID plays on red.
pub const BLUE_TEAM_ID: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Blue,
    Red,
}

impl From<u16> for TeamSide {
    fn from(value: u16) -> Self {
        if value == BLUE_TEAM_ID {
            TeamSide::Blue
        } else {
            TeamSide::Red
        }
    }
}

impl Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::Blue => f.write_str("blue"),
            TeamSide::Red => f.write_str("red"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChampionId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileIconId(pub i32);

/// Encrypted player identifier used to key champion mastery lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummonerId(pub String);

impl Display for ChampionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for ProfileIconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for SummonerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub team: TeamSide,
    pub champion_id: ChampionId,
    pub profile_icon_id: ProfileIconId,
    pub summoner_name: String,
    /// Mastery is never looked up for participants without one.
    pub summoner_id: Option<SummonerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedChampion {
    pub team: TeamSide,
    pub champion_id: ChampionId,
    /// Position of the ban within its side, 0 through 4.
    pub ban_order: u8,
}

/// A finished match as handed to the summary screen. Never mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub participants: Vec<Participant>,
    pub banned_champions: Vec<BannedChampion>,
}
