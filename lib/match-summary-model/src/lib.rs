pub mod address;
pub mod error;
pub mod model;
pub mod partition;

pub use address::{RowAddress, Section, SECTION_COUNT};
pub use error::AddressingError;
pub use model::{
    BannedChampion, ChampionId, MatchRecord, Participant, ProfileIconId, SummonerId, TeamSide,
    BLUE_TEAM_ID,
};
pub use partition::{partition, BanSlots, PartitionedMatch, BAN_SLOTS};
