use crate::address::{RowAddress, Section};
use crate::error::AddressingError;
use crate::model::{BannedChampion, MatchRecord, Participant, TeamSide};
use tracing::warn;

/// Ban slots shown per side.
pub const BAN_SLOTS: usize = 5;

/// Display-ready split of a [`MatchRecord`] into teams and bans per side.
///
/// Computed once when the record is set and never changed afterwards. Row
/// counts, participant lookups, and ban slot-sets all read from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedMatch {
    blue_team: Vec<Participant>,
    red_team: Vec<Participant>,
    blue_bans: Vec<BannedChampion>,
    red_bans: Vec<BannedChampion>,
}

/// Split participants and bans by side, keeping the input order within each side.
///
/// A ban whose order falls outside the slots, or whose slot is already taken
/// on its side, is dropped with a warning.
pub fn partition(record: &MatchRecord) -> PartitionedMatch {
    let mut partitioned = PartitionedMatch::default();

    for participant in &record.participants {
        match participant.team {
            TeamSide::Blue => partitioned.blue_team.push(participant.clone()),
            TeamSide::Red => partitioned.red_team.push(participant.clone()),
        }
    }

    for ban in &record.banned_champions {
        let bans = match ban.team {
            TeamSide::Blue => &mut partitioned.blue_bans,
            TeamSide::Red => &mut partitioned.red_bans,
        };
        if usize::from(ban.ban_order) >= BAN_SLOTS {
            warn!(
                "Dropping {} ban of champion {} with ban order {} past the last of {BAN_SLOTS} slots",
                ban.team, ban.champion_id, ban.ban_order
            );
            continue;
        }
        if let Some(taken) = bans.iter().find(|taken| taken.ban_order == ban.ban_order) {
            warn!(
                "Dropping {} ban of champion {}: slot {} already holds champion {}",
                ban.team, ban.champion_id, ban.ban_order, taken.champion_id
            );
            continue;
        }
        bans.push(ban.clone());
    }

    partitioned
}

impl PartitionedMatch {
    pub fn team(&self, side: TeamSide) -> &[Participant] {
        match side {
            TeamSide::Blue => &self.blue_team,
            TeamSide::Red => &self.red_team,
        }
    }

    pub fn bans(&self, side: TeamSide) -> &[BannedChampion] {
        match side {
            TeamSide::Blue => &self.blue_bans,
            TeamSide::Red => &self.red_bans,
        }
    }

    /// Number of rows the display must render for `section`. The ban section
    /// always has two rows, one slot-set per side.
    pub fn row_count(&self, section: Section) -> usize {
        match section {
            Section::Bans => 2,
            Section::Blue => self.blue_team.len(),
            Section::Red => self.red_team.len(),
        }
    }

    /// Row count for a raw section index. Unknown sections have no rows.
    pub fn row_count_raw(&self, section: usize) -> usize {
        Section::try_from(section)
            .map(|section| self.row_count(section))
            .unwrap_or(0)
    }

    pub fn resolve_participant(&self, address: RowAddress) -> Result<&Participant, AddressingError> {
        let side = address
            .section
            .side()
            .ok_or(AddressingError::NotAParticipantRow(address.section))?;
        let team = self.team(side);
        team.get(address.index)
            .ok_or(AddressingError::RowOutOfRange {
                section: address.section,
                index: address.index,
                count: team.len(),
            })
    }

    pub fn ban_slots(&self, side: TeamSide) -> BanSlots<'_> {
        let mut slots = [None; BAN_SLOTS];
        for ban in self.bans(side) {
            if let Some(slot) = slots.get_mut(usize::from(ban.ban_order)) {
                *slot = Some(ban);
            }
        }
        BanSlots { side, slots }
    }

    /// Slot-set for a row of the ban section.
    pub fn resolve_ban_row(&self, address: RowAddress) -> Result<BanSlots<'_>, AddressingError> {
        if address.section != Section::Bans {
            return Err(AddressingError::NotABanRow(address.section));
        }
        match address.index {
            0 => Ok(self.ban_slots(TeamSide::Blue)),
            1 => Ok(self.ban_slots(TeamSide::Red)),
            index => Err(AddressingError::RowOutOfRange {
                section: Section::Bans,
                index,
                count: 2,
            }),
        }
    }

    /// Participant to open when a row is activated. Ban rows are not selectable.
    pub fn select(&self, address: RowAddress) -> Result<Option<&Participant>, AddressingError> {
        match address.section {
            Section::Bans => Ok(None),
            Section::Blue | Section::Red => self.resolve_participant(address).map(Some),
        }
    }

    /// Every row address the display should materialize, section by section.
    pub fn addresses(&self) -> impl Iterator<Item = RowAddress> + '_ {
        Section::ALL.into_iter().flat_map(move |section| {
            (0..self.row_count(section)).map(move |index| RowAddress::new(section, index))
        })
    }
}

/// The five ban slots of one side. Each ban sits at the slot named by its
/// ban order; slots nobody banned in stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanSlots<'a> {
    pub side: TeamSide,
    pub slots: [Option<&'a BannedChampion>; BAN_SLOTS],
}

impl<'a> BanSlots<'a> {
    /// Occupied slots paired with their slot index.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &'a BannedChampion)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, ban)| ban.map(|ban| (slot, ban)))
    }
}
