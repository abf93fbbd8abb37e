use crate::service::Image;
use match_summary_model::{
    AddressingError, BannedChampion, ChampionId, Participant, PartitionedMatch, RowAddress,
    Section, TeamSide, BAN_SLOTS,
};
use std::collections::HashMap;
use tracing::debug;

/// Identifies one binding of a row. Rebinding an address bumps its
/// generation, so results still in flight for the previous binding are
/// recognised as stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowTicket {
    pub address: RowAddress,
    pub generation: u64,
}

/// A resolved field value, published as soon as its fetch finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    ChampionImage(Option<Image>),
    SummonerImage(Option<Image>),
    Mastery(Option<i32>),
    BanImage { slot: usize, image: Option<Image> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub ticket: RowTicket,
    pub field: Field,
}

/// State of one fetch: it resolves exactly once, to a value or to absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch<T> {
    Pending,
    Resolved(Option<T>),
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Fetch::Pending
    }
}

impl<T> Fetch<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Fetch::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Fetch::Resolved(value) => value.as_ref(),
            Fetch::Pending => None,
        }
    }

    /// Resolve a pending fetch. Later resolutions are ignored.
    fn resolve(&mut self, value: Option<T>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = Fetch::Resolved(value);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub participant: Participant,
    pub champion_image: Fetch<Image>,
    pub summoner_image: Fetch<Image>,
    pub mastery: Fetch<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanSlot {
    Empty,
    Filled {
        champion_id: ChampionId,
        image: Fetch<Image>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRow {
    pub side: TeamSide,
    pub slots: [BanSlot; BAN_SLOTS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    Participant(ParticipantRow),
    Bans(BanRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    pub generation: u64,
    pub content: RowContent,
}

impl RowState {
    /// A row is complete once none of its fetches is pending.
    pub fn is_complete(&self) -> bool {
        match &self.content {
            RowContent::Participant(row) => {
                !row.champion_image.is_pending()
                    && !row.summoner_image.is_pending()
                    && !row.mastery.is_pending()
            }
            RowContent::Bans(row) => row.slots.iter().all(|slot| match slot {
                BanSlot::Empty => true,
                BanSlot::Filled { image, .. } => !image.is_pending(),
            }),
        }
    }

    fn apply(&mut self, field: Field) -> bool {
        match (&mut self.content, field) {
            (RowContent::Participant(row), Field::ChampionImage(image)) => {
                row.champion_image.resolve(image)
            }
            (RowContent::Participant(row), Field::SummonerImage(image)) => {
                row.summoner_image.resolve(image)
            }
            (RowContent::Participant(row), Field::Mastery(level)) => row.mastery.resolve(level),
            (RowContent::Bans(row), Field::BanImage { slot, image: value }) => {
                match row.slots.get_mut(slot) {
                    Some(BanSlot::Filled { image, .. }) => image.resolve(value),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

/// Display-side state of every bound row of one summary.
///
/// The board owns the [`PartitionedMatch`] for the lifetime of the screen and
/// applies [`RowUpdate`]s to the row they were issued for.
#[derive(Debug)]
pub struct SummaryBoard {
    partitioned: PartitionedMatch,
    rows: HashMap<RowAddress, RowState>,
    generations: HashMap<RowAddress, u64>,
}

impl SummaryBoard {
    pub fn new(partitioned: PartitionedMatch) -> Self {
        Self {
            partitioned,
            rows: HashMap::new(),
            generations: HashMap::new(),
        }
    }

    pub fn partitioned(&self) -> &PartitionedMatch {
        &self.partitioned
    }

    /// Bind `address` to fresh content with every field pending. Any results
    /// still in flight for an earlier binding of the same address go stale.
    pub fn bind(&mut self, address: RowAddress) -> Result<RowTicket, AddressingError> {
        let content = match address.section {
            Section::Bans => {
                let ban_slots = self.partitioned.resolve_ban_row(address)?;
                RowContent::Bans(BanRow {
                    side: ban_slots.side,
                    slots: ban_slots.slots.map(|ban| match ban {
                        Some(BannedChampion { champion_id, .. }) => BanSlot::Filled {
                            champion_id: *champion_id,
                            image: Fetch::Pending,
                        },
                        None => BanSlot::Empty,
                    }),
                })
            }
            Section::Blue | Section::Red => {
                let participant = self.partitioned.resolve_participant(address)?;
                RowContent::Participant(ParticipantRow {
                    participant: participant.clone(),
                    champion_image: Fetch::Pending,
                    summoner_image: Fetch::Pending,
                    mastery: Fetch::Pending,
                })
            }
        };

        let generation = self.generations.entry(address).or_insert(0);
        *generation += 1;
        let generation = *generation;
        self.rows.insert(
            address,
            RowState {
                generation,
                content,
            },
        );

        Ok(RowTicket {
            address,
            generation,
        })
    }

    /// Apply a published field. Returns whether the row changed; updates for
    /// stale bindings or already resolved fields change nothing.
    pub fn apply(&mut self, update: RowUpdate) -> bool {
        let Some(row) = self.rows.get_mut(&update.ticket.address) else {
            debug!("Dropping update for unbound row {:?}", update.ticket.address);
            return false;
        };
        if row.generation != update.ticket.generation {
            debug!(
                "Dropping stale update for {:?} (generation {}, current {})",
                update.ticket.address, update.ticket.generation, row.generation
            );
            return false;
        }
        row.apply(update.field)
    }

    pub fn row(&self, address: RowAddress) -> Option<&RowState> {
        self.rows.get(&address)
    }

    /// Whether every bound row has finished resolving.
    pub fn is_complete(&self) -> bool {
        self.rows.values().all(RowState::is_complete)
    }
}
