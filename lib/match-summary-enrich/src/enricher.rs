use crate::board::{Field, RowTicket, RowUpdate};
use crate::error::FetchError;
use crate::service::{
    ChampionService, Image, ImageDescriptor, ImageLoader, MasteryService, ProfileIconService,
};
use match_summary_model::{
    AddressingError, BanSlots, ChampionId, Participant, PartitionedMatch, ProfileIconId, Section,
    SummonerId,
};
use riven::consts::PlatformRoute;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Fills the asynchronous fields of summary rows: champion portrait, summoner
/// icon and champion mastery level.
///
/// Every fetch resolves to a value or to absent. Failures are logged and never
/// reach the caller, so one missing field never holds back another field or
/// another row.
pub struct RowEnricher {
    champions: Arc<dyn ChampionService>,
    profile_icons: Arc<dyn ProfileIconService>,
    masteries: Arc<dyn MasteryService>,
    images: Arc<dyn ImageLoader>,
    region: PlatformRoute,
}

impl std::fmt::Debug for RowEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowEnricher")
            .field("region", &self.region)
            .finish()
    }
}

impl RowEnricher {
    pub fn new(
        champions: Arc<dyn ChampionService>,
        profile_icons: Arc<dyn ProfileIconService>,
        masteries: Arc<dyn MasteryService>,
        images: Arc<dyn ImageLoader>,
        region: PlatformRoute,
    ) -> Self {
        Self {
            champions,
            profile_icons,
            masteries,
            images,
            region,
        }
    }

    /// Square portrait of the champion's default skin.
    pub async fn fetch_champion_image(&self, champion_id: ChampionId) -> Option<Image> {
        absorb("champion image", self.try_champion_image(champion_id).await)
    }

    pub async fn fetch_summoner_image(&self, profile_icon_id: ProfileIconId) -> Option<Image> {
        absorb("summoner image", self.try_summoner_image(profile_icon_id).await)
    }

    /// Mastery level of the summoner on the champion. Without a summoner ID
    /// nothing is requested and the level is absent.
    pub async fn fetch_champion_mastery(
        &self,
        summoner_id: Option<&SummonerId>,
        champion_id: ChampionId,
    ) -> Option<i32> {
        let Some(summoner_id) = summoner_id else {
            debug!("Skipping mastery lookup for champion {champion_id}: no summoner ID");
            return None;
        };
        absorb(
            "champion mastery",
            self.try_champion_mastery(summoner_id, champion_id).await,
        )
    }

    async fn try_champion_image(&self, champion_id: ChampionId) -> Result<Image, FetchError> {
        let champion = self
            .champions
            .get_champion_details(champion_id)
            .await
            .map_err(|e| FetchError::Lookup {
                what: "champion",
                id: champion_id.to_string(),
                message: e.to_string(),
            })?
            .ok_or_else(|| FetchError::NotFound {
                what: "champion",
                id: champion_id.to_string(),
            })?;
        let square = champion
            .square
            .ok_or_else(|| FetchError::MissingSquareImage(champion.name))?;
        self.load_image(&square).await
    }

    async fn try_summoner_image(&self, profile_icon_id: ProfileIconId) -> Result<Image, FetchError> {
        let profile_icon = self
            .profile_icons
            .get_profile_icon(profile_icon_id)
            .await
            .map_err(|e| FetchError::Lookup {
                what: "profile icon",
                id: profile_icon_id.to_string(),
                message: e.to_string(),
            })?
            .ok_or_else(|| FetchError::NotFound {
                what: "profile icon",
                id: profile_icon_id.to_string(),
            })?;
        self.load_image(&profile_icon.image).await
    }

    async fn try_champion_mastery(
        &self,
        summoner_id: &SummonerId,
        champion_id: ChampionId,
    ) -> Result<i32, FetchError> {
        let id = format!("{summoner_id}/{champion_id}");
        let mastery = self
            .masteries
            .get_champion_mastery(summoner_id, champion_id, self.region)
            .await
            .map_err(|e| FetchError::Lookup {
                what: "champion mastery",
                id: id.clone(),
                message: e.to_string(),
            })?
            .ok_or(FetchError::NotFound {
                what: "champion mastery",
                id,
            })?;
        Ok(mastery.champion_level)
    }

    async fn load_image(&self, descriptor: &ImageDescriptor) -> Result<Image, FetchError> {
        self.images
            .get_image(descriptor)
            .await
            .map_err(|e| FetchError::ImageLoad {
                url: descriptor.url.clone(),
                message: e.to_string(),
            })?
            .ok_or_else(|| FetchError::EmptyImage(descriptor.url.clone()))
    }

    /// Start enrichment of whichever row `ticket` addresses.
    pub fn enrich(
        self: &Arc<Self>,
        partitioned: &PartitionedMatch,
        ticket: RowTicket,
        publishing_channel: &UnboundedSender<RowUpdate>,
    ) -> Result<Vec<JoinHandle<()>>, AddressingError> {
        match ticket.address.section {
            Section::Bans => {
                let ban_slots = partitioned.resolve_ban_row(ticket.address)?;
                Ok(self.enrich_bans(ticket, &ban_slots, publishing_channel))
            }
            Section::Blue | Section::Red => {
                let participant = partitioned.resolve_participant(ticket.address)?;
                Ok(self.enrich_participant(ticket, participant, publishing_channel))
            }
        }
    }

    /// Issue the three participant fetches at once. Each result is published
    /// on its own as soon as it resolves.
    pub fn enrich_participant(
        self: &Arc<Self>,
        ticket: RowTicket,
        participant: &Participant,
        publishing_channel: &UnboundedSender<RowUpdate>,
    ) -> Vec<JoinHandle<()>> {
        let champion_id = participant.champion_id;
        let profile_icon_id = participant.profile_icon_id;
        let mut handles = Vec::with_capacity(3);

        let enricher = self.clone();
        handles.push(spawn_field(ticket, publishing_channel, async move {
            Field::ChampionImage(enricher.fetch_champion_image(champion_id).await)
        }));

        let enricher = self.clone();
        handles.push(spawn_field(ticket, publishing_channel, async move {
            Field::SummonerImage(enricher.fetch_summoner_image(profile_icon_id).await)
        }));

        match participant.summoner_id.clone() {
            Some(summoner_id) => {
                let enricher = self.clone();
                handles.push(spawn_field(ticket, publishing_channel, async move {
                    Field::Mastery(
                        enricher
                            .fetch_champion_mastery(Some(&summoner_id), champion_id)
                            .await,
                    )
                }));
            }
            None => {
                debug!("No summoner ID for {:?}, mastery resolves absent", ticket.address);
                publish(
                    publishing_channel,
                    RowUpdate {
                        ticket,
                        field: Field::Mastery(None),
                    },
                );
            }
        }

        handles
    }

    /// Fetch a portrait for every occupied ban slot. Empty slots fetch nothing.
    pub fn enrich_bans(
        self: &Arc<Self>,
        ticket: RowTicket,
        ban_slots: &BanSlots<'_>,
        publishing_channel: &UnboundedSender<RowUpdate>,
    ) -> Vec<JoinHandle<()>> {
        ban_slots
            .occupied()
            .map(|(slot, ban)| {
                let enricher = self.clone();
                let champion_id = ban.champion_id;
                spawn_field(ticket, publishing_channel, async move {
                    Field::BanImage {
                        slot,
                        image: enricher.fetch_champion_image(champion_id).await,
                    }
                })
            })
            .collect()
    }
}

fn absorb<T>(what: &str, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Request for {what} failed: {e}");
            None
        }
    }
}

fn spawn_field<F>(
    ticket: RowTicket,
    publishing_channel: &UnboundedSender<RowUpdate>,
    fetch: F,
) -> JoinHandle<()>
where
    F: Future<Output = Field> + Send + 'static,
{
    let publishing_channel = publishing_channel.clone();
    tokio::task::spawn(async move {
        let field = fetch.await;
        publish(&publishing_channel, RowUpdate { ticket, field });
    })
}

fn publish(publishing_channel: &UnboundedSender<RowUpdate>, update: RowUpdate) {
    let address = update.ticket.address;
    if publishing_channel.send(update).is_err() {
        debug!("Row update receiver for {address:?} is gone, discarding");
    }
}
