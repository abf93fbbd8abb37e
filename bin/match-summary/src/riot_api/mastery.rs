use async_trait::async_trait;
use match_summary_enrich::{MasteryRecord, MasteryService, ServiceError};
use match_summary_model::{ChampionId, SummonerId};
use riven::consts::PlatformRoute;
use riven::RiotApi;
use std::sync::Arc;
use tracing::debug;

/// Champion mastery lookups against the Riot API.
pub struct MasteryRequester {
    riot_api: Arc<RiotApi>,
}

impl std::fmt::Debug for MasteryRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasteryRequester").finish()
    }
}

impl MasteryRequester {
    pub fn new(riot_api: Arc<RiotApi>) -> Self {
        Self { riot_api }
    }
}

#[async_trait]
impl MasteryService for MasteryRequester {
    async fn get_champion_mastery(
        &self,
        summoner_id: &SummonerId,
        champion_id: ChampionId,
        region: PlatformRoute,
    ) -> Result<Option<MasteryRecord>, ServiceError> {
        let masteries = self
            .riot_api
            .champion_mastery_v4()
            .get_all_champion_masteries_by_puuid(region, &summoner_id.0)
            .await
            .map_err(|e| e.to_string())?;
        debug!("Fetched {} masteries for {summoner_id}", masteries.len());

        Ok(masteries
            .into_iter()
            .find(|mastery| mastery.champion_id.0 == champion_id.0)
            .map(|mastery| MasteryRecord {
                champion_id,
                champion_level: mastery.champion_level,
            }))
    }
}
