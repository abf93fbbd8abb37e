//! Narrow interfaces to the services a row pulls its auxiliary data from.
//!
//! Implementations live with the caller (Data Dragon, Riot API, or test
//! doubles) and are handed to [`crate::RowEnricher`] at construction.

use async_trait::async_trait;
use match_summary_model::{ChampionId, ProfileIconId, SummonerId};
use riven::consts::PlatformRoute;

pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// Where an image can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionDetails {
    pub id: ChampionId,
    pub name: String,
    /// Square portrait of the default skin.
    pub square: Option<ImageDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIconDescriptor {
    pub id: ProfileIconId,
    pub image: ImageDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasteryRecord {
    pub champion_id: ChampionId,
    pub champion_level: i32,
}

/// Image bytes as served. Decoding is left to whoever draws them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ChampionService: Send + Sync {
    async fn get_champion_details(
        &self,
        champion_id: ChampionId,
    ) -> Result<Option<ChampionDetails>, ServiceError>;
}

#[async_trait]
pub trait ProfileIconService: Send + Sync {
    async fn get_profile_icon(
        &self,
        profile_icon_id: ProfileIconId,
    ) -> Result<Option<ProfileIconDescriptor>, ServiceError>;
}

#[async_trait]
pub trait MasteryService: Send + Sync {
    async fn get_champion_mastery(
        &self,
        summoner_id: &SummonerId,
        champion_id: ChampionId,
        region: PlatformRoute,
    ) -> Result<Option<MasteryRecord>, ServiceError>;
}

#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn get_image(&self, descriptor: &ImageDescriptor) -> Result<Option<Image>, ServiceError>;
}
