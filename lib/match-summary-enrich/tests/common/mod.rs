//! Test doubles for the services a [`RowEnricher`] talks to.
//!
//! Each double counts its calls and fails on demand.

use async_trait::async_trait;
use match_summary_enrich::{
    ChampionDetails, ChampionService, Image, ImageDescriptor, ImageLoader, MasteryRecord,
    MasteryService, ProfileIconDescriptor, ProfileIconService, RowEnricher, ServiceError,
};
use match_summary_model::{
    BannedChampion, ChampionId, MatchRecord, Participant, ProfileIconId, SummonerId, TeamSide,
};
use riven::consts::PlatformRoute;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const MASTERY_LEVEL: i32 = 7;

#[derive(Debug, Default)]
pub struct FakeChampions {
    pub calls: AtomicUsize,
    pub failing: HashSet<i32>,
    pub without_square: HashSet<i32>,
}

#[async_trait]
impl ChampionService for FakeChampions {
    async fn get_champion_details(
        &self,
        champion_id: ChampionId,
    ) -> Result<Option<ChampionDetails>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&champion_id.0) {
            return Err(format!("champion {champion_id} not found").into());
        }
        let square = (!self.without_square.contains(&champion_id.0)).then(|| ImageDescriptor {
            url: champion_url(champion_id),
        });
        Ok(Some(ChampionDetails {
            id: champion_id,
            name: format!("Champion{champion_id}"),
            square,
        }))
    }
}

#[derive(Debug, Default)]
pub struct FakeProfileIcons {
    pub calls: AtomicUsize,
    pub missing: HashSet<i32>,
}

#[async_trait]
impl ProfileIconService for FakeProfileIcons {
    async fn get_profile_icon(
        &self,
        profile_icon_id: ProfileIconId,
    ) -> Result<Option<ProfileIconDescriptor>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.missing.contains(&profile_icon_id.0) {
            return Ok(None);
        }
        Ok(Some(ProfileIconDescriptor {
            id: profile_icon_id,
            image: ImageDescriptor {
                url: icon_url(profile_icon_id),
            },
        }))
    }
}

#[derive(Debug, Default)]
pub struct FakeMasteries {
    pub calls: AtomicUsize,
    pub failing: bool,
}

#[async_trait]
impl MasteryService for FakeMasteries {
    async fn get_champion_mastery(
        &self,
        _summoner_id: &SummonerId,
        champion_id: ChampionId,
        _region: PlatformRoute,
    ) -> Result<Option<MasteryRecord>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err("rate limited".into());
        }
        Ok(Some(MasteryRecord {
            champion_id,
            champion_level: MASTERY_LEVEL,
        }))
    }
}

#[derive(Debug, Default)]
pub struct FakeImages {
    pub calls: AtomicUsize,
    pub failing: HashSet<String>,
    /// Per-URL latency, to shuffle the order results come back in.
    pub delays: HashMap<String, Duration>,
}

#[async_trait]
impl ImageLoader for FakeImages {
    async fn get_image(&self, descriptor: &ImageDescriptor) -> Result<Option<Image>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&descriptor.url) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&descriptor.url) {
            return Err(format!("connection reset loading {}", descriptor.url).into());
        }
        Ok(Some(image_for(&descriptor.url)))
    }
}

#[derive(Debug, Default)]
pub struct Fakes {
    pub champions: Arc<FakeChampions>,
    pub profile_icons: Arc<FakeProfileIcons>,
    pub masteries: Arc<FakeMasteries>,
    pub images: Arc<FakeImages>,
}

impl Fakes {
    pub fn enricher(&self) -> Arc<RowEnricher> {
        Arc::new(RowEnricher::new(
            self.champions.clone(),
            self.profile_icons.clone(),
            self.masteries.clone(),
            self.images.clone(),
            PlatformRoute::NA1,
        ))
    }
}

pub fn champion_url(champion_id: ChampionId) -> String {
    format!("img/champion/{champion_id}.png")
}

pub fn icon_url(profile_icon_id: ProfileIconId) -> String {
    format!("img/profileicon/{profile_icon_id}.png")
}

pub fn image_for(url: &str) -> Image {
    Image {
        bytes: url.as_bytes().to_vec(),
        content_type: Some("image/png".into()),
    }
}

pub fn participant(team: TeamSide, champion: i32, summoner_id: Option<&str>) -> Participant {
    Participant {
        team,
        champion_id: ChampionId(champion),
        profile_icon_id: ProfileIconId(4000 + champion as i32),
        summoner_name: format!("Summoner{champion}"),
        summoner_id: summoner_id.map(|id| SummonerId(id.to_string())),
    }
}

/// Ten players alternating sides, three bans per side.
pub fn full_match() -> MatchRecord {
    let participants = (0..10)
        .map(|i| {
            let team = if i % 2 == 0 { TeamSide::Blue } else { TeamSide::Red };
            participant(team, i + 1, Some(&format!("puuid-{i}")))
        })
        .collect();
    let banned_champions = (0..6)
        .map(|i| BannedChampion {
            team: if i < 3 { TeamSide::Blue } else { TeamSide::Red },
            champion_id: ChampionId(100 + i as i32),
            ban_order: (i % 3) as u8,
        })
        .collect();
    MatchRecord {
        participants,
        banned_champions,
    }
}
