use async_trait::async_trait;
use match_summary_enrich::{
    ChampionDetails, ChampionService, Image, ImageDescriptor, ImageLoader, ProfileIconDescriptor,
    ProfileIconService, ServiceError,
};
use match_summary_model::{ChampionId, ProfileIconId};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use std::{collections::HashMap, fmt::Display};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

const DDRAGON_URL: &str = "https://ddragon.leagueoflegends.com";

#[derive(Debug, Deserialize)]
struct ChampionMap {
    data: HashMap<String, Champion>,
}

#[derive(Debug, Deserialize)]
struct Champion {
    key: String,
    name: String,
    image: ImageRef,
}

impl ChampionMap {
    /// Re-key by the numeric champion ID the match reports.
    fn by_id(self) -> HashMap<i32, Champion> {
        self.data
            .into_values()
            .filter_map(|champion| match champion.key.parse() {
                Ok(id) => Some((id, champion)),
                Err(_) => {
                    warn!("Ignoring champion {} with key {:?}", champion.name, champion.key);
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ProfileIconMap {
    data: HashMap<String, ProfileIcon>,
}

impl ProfileIconMap {
    fn by_id(self) -> HashMap<i32, ProfileIcon> {
        self.data.into_values().map(|icon| (icon.id, icon)).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ProfileIcon {
    id: i32,
    image: ImageRef,
}

#[derive(Debug, Deserialize)]
struct ImageRef {
    full: String,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GameVersion(pub String);

impl GameVersion {
    /// Major and minor part of the game version, e.g. `14.10` for `14.10.585.9`.
    fn patch(&self) -> String {
        self.0.split('.').take(2).collect::<Vec<&str>>().join(".")
    }

    /// Pick the Data Dragon release serving this game version's patch.
    pub fn find_data_dragon_version(&self, versions: &[String]) -> Option<DataDragonVersion> {
        let patch = format!("{}.", self.patch());
        versions
            .iter()
            .find(|version| version.starts_with(&patch))
            .map(|version| DataDragonVersion(version.clone()))
    }

    pub async fn to_data_dragon_version(self, http: &Client) -> anyhow::Result<DataDragonVersion> {
        let versions = fetch_versions(http).await?;
        match self.find_data_dragon_version(&versions) {
            Some(version) => Ok(version),
            None => anyhow::bail!("Failed to find Data Dragon version for {}", self.0),
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct DataDragonVersion(String);

impl Display for DataDragonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Champion, profile icon, and image lookups against Data Dragon for one
/// release. The champion and profile icon listings are downloaded once per
/// instance; images are fetched on every call.
#[derive(Debug)]
pub struct DataDragon {
    http: Client,
    version: DataDragonVersion,
    locale: String,
    champions: OnceCell<HashMap<i32, Champion>>,
    profile_icons: OnceCell<HashMap<i32, ProfileIcon>>,
}

impl DataDragon {
    pub fn new(http: Client, version: DataDragonVersion, locale: String) -> Self {
        Self {
            http,
            version,
            locale,
            champions: OnceCell::new(),
            profile_icons: OnceCell::new(),
        }
    }

    fn data_url(&self, file: &str) -> String {
        format!(
            "{DDRAGON_URL}/cdn/{}/data/{}/{file}",
            self.version, self.locale
        )
    }

    fn image_url(&self, kind: &str, image: &ImageRef) -> ImageDescriptor {
        ImageDescriptor {
            url: format!("{DDRAGON_URL}/cdn/{}/img/{kind}/{}", self.version, image.full),
        }
    }

    async fn champions(&self) -> reqwest::Result<&HashMap<i32, Champion>> {
        self.champions
            .get_or_try_init(|| async {
                let champions = self
                    .http
                    .get(self.data_url("champion.json"))
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<ChampionMap>()
                    .await?
                    .by_id();
                debug!("Loaded {} champions for {}", champions.len(), self.version);
                Ok(champions)
            })
            .await
    }

    async fn profile_icons(&self) -> reqwest::Result<&HashMap<i32, ProfileIcon>> {
        self.profile_icons
            .get_or_try_init(|| async {
                let icons = self
                    .http
                    .get(self.data_url("profileicon.json"))
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<ProfileIconMap>()
                    .await?
                    .by_id();
                debug!("Loaded {} profile icons for {}", icons.len(), self.version);
                Ok(icons)
            })
            .await
    }
}

#[async_trait]
impl ChampionService for DataDragon {
    async fn get_champion_details(
        &self,
        champion_id: ChampionId,
    ) -> Result<Option<ChampionDetails>, ServiceError> {
        let champions = self.champions().await?;
        Ok(champions
            .get(&champion_id.0)
            .map(|champion| ChampionDetails {
                id: champion_id,
                square: Some(self.image_url("champion", &champion.image)),
                name: champion.name.clone(),
            }))
    }
}

#[async_trait]
impl ProfileIconService for DataDragon {
    async fn get_profile_icon(
        &self,
        profile_icon_id: ProfileIconId,
    ) -> Result<Option<ProfileIconDescriptor>, ServiceError> {
        let icons = self.profile_icons().await?;
        Ok(icons
            .get(&profile_icon_id.0)
            .map(|icon| ProfileIconDescriptor {
                id: profile_icon_id,
                image: self.image_url("profileicon", &icon.image),
            }))
    }
}

#[async_trait]
impl ImageLoader for DataDragon {
    async fn get_image(&self, descriptor: &ImageDescriptor) -> Result<Option<Image>, ServiceError> {
        let response = self
            .http
            .get(&descriptor.url)
            .send()
            .await?
            .error_for_status()?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        debug!("Loaded {} bytes from {}", bytes.len(), descriptor.url);
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(Image {
            bytes: bytes.to_vec(),
            content_type,
        }))
    }
}

async fn fetch_versions(http: &Client) -> anyhow::Result<Vec<String>> {
    let url = format!("{DDRAGON_URL}/api/versions.json");
    Ok(http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?)
}
