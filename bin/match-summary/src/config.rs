use anyhow::Context;
use match_summary_model::RowAddress;
use riven::consts::PlatformRoute;
use serde::Deserialize;
use std::path::Path;
use tokio::fs::read_to_string;

const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub rgapi_key: String,
    /// Platform the match was played on, e.g. `NA1` or `EUW1`.
    pub platform: String,
    pub match_id: String,
    pub locale: String,
    /// Row to open after the summary is drawn, as `section:row`.
    pub selected: Option<String>,
}

impl Config {
    pub async fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Default::default(),
        };

        config.rgapi_key = std::env::var("RGAPI_KEY").ok().unwrap_or(config.rgapi_key);
        config.platform = std::env::var("PLATFORM").ok().unwrap_or(config.platform);
        config.match_id = std::env::var("MATCH_ID").ok().unwrap_or(config.match_id);
        config.locale = std::env::var("DDRAGON_LOCALE")
            .ok()
            .unwrap_or(config.locale);
        if config.locale.is_empty() {
            config.locale = DEFAULT_LOCALE.to_string();
        }
        config.selected = std::env::var("SELECTED_ROW").ok().or(config.selected);

        if config.rgapi_key.is_empty() {
            anyhow::bail!("No Riot API key configured (RGAPI_KEY)");
        }
        if config.match_id.is_empty() {
            anyhow::bail!("No match ID configured (MATCH_ID)");
        }

        Ok(config)
    }

    async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = read_to_string(path).await?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn platform_route(&self) -> anyhow::Result<PlatformRoute> {
        self.platform
            .parse()
            .with_context(|| format!("Unknown platform {:?}", self.platform))
    }

    pub fn selected_row(&self) -> anyhow::Result<Option<RowAddress>> {
        let Some(selected) = &self.selected else {
            return Ok(None);
        };
        let (section, index) = selected
            .split_once(':')
            .with_context(|| format!("Selected row {selected:?} is not section:row"))?;
        let address = RowAddress::from_raw(section.trim().parse()?, index.trim().parse()?)?;
        Ok(Some(address))
    }
}
