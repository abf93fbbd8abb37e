use anyhow::Context as _;
use config::Config;
use ddragon::{DataDragon, GameVersion};
use handler::summary::SummaryHandler;
use match_summary_enrich::RowEnricher;
use match_summary_model::{partition, Section};
use riot_api::mastery::MasteryRequester;
use riot_api::match_data::{match_record, MatchDataRequester};
use riven::RiotApi;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod ddragon;
mod handler;
mod message;
mod riot_api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing_subscriber();

    info!("Loading configuration");
    let config = Config::load(std::env::args().nth(1)).await?;
    let platform = config.platform_route()?;
    let selected = config.selected_row()?;

    // Setup Riot API
    info!("Setting up Riot API client");
    let riot_api = Arc::new(RiotApi::new(config.rgapi_key.clone()));

    info!("Fetching match {}", config.match_id);
    let match_data = MatchDataRequester::new(riot_api.clone())
        .get_match(platform.to_regional(), &config.match_id)
        .await?
        .with_context(|| format!("No match found with ID {}", config.match_id))?;
    let record = match_record(&match_data);

    info!("Resolving Data Dragon version");
    let http = reqwest::Client::new();
    let version = GameVersion(match_data.info.game_version.clone())
        .to_data_dragon_version(&http)
        .await?;
    info!("Using Data Dragon {version}");
    let data_dragon = Arc::new(DataDragon::new(http, version, config.locale.clone()));

    let enricher = Arc::new(RowEnricher::new(
        data_dragon.clone(),
        data_dragon.clone(),
        Arc::new(MasteryRequester::new(riot_api)),
        data_dragon,
        platform,
    ));

    let partitioned = partition(&record);
    info!(
        "Partitioned match: {} blue, {} red",
        partitioned.row_count(Section::Blue),
        partitioned.row_count(Section::Red)
    );

    let board = SummaryHandler::new(enricher, partitioned).start().await?;
    println!("{}", message::build_summary(&board));

    if let Some(address) = selected {
        match board.partitioned().select(address)? {
            Some(participant) => println!("{}", message::build_selection(participant)),
            None => info!("{:?} rows are not selectable", address.section),
        }
    }

    Ok(())
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .pretty()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_thread_ids(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::from_default_env())
        .init();
}
