use anyhow::Context as _;
use match_summary_enrich::{Field, RowEnricher, RowUpdate, SummaryBoard};
use match_summary_model::{PartitionedMatch, RowAddress};
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, info};

/// Display side of a match summary: binds every row, starts enrichment for
/// it, and applies field results to the board as they arrive.
#[derive(Debug)]
pub struct SummaryHandler {
    enricher: Arc<RowEnricher>,
    board: SummaryBoard,
}

impl SummaryHandler {
    pub fn new(enricher: Arc<RowEnricher>, partitioned: PartitionedMatch) -> Self {
        Self {
            enricher,
            board: SummaryBoard::new(partitioned),
        }
    }

    /// Run until every bound row has resolved, then hand back the board.
    #[tracing::instrument(skip(self))]
    pub async fn start(mut self) -> anyhow::Result<SummaryBoard> {
        let (tx, rx) = unbounded_channel::<RowUpdate>();

        let addresses: Vec<RowAddress> = self.board.partitioned().addresses().collect();
        let mut fetches = 0;
        for address in addresses {
            let ticket = self.board.bind(address)?;
            fetches += self
                .enricher
                .enrich(self.board.partitioned(), ticket, &tx)?
                .len();
        }
        info!("Started {fetches} fetches");
        // Only the fetch tasks hold senders from here on
        drop(tx);

        let mut updates = UnboundedReceiverStream::new(rx);
        while !self.board.is_complete() {
            let update = updates
                .next()
                .await
                .context("Enrichment ended with rows still pending")?;
            let address = update.ticket.address;
            let field = field_name(&update);
            if self.board.apply(update) {
                debug!("Resolved {field} for {address:?}");
            }
        }

        info!("All rows resolved");
        Ok(self.board)
    }
}

fn field_name(update: &RowUpdate) -> &'static str {
    match update.field {
        Field::ChampionImage(_) => "champion image",
        Field::SummonerImage(_) => "summoner image",
        Field::Mastery(_) => "mastery",
        Field::BanImage { .. } => "ban image",
    }
}
