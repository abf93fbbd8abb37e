pub mod board;
pub mod enricher;
pub mod error;
pub mod service;

pub use board::{
    BanRow, BanSlot, Fetch, Field, ParticipantRow, RowContent, RowState, RowTicket, RowUpdate,
    SummaryBoard,
};
pub use enricher::RowEnricher;
pub use error::FetchError;
pub use service::{
    ChampionDetails, ChampionService, Image, ImageDescriptor, ImageLoader, MasteryRecord,
    MasteryService, ProfileIconDescriptor, ProfileIconService, ServiceError,
};
