use crate::address::Section;
use thiserror::Error;

/// A row address that the row counts never handed out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressingError {
    #[error("section {0} does not exist")]
    UnknownSection(usize),
    #[error("{section:?} section has {count} rows, row {index} requested")]
    RowOutOfRange {
        section: Section,
        index: usize,
        count: usize,
    },
    #[error("{0:?} section does not hold participants")]
    NotAParticipantRow(Section),
    #[error("{0:?} section does not hold bans")]
    NotABanRow(Section),
}
