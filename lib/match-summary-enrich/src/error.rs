use thiserror::Error;

/// Why a single field of a row could not be filled. Only ever logged; the
/// field itself resolves to absent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("{what} lookup for {id} failed: {message}")]
    Lookup {
        what: &'static str,
        id: String,
        message: String,
    },
    #[error("{what} lookup for {id} returned no data")]
    NotFound { what: &'static str, id: String },
    #[error("champion {0} has no square image")]
    MissingSquareImage(String),
    #[error("loading image {url} failed: {message}")]
    ImageLoad { url: String, message: String },
    #[error("image {0} returned no data")]
    EmptyImage(String),
}
