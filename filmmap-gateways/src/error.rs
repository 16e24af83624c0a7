use thiserror::Error;

/// Reasons why a single provider lookup produced no location.
///
/// These never leave the gateway, they are only logged.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Provider error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("Invalid coordinate: {0}")]
    Coordinate(String),
}
