// crates/marketplace-core/src/error.rs
use crate::geolocation::GeolocationError;
use thiserror::Error;

/// Errors raised by the marketplace core.
///
/// Lookups that find nothing are not errors: `get_ad`, `update_ad` and
/// `delete_ad` report a missing id through `None` / `false`.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The key-value backend refused a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be (de)serialized. A corrupt ad collection
    /// surfaces here and is never repaired in place.
    #[error("malformed persisted data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("persisted value under `{key}` is not valid UTF-8")]
    Encoding { key: String },

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

pub type Result<T> = std::result::Result<T, MarketError>;
