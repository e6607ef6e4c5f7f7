// crates/marketplace-core/src/config.rs
use serde::{Deserialize, Serialize};

/// The fixed keys the repository reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// JSON array of ads.
    pub ads: String,
    /// JSON object `{ profilePicture }`.
    pub user: String,
    /// Plain string, `light` or `dark`.
    pub theme: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            ads: "marketplace_ads".to_string(),
            user: "marketplace_user".to_string(),
            theme: "marketplace_theme".to_string(),
        }
    }
}

/// Runtime configuration. Every field is optional when deserialized.
///
/// ```rust
/// use marketplace_core::config::MarketConfig;
///
/// let cfg: MarketConfig = serde_json::from_str(r#"{ "suggestion_limit": 8 }"#).unwrap();
/// assert_eq!(cfg.suggestion_limit, 8);
/// assert_eq!(cfg.keys.ads, "marketplace_ads");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub keys: StorageKeys,
    /// Maximum number of city autocomplete suggestions.
    pub suggestion_limit: usize,
    /// Characters of the description shown on an ad card.
    pub excerpt_chars: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            suggestion_limit: 5,
            excerpt_chars: 120,
        }
    }
}

impl MarketConfig {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
