// crates/marketplace-core/src/migrate.rs

//! Read-time migration of persisted ad records.
//!
//! Records are deserialized into [`StoredAd`], which accepts every location
//! shape ever written, and converted to [`Ad`] with canonical locations
//! before any caller sees them. The persisted bytes are left alone; the next
//! write of the collection stores the canonical form.

use crate::location::{normalize_locations, LocationInput};
use crate::model::{Ad, Seller};
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// An ad exactly as found in storage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAd {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub seller: Option<Seller>,
    #[serde(default)]
    pub locations: Option<LocationInput>,
    #[serde(default)]
    pub chat_enabled: Option<bool>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub location: Option<LocationInput>,
}

/// Old builds stored numeric ids; both spellings compare as text.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

impl StoredAd {
    pub fn has_legacy_locations(&self) -> bool {
        self.locations
            .as_ref()
            .is_some_and(LocationInput::is_legacy_list)
    }
}

/// Converts one stored record into its canonical [`Ad`].
///
/// Idempotent: migrating an already canonical record yields the same ad.
pub fn migrate_ad(stored: StoredAd) -> Ad {
    if stored.has_legacy_locations() {
        debug!(ad_id = %stored.id, "migrating legacy string locations");
    }
    Ad {
        locations: normalize_locations(stored.locations.as_ref()),
        id: stored.id,
        title: stored.title.unwrap_or_default(),
        description: stored.description.unwrap_or_default(),
        images: stored.images.unwrap_or_default(),
        video: stored.video,
        seller: stored.seller.unwrap_or_default(),
        chat_enabled: stored.chat_enabled.unwrap_or(false),
        created_at: stored.created_at.unwrap_or(0),
        legacy_location: stored.location,
    }
}

/// Parses a serialized collection and migrates every record.
///
/// Malformed JSON is returned as an error; nothing is repaired.
pub fn migrate_collection(json: &str) -> crate::Result<Vec<Ad>> {
    let stored: Vec<StoredAd> = serde_json::from_str(json)?;
    Ok(stored.into_iter().map(migrate_ad).collect())
}
