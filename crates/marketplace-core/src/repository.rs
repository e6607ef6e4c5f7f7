// crates/marketplace-core/src/repository.rs

//! # Ad Repository
//!
//! The single owner of persisted state. Every operation is a full
//! read-modify-write of the serialized collection under one fixed key;
//! callers receive owned snapshots and never mutate stored data in place.
//!
//! | Method | Missing id |
//! |--------|------------|
//! | [`get_ad`](AdRepository::get_ad) | `Ok(None)` |
//! | [`update_ad`](AdRepository::update_ad) | `Ok(None)`, nothing written |
//! | [`delete_ad`](AdRepository::delete_ad) | `Ok(false)`, nothing written |

use crate::cities::city_list;
use crate::clock::{Clock, SystemClock};
use crate::config::{MarketConfig, StorageKeys};
use crate::error::Result;
use crate::location::Location;
use crate::migrate::migrate_collection;
use crate::model::{Ad, AdUpdate, Theme, UserProfile};
use crate::storage::KeyValueStore;
use tracing::{debug, warn};

pub struct AdRepository<S, C = SystemClock> {
    store: S,
    clock: C,
    keys: StorageKeys,
}

impl<S: KeyValueStore> AdRepository<S, SystemClock> {
    /// Repository over `store` with the wall clock and default keys.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> AdRepository<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            keys: StorageKeys::default(),
        }
    }

    pub fn from_config(store: S, clock: C, config: &MarketConfig) -> Self {
        Self::with_clock(store, clock).with_keys(config.keys.clone())
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // -----------------------------------------------------------------------
    // Ads
    // -----------------------------------------------------------------------

    /// All ads in stored (insertion) order, migrated to canonical form.
    ///
    /// An absent collection is empty; a corrupt one is an error.
    pub fn get_ads(&self) -> Result<Vec<Ad>> {
        let Some(json) = self.store.get_text(&self.keys.ads)? else {
            return Ok(Vec::new());
        };
        let ads = migrate_collection(&json)?;
        debug!(key = %self.keys.ads, count = ads.len(), "loaded ads");
        Ok(ads)
    }

    pub fn get_ad(&self, id: &str) -> Result<Option<Ad>> {
        Ok(self.get_ads()?.into_iter().find(|ad| ad.id == id))
    }

    /// Appends `ad`, assigning `id` and `created_at` when they are unset.
    ///
    /// Returns the record as stored.
    pub fn save_ad(&mut self, mut ad: Ad) -> Result<Ad> {
        let mut ads = self.get_ads()?;
        let now = self.clock.now_millis();
        if ad.id.is_empty() {
            ad.id = unique_id(&ads, now);
        }
        if ad.created_at == 0 {
            ad.created_at = now;
        }
        sanitize_locations(&mut ad);
        ads.push(ad.clone());
        self.write_ads(&ads)?;
        debug!(ad_id = %ad.id, "saved ad");
        Ok(ad)
    }

    /// Shallow-merges `updates` over the ad with `id`.
    ///
    /// Returns `Ok(None)` without writing when no such ad exists.
    pub fn update_ad(&mut self, id: &str, updates: AdUpdate) -> Result<Option<Ad>> {
        let mut ads = self.get_ads()?;
        let Some(slot) = ads.iter_mut().find(|ad| ad.id == id) else {
            debug!(ad_id = %id, "update skipped, ad not found");
            return Ok(None);
        };
        let mut merged = updates.apply_to(slot.clone());
        sanitize_locations(&mut merged);
        *slot = merged.clone();
        self.write_ads(&ads)?;
        debug!(ad_id = %id, "updated ad");
        Ok(Some(merged))
    }

    /// Removes the ad with `id`; `true` iff the collection shrank.
    pub fn delete_ad(&mut self, id: &str) -> Result<bool> {
        let mut ads = self.get_ads()?;
        let before = ads.len();
        ads.retain(|ad| ad.id != id);
        if ads.len() == before {
            return Ok(false);
        }
        self.write_ads(&ads)?;
        debug!(ad_id = %id, "deleted ad");
        Ok(true)
    }

    /// Submit path of the authoring form: updates the ad when `ad.id`
    /// names an existing record, saves a new one otherwise.
    pub fn upsert(&mut self, ad: Ad) -> Result<Ad> {
        if !ad.id.is_empty() {
            let id = ad.id.clone();
            if let Some(updated) = self.update_ad(&id, AdUpdate::replacing(ad.clone()))? {
                return Ok(updated);
            }
        }
        self.save_ad(ad)
    }

    /// Distinct city names across all ads, sorted.
    pub fn city_list(&self) -> Result<Vec<String>> {
        Ok(city_list(&self.get_ads()?))
    }

    fn write_ads(&mut self, ads: &[Ad]) -> Result<()> {
        let json = serde_json::to_vec(ads)?;
        self.store.set(&self.keys.ads, &json)?;
        debug!(key = %self.keys.ads, count = ads.len(), bytes = json.len(), "persisted ads");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // User profile
    // -----------------------------------------------------------------------

    pub fn get_user(&self) -> Result<UserProfile> {
        match self.store.get_text(&self.keys.user)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(UserProfile::default()),
        }
    }

    pub fn save_user(&mut self, user: UserProfile) -> Result<UserProfile> {
        let json = serde_json::to_vec(&user)?;
        self.store.set(&self.keys.user, &json)?;
        Ok(user)
    }

    // -----------------------------------------------------------------------
    // Theme
    // -----------------------------------------------------------------------

    /// Stored theme, `Light` when unset.
    pub fn get_theme(&self) -> Result<Theme> {
        Ok(self
            .store
            .get_text(&self.keys.theme)?
            .map(|s| Theme::parse(&s))
            .unwrap_or_default())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        self.store.set(&self.keys.theme, theme.as_str().as_bytes())?;
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.get_theme()?.toggled();
        self.set_theme(next)
    }
}

/// Strips refinements that would not survive a JSON round-trip
/// (NaN and infinities serialize as `null`) and places without a city.
fn sanitize_locations(ad: &mut Ad) {
    let before = ad.locations.clone();
    ad.locations = std::mem::take(&mut ad.locations)
        .into_iter()
        .filter(|loc| !loc.city.is_empty())
        .map(Location::sanitized)
        .collect();
    if ad.locations != before {
        debug!(ad_id = %ad.id, "dropped invalid location data before write");
    }
}

/// Time-derived id, suffixed when another ad already holds it.
fn unique_id(ads: &[Ad], now_millis: i64) -> String {
    let base = now_millis.to_string();
    let taken = |candidate: &str| ads.iter().any(|ad| ad.id == candidate);
    if !taken(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            warn!(ad_id = %candidate, "id collision, suffixed");
            return candidate;
        }
        n += 1;
    }
}
