//! marketplace-core prelude: bring common types and traits into scope.

#![allow(unused_imports)]

pub use crate::api::{format_distance, AdCardView};
pub use crate::cities::{city_list, suggest_cities};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{MarketConfig, StorageKeys};
pub use crate::draft::{AdDraft, LocationDraft};
pub use crate::error::{MarketError, Result};
pub use crate::geolocation::GeolocationError;
pub use crate::location::{
    calculate_distance, get_location_distance, is_within_radius, matches_city,
    normalize_location, normalize_locations, Coordinates, Location, LocationInput,
};
pub use crate::media::{ImageBatch, SlotId};
pub use crate::model::{Ad, AdUpdate, Seller, Theme, UserProfile};
pub use crate::repository::AdRepository;
pub use crate::search::{search, LocationFilter, SearchHit, SearchQuery, SortOrder};
#[cfg(feature = "fs")]
pub use crate::storage::FileStore;
pub use crate::storage::{KeyValueStore, MemoryStore};
pub use crate::traits::{NameMatch, Positioned};
