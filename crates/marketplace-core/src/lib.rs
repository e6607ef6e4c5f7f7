// crates/marketplace-core/src/lib.rs

//! # marketplace-core
//!
//! The data core of a local-first classified-ads marketplace: everything
//! lives on the user's device, behind a small key-value store.
//!
//! - [`location`]: canonical locations, legacy-shape normalization,
//!   haversine distance, radius and city matching
//! - [`repository`]: CRUD over the persisted ad collection, read-time
//!   migration, user profile and theme
//! - [`search`]: free-text and location filtering, distance annotation and
//!   ordering
//! - [`cities`]: the distinct city list feeding autocomplete
//!
//! ```rust
//! use marketplace_core::prelude::*;
//!
//! # fn main() -> marketplace_core::Result<()> {
//! let mut repo = AdRepository::new(MemoryStore::new());
//! repo.save_ad(Ad::new("Road bike").with_location(Location::named("Paris")))?;
//!
//! let ads = repo.get_ads()?;
//! let hits = search(&ads, &SearchQuery::new().location(LocationFilter::city("par")));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(repo.city_list()?, ["Paris"]);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cities;
pub mod clock;
pub mod config;
pub mod draft;
pub mod error;
pub mod geolocation;
pub mod location;
pub mod media;
pub mod migrate;
pub mod model;
pub mod prelude;
pub mod repository;
pub mod search;
pub mod storage;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::error::{MarketError, Result};
pub use crate::location::{
    calculate_distance, get_location_distance, is_within_radius, matches_city,
    normalize_location, normalize_locations, Coordinates, Location, LocationInput,
};
pub use crate::model::{Ad, AdUpdate, Seller, Theme, UserProfile};
pub use crate::repository::AdRepository;
pub use crate::search::{search, LocationFilter, SearchHit, SearchQuery, SortOrder};
