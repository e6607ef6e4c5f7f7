// crates/marketplace-core/src/cities.rs

//! City index for autocomplete.
//!
//! Derived on every call from the full ad snapshot; there is no cached or
//! incremental index, so it can never go stale.

use crate::location::{normalize_locations, Location};
use crate::model::Ad;
use crate::traits::NameMatch;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Locations of `ad`, falling back to the singular legacy `location` field
/// when the ad has none of its own.
fn locations_for_index(ad: &Ad) -> Cow<'_, [Location]> {
    if ad.locations.is_empty() {
        Cow::Owned(normalize_locations(ad.legacy_location.as_ref()))
    } else {
        Cow::Borrowed(&ad.locations)
    }
}

/// Distinct city names across `ads`, sorted alphabetically.
///
/// # Examples
///
/// ```rust
/// use marketplace_core::cities::city_list;
/// use marketplace_core::location::Location;
/// use marketplace_core::model::Ad;
///
/// let ads = vec![
///     Ad::new("a").with_location(Location::named("Lyon")),
///     Ad::new("b").with_location(Location::named("Berlin")).with_location(Location::named("Lyon")),
/// ];
/// assert_eq!(city_list(&ads), ["Berlin", "Lyon"]);
/// ```
pub fn city_list(ads: &[Ad]) -> Vec<String> {
    let mut cities = BTreeSet::new();
    for ad in ads {
        for loc in locations_for_index(ad).iter() {
            if !loc.city.is_empty() {
                cities.insert(loc.city.clone());
            }
        }
    }
    cities.into_iter().collect()
}

/// Autocomplete: the first `limit` cities containing `input`, ignoring
/// case. Empty input suggests nothing.
pub fn suggest_cities<'a>(cities: &'a [String], input: &str, limit: usize) -> Vec<&'a str> {
    if input.is_empty() {
        return Vec::new();
    }
    cities
        .iter()
        .filter(|city| city.as_str().name_contains(input))
        .take(limit)
        .map(String::as_str)
        .collect()
}
