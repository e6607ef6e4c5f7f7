// crates/marketplace-core/src/search.rs

//! # Search & Ranking
//!
//! One pure pipeline over a full ad snapshot, applied in a fixed order:
//!
//! 1. Free-text filter (title, description, seller fields, city names).
//! 2. Location filter (radius when a search point and radius are set,
//!    otherwise city substring).
//! 3. Distance annotation from the search point to the ad's first
//!    located place.
//! 4. Stable sort by recency or distance.
//!
//! The snapshot is never mutated; distances live on [`SearchHit`], not on
//! the ad. Identical inputs always produce identical output.

use crate::location::{
    get_location_distance, is_within_radius, lenient_coordinates, lenient_radius, matches_city,
    Coordinates,
};
use crate::model::Ad;
use crate::text::fold_lower;
use crate::traits::Positioned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Distance,
}

impl SortOrder {
    /// Lenient parse; unknown values sort by `Newest`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "oldest" => SortOrder::Oldest,
            "distance" => SortOrder::Distance,
            _ => SortOrder::Newest,
        }
    }
}

/// Where to look. All parts optional: an empty city, no radius and no
/// coordinates disables location filtering entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationFilter {
    pub city: String,
    /// Kilometers. Empty, invalid or zero input means "no radius".
    #[serde(deserialize_with = "lenient_radius")]
    pub radius: Option<f64>,
    #[serde(deserialize_with = "lenient_coordinates")]
    pub coordinates: Option<Coordinates>,
}

impl LocationFilter {
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    pub fn near(lat: f64, lng: f64, radius_km: Option<f64>) -> Self {
        Self {
            city: String::new(),
            radius: radius_km,
            coordinates: Some(Coordinates::new(lat, lng)),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.city.is_empty() || self.coordinates.is_some()
    }

    fn effective_radius(&self) -> Option<f64> {
        self.radius.filter(|r| *r != 0.0 && !r.is_nan())
    }
}

impl Positioned for LocationFilter {
    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchQuery {
    pub free_text: String,
    pub location_filter: LocationFilter,
    pub sort_order: SortOrder,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.free_text = text.into();
        self
    }

    pub fn location(mut self, filter: LocationFilter) -> Self {
        self.location_filter = filter;
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }
}

/// One ranked result: the ad plus its per-query distance (km), if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub ad: &'a Ad,
    pub distance: Option<f64>,
}

/// Runs the full pipeline over `ads`.
///
/// # Examples
///
/// ```rust
/// use marketplace_core::model::Ad;
/// use marketplace_core::search::{search, SearchQuery, SortOrder};
///
/// let ads = vec![
///     Ad { id: "1".into(), created_at: 100, ..Ad::new("Old bike") },
///     Ad { id: "2".into(), created_at: 200, ..Ad::new("New bike") },
/// ];
/// let ids: Vec<_> = search(&ads, &SearchQuery::new().text("BIKE").sort(SortOrder::Newest))
///     .iter()
///     .map(|hit| hit.ad.id.as_str())
///     .collect();
/// assert_eq!(ids, ["2", "1"]);
/// ```
pub fn search<'a>(ads: &'a [Ad], query: &SearchQuery) -> Vec<SearchHit<'a>> {
    let text = fold_lower(&query.free_text);
    let filter = &query.location_filter;

    let mut hits: Vec<SearchHit<'a>> = ads
        .iter()
        .filter(|ad| text.is_empty() || matches_text(ad, &text))
        .filter(|ad| !filter.is_active() || matches_location(ad, filter))
        .map(|ad| SearchHit {
            ad,
            distance: distance_to(ad, filter),
        })
        .collect();
    trace!(total = ads.len(), matched = hits.len(), "search filtered");

    let by_distance = query.sort_order == SortOrder::Distance && filter.coordinates.is_some();
    let newest_first = query.sort_order == SortOrder::Newest;
    hits.sort_by(|a, b| {
        if by_distance {
            match (a.distance, b.distance) {
                (Some(x), Some(y)) => return x.total_cmp(&y),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => {}
            }
        }
        let (x, y) = (a.ad.created_at, b.ad.created_at);
        if newest_first {
            y.cmp(&x)
        } else {
            x.cmp(&y)
        }
    });
    hits
}

/// Case-insensitive substring match against any searchable field.
/// `needle` must already be lowercased.
fn matches_text(ad: &Ad, needle: &str) -> bool {
    let seller = &ad.seller;
    let fields = [
        Some(ad.title.as_str()),
        Some(ad.description.as_str()),
        seller.phone.as_deref(),
        seller.email.as_deref(),
        seller.address.as_deref(),
    ];
    if fields
        .iter()
        .flatten()
        .any(|field| fold_lower(field).contains(needle))
    {
        return true;
    }
    // Cities are matched as one space-joined string, so a query may span
    // two adjacent city names.
    let cities = ad.cities().collect::<Vec<_>>().join(" ");
    fold_lower(&cities).contains(needle)
}

fn matches_location(ad: &Ad, filter: &LocationFilter) -> bool {
    if let (Some(_), Some(radius)) = (filter.coordinates, filter.effective_radius()) {
        return ad
            .locations
            .iter()
            .any(|loc| is_within_radius(loc, filter, Some(radius)));
    }
    if !filter.city.is_empty() {
        return matches_city(&ad.locations, &filter.city);
    }
    true
}

fn distance_to(ad: &Ad, filter: &LocationFilter) -> Option<f64> {
    filter.coordinates?;
    let located = ad.locations.iter().find(|loc| loc.coordinates.is_some())?;
    get_location_distance(located, filter)
}
