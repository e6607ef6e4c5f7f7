// crates/marketplace-core/src/location.rs

//! # Location Model
//!
//! Canonical [`Location`] values, the [`LocationInput`] shapes found in
//! persisted data, and the geographic helpers used by search:
//! haversine distance, radius checks and city matching.
//!
//! Normalization is total: every [`LocationInput`] maps to a (possibly empty)
//! ordered list of locations whose `city` is non-empty.

use crate::text::parse_radius;
use crate::traits::{NameMatch, Positioned};
use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::PI;

/// Mean Earth radius used by [`calculate_distance`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat` within `[-90, 90]` and `lng` within `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        calculate_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

/// A canonical ad location.
///
/// `city` is never empty once produced by normalization. `radius` (km) and
/// `coordinates` are optional refinements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    #[serde(
        default,
        deserialize_with = "lenient_radius",
        skip_serializing_if = "Option::is_none"
    )]
    pub radius: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// A location carrying only a city name.
    pub fn named(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            radius: None,
            coordinates: None,
        }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius = Some(radius_km);
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    /// Drops coordinates that are non-finite or out of range and a radius
    /// that is not a positive finite number. The city is always kept.
    pub fn sanitized(mut self) -> Self {
        self.coordinates = self.coordinates.filter(Coordinates::is_valid);
        self.radius = self.radius.filter(|r| r.is_finite() && *r > 0.0);
        self
    }
}

impl NameMatch for Location {
    fn name_str(&self) -> &str {
        &self.city
    }
}

impl Positioned for Location {
    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// A structured location object as found in persisted data. Unlike
/// [`Location`], the city may be missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(
        default,
        deserialize_with = "lenient_city",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_radius",
        skip_serializing_if = "Option::is_none"
    )]
    pub radius: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<Coordinates>,
}

/// Every location shape the ad collection has ever stored.
///
/// Deserialization never fails: anything unrecognised lands in
/// [`LocationInput::Other`] and normalizes to nothing. A JSON `null` is
/// modelled by the surrounding `Option<LocationInput>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    /// Legacy single city name.
    Name(String),
    /// Legacy list of city names.
    Names(Vec<String>),
    /// A list of structured objects (or a mix of shapes). Listed before
    /// `Record` so arrays never bind positionally to the struct.
    List(Vec<LocationInput>),
    /// A single structured object.
    Record(LocationRecord),
    Other(serde_json::Value),
}

impl LocationInput {
    /// `true` for the legacy shape rewritten by read-time migration:
    /// a list whose first element is a plain string.
    pub fn is_legacy_list(&self) -> bool {
        match self {
            LocationInput::Names(names) => !names.is_empty(),
            LocationInput::List(items) => matches!(items.first(), Some(LocationInput::Name(_))),
            _ => false,
        }
    }

    pub fn normalize(&self) -> Vec<Location> {
        normalize_locations(Some(self))
    }
}

impl From<Vec<Location>> for LocationInput {
    fn from(locations: Vec<Location>) -> Self {
        LocationInput::List(
            locations
                .into_iter()
                .map(|l| {
                    LocationInput::Record(LocationRecord {
                        city: Some(l.city),
                        radius: l.radius,
                        coordinates: l.coordinates,
                    })
                })
                .collect(),
        )
    }
}

fn named_if_present(city: &str) -> Option<Location> {
    (!city.is_empty()).then(|| Location::named(city))
}

/// Normalizes a single location value.
///
/// - A string becomes `{city}`.
/// - A non-empty list collapses to its **first** element's city; the rest
///   is discarded.
/// - An object with a non-empty `city` passes through with its radius and
///   coordinates.
/// - Anything else (empty list, object without city, empty string) is `None`.
pub fn normalize_location(input: &LocationInput) -> Option<Location> {
    match input {
        LocationInput::Name(city) => named_if_present(city),
        LocationInput::Names(names) => names.first().and_then(|c| named_if_present(c)),
        LocationInput::Record(record) => match record.city.as_deref() {
            Some(city) if !city.is_empty() => Some(Location {
                city: city.to_string(),
                radius: record.radius,
                coordinates: record.coordinates,
            }),
            _ => None,
        },
        LocationInput::List(items) => items
            .first()
            .and_then(normalize_location)
            .map(|first| Location::named(first.city)),
        LocationInput::Other(_) => None,
    }
}

/// Normalizes any location shape into an ordered list of locations.
///
/// Total: never fails, returns an empty list for absent or unusable input.
///
/// # Examples
///
/// ```rust
/// use marketplace_core::location::{normalize_locations, LocationInput};
///
/// let legacy: LocationInput = serde_json::from_str(r#"["Paris", "Lyon"]"#).unwrap();
/// let cities: Vec<_> = normalize_locations(Some(&legacy))
///     .into_iter()
///     .map(|l| l.city)
///     .collect();
/// assert_eq!(cities, ["Paris", "Lyon"]);
///
/// assert!(normalize_locations(None).is_empty());
/// ```
pub fn normalize_locations(input: Option<&LocationInput>) -> Vec<Location> {
    let Some(input) = input else {
        return Vec::new();
    };

    match input {
        LocationInput::Names(names) => names.iter().filter_map(|c| named_if_present(c)).collect(),
        LocationInput::List(items) => items.iter().filter_map(normalize_location).collect(),
        single => normalize_location(single).into_iter().collect(),
    }
}

/// Great-circle distance in kilometers between two points (haversine,
/// Earth radius [`EARTH_RADIUS_KM`]).
///
/// # Examples
///
/// ```rust
/// use marketplace_core::location::calculate_distance;
///
/// let berlin_paris = calculate_distance(52.52, 13.405, 48.8566, 2.3522);
/// assert!((berlin_paris - 878.0).abs() < 5.0);
/// ```
pub fn calculate_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    // `x * PI / 180`, not `to_radians()`: the two differ in the last bit.
    let d_lat = (lat2 - lat1) * PI / 180.0;
    let d_lng = (lng2 - lng1) * PI / 180.0;
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (lat1 * PI / 180.0).cos()
            * (lat2 * PI / 180.0).cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// `true` iff both sides carry coordinates, `radius` is set and non-zero,
/// and the distance between them is at most `radius` km (inclusive).
pub fn is_within_radius(
    location: &impl Positioned,
    search: &impl Positioned,
    radius: Option<f64>,
) -> bool {
    let radius = match radius {
        Some(r) if r != 0.0 && !r.is_nan() => r,
        _ => return false,
    };
    match get_location_distance(location, search) {
        Some(distance) => distance <= radius,
        None => false,
    }
}

/// `true` when `search_city` is empty or any location's city contains it,
/// ignoring case.
pub fn matches_city(locations: &[Location], search_city: &str) -> bool {
    if search_city.is_empty() {
        return true;
    }
    locations.iter().any(|loc| loc.name_contains(search_city))
}

/// Distance in kilometers, or `None` when either side lacks coordinates.
pub fn get_location_distance(location: &impl Positioned, search: &impl Positioned) -> Option<f64> {
    let a = location.coordinates()?;
    let b = search.coordinates()?;
    Some(a.distance_to(&b))
}

/// Accepts a radius stored as a number, a numeric string, or null.
pub(crate) fn lenient_radius<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|r| r.is_finite() && *r > 0.0),
        Some(serde_json::Value::String(s)) => parse_radius(&s),
        _ => None,
    })
}

/// Accepts `{lat, lng}` as numbers or numeric strings. Missing parts,
/// non-finite values and out-of-range points are `None`, never an error,
/// so the surrounding location keeps its city.
pub(crate) fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Option<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coordinates_from_value))
}

fn coordinates_from_value(value: &serde_json::Value) -> Option<Coordinates> {
    let part = |key: &str| match value.get(key)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Some(Coordinates::new(part("lat")?, part("lng")?)).filter(Coordinates::is_valid)
}

/// City as text; a numeric city is kept as its decimal form.
fn lenient_city<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(v: serde_json::Value) -> LocationInput {
        serde_json::from_value(v).unwrap()
    }

    fn cities(locs: &[Location]) -> Vec<&str> {
        locs.iter().map(|l| l.city.as_str()).collect()
    }

    #[test]
    fn every_shape_deserializes_and_normalizes() {
        let cases = [
            (json!([]), vec![]),
            (json!(["A", "B"]), vec!["A", "B"]),
            (json!([{"city": "A"}]), vec!["A"]),
            (json!({"city": "A"}), vec!["A"]),
            (json!("A"), vec!["A"]),
            (json!([{"radius": 5}, {"coordinates": null}]), vec![]),
            (json!(42), vec![]),
            (json!([null, {"city": "B"}]), vec!["B"]),
        ];
        for (raw, expected) in cases {
            let normalized = input(raw.clone()).normalize();
            assert_eq!(cities(&normalized), expected, "input: {raw}");
        }
        assert!(normalize_locations(None).is_empty());
    }

    #[test]
    fn shapes_map_to_expected_variants() {
        assert!(matches!(input(json!("Paris")), LocationInput::Name(_)));
        assert!(matches!(input(json!(["Paris"])), LocationInput::Names(_)));
        assert!(matches!(input(json!({"city": "Paris"})), LocationInput::Record(_)));
        assert!(matches!(input(json!([{"city": "Paris"}])), LocationInput::List(_)));
        assert!(matches!(input(json!(true)), LocationInput::Other(_)));
    }

    #[test]
    fn structured_location_keeps_refinements() {
        let raw = input(json!({
            "city": "Berlin",
            "radius": 10,
            "coordinates": {"lat": 52.52, "lng": 13.405}
        }));
        let loc = normalize_location(&raw).unwrap();
        assert_eq!(loc.city, "Berlin");
        assert_eq!(loc.radius, Some(10.0));
        assert_eq!(loc.coordinates, Some(Coordinates::new(52.52, 13.405)));
    }

    #[test]
    fn string_radius_is_parsed_permissively() {
        let loc = &input(json!([{"city": "X", "radius": "25"}])).normalize()[0];
        assert_eq!(loc.radius, Some(25.0));
        let loc = &input(json!([{"city": "X", "radius": ""}])).normalize()[0];
        assert_eq!(loc.radius, None);
    }

    #[test]
    fn unusable_coordinates_keep_the_city() {
        for raw in [
            json!({"city": "Paris", "coordinates": {}}),
            json!({"city": "Paris", "coordinates": {"lat": null, "lng": 2.35}}),
            json!({"city": "Paris", "coordinates": {"lat": 95.0, "lng": 2.35}}),
            json!({"city": "Paris", "coordinates": "nowhere"}),
        ] {
            let parsed = input(raw.clone());
            assert!(matches!(parsed, LocationInput::Record(_)), "input: {raw}");
            assert_eq!(normalize_location(&parsed), Some(Location::named("Paris")), "input: {raw}");
        }
    }

    #[test]
    fn string_coordinates_are_parsed() {
        let loc = &input(json!([{"city": "Paris", "coordinates": {"lat": "48.8", "lng": " 2.3 "}}]))
            .normalize()[0];
        assert_eq!(loc.coordinates, Some(Coordinates::new(48.8, 2.3)));
    }

    #[test]
    fn numeric_city_is_kept_as_text() {
        let loc = normalize_location(&input(json!({"city": 75001}))).unwrap();
        assert_eq!(loc.city, "75001");
    }

    #[test]
    fn sanitized_drops_invalid_refinements_only() {
        let loc = Location::named("Paris")
            .with_coordinates(f64::NAN, 2.0)
            .with_radius(f64::INFINITY)
            .sanitized();
        assert_eq!(loc, Location::named("Paris"));

        let good = Location::named("Paris").with_coordinates(48.85, 2.35).with_radius(5.0);
        assert_eq!(good.clone().sanitized(), good);
    }

    // Regression pin: a list handed to the single-value normalizer keeps only
    // its first city.
    #[test]
    fn single_normalizer_truncates_lists_to_first_city() {
        let loc = normalize_location(&input(json!(["Paris", "Lyon", "Nice"]))).unwrap();
        assert_eq!(loc, Location::named("Paris"));

        let loc = normalize_location(&input(json!([
            {"city": "Rome", "radius": 3},
            {"city": "Milan"}
        ])))
        .unwrap();
        assert_eq!(loc, Location::named("Rome"));
    }

    #[test]
    fn empty_inputs_normalize_to_none() {
        assert_eq!(normalize_location(&input(json!([]))), None);
        assert_eq!(normalize_location(&input(json!(""))), None);
        assert_eq!(normalize_location(&input(json!({"city": ""}))), None);
        assert_eq!(normalize_location(&input(json!({}))), None);
    }

    #[test]
    fn legacy_detection() {
        assert!(input(json!(["Paris"])).is_legacy_list());
        assert!(!input(json!([])).is_legacy_list());
        assert!(!input(json!([{"city": "Paris"}])).is_legacy_list());
        assert!(!input(json!("Paris")).is_legacy_list());
    }

    #[test]
    fn distance_is_zero_for_identical_points() {
        for (lat, lng) in [(0.0, 0.0), (52.52, 13.405), (-33.86, 151.2), (90.0, 180.0)] {
            assert_eq!(calculate_distance(lat, lng, lat, lng), 0.0);
        }
    }

    #[test]
    fn distance_berlin_paris() {
        let d = calculate_distance(52.52, 13.405, 48.8566, 2.3522);
        assert!((d - 878.0).abs() <= 5.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric_and_respects_triangle_inequality() {
        let berlin = (52.52, 13.405);
        let paris = (48.8566, 2.3522);
        let rome = (41.9028, 12.4964);
        let d = |a: (f64, f64), b: (f64, f64)| calculate_distance(a.0, a.1, b.0, b.1);

        assert!((d(berlin, paris) - d(paris, berlin)).abs() < 1e-9);
        assert!(d(berlin, rome) <= d(berlin, paris) + d(paris, rome));
    }

    #[test]
    fn within_radius_requires_coordinates_and_radius() {
        let here = Location::named("A").with_coordinates(48.8566, 2.3522);
        let same = Coordinates::new(48.8566, 2.3522);
        let bare = Location::named("B");

        assert!(is_within_radius(&here, &same, Some(1.0)));
        assert!(!is_within_radius(&here, &same, Some(0.0)));
        assert!(!is_within_radius(&here, &same, None));
        assert!(!is_within_radius(&bare, &same, Some(1000.0)));
        assert!(!is_within_radius(&here, &None::<Coordinates>, Some(1000.0)));
    }

    #[test]
    fn within_radius_boundary_is_inclusive() {
        let a = Location::named("A").with_coordinates(52.52, 13.405);
        let b = Coordinates::new(48.8566, 2.3522);
        let exact = get_location_distance(&a, &b).unwrap();
        assert!(is_within_radius(&a, &b, Some(exact)));
        assert!(!is_within_radius(&a, &b, Some(exact - 0.001)));
    }

    #[test]
    fn city_matching_is_case_insensitive_substring() {
        let locs = vec![Location::named("Lyon"), Location::named("Paris")];
        assert!(matches_city(&locs, "par"));
        assert!(matches_city(&locs, "LYO"));
        assert!(matches_city(&locs, ""));
        assert!(!matches_city(&locs, "nice"));
        assert!(!matches_city(&[], "par"));
        assert!(matches_city(&[], ""));
    }

    #[test]
    fn coordinates_validity() {
        assert!(Coordinates::new(90.0, -180.0).is_valid());
        assert!(!Coordinates::new(90.1, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, 180.5).is_valid());
    }
}
