// crates/marketplace-core/src/draft.rs

//! Authoring-form payloads and their conversion into ads.

use crate::location::{Coordinates, Location};
use crate::model::{Ad, Seller};
use crate::text::parse_radius;
use serde::{Deserialize, Deserializer, Serialize};

/// One location row of the form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationDraft {
    pub city: String,
    #[serde(deserialize_with = "radius_text")]
    pub radius: String,
    pub coordinates: Option<Coordinates>,
}

impl LocationDraft {
    /// Trimmed city, permissive radius. `None` when the city is blank.
    /// Out-of-range coordinates are dropped, the place is kept.
    pub fn finish(&self) -> Option<Location> {
        let city = self.city.trim();
        if city.is_empty() {
            return None;
        }
        Some(Location {
            city: city.to_string(),
            radius: parse_radius(&self.radius),
            coordinates: self.coordinates.filter(Coordinates::is_valid),
        })
    }
}

/// Radius inputs arrive as text or, from scripted callers, as numbers.
fn radius_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// The full form payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdDraft {
    /// Set when editing an existing ad.
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub video: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub locations: Vec<LocationDraft>,
    pub chat_enabled: bool,
}

impl AdDraft {
    /// Pre-fills a draft from a stored ad, for the edit form. An ad
    /// without places yields one empty row.
    pub fn from_ad(ad: &Ad) -> Self {
        let mut locations: Vec<LocationDraft> = ad
            .locations
            .iter()
            .map(|loc| LocationDraft {
                city: loc.city.clone(),
                radius: loc.radius.map(|r| r.to_string()).unwrap_or_default(),
                coordinates: loc.coordinates,
            })
            .collect();
        if locations.is_empty() {
            locations.push(LocationDraft::default());
        }
        Self {
            id: Some(ad.id.clone()).filter(|id| !id.is_empty()),
            title: ad.title.clone(),
            description: ad.description.clone(),
            images: ad.images.clone(),
            video: ad.video.clone().unwrap_or_default(),
            phone: ad.seller.phone.clone().unwrap_or_default(),
            email: ad.seller.email.clone().unwrap_or_default(),
            address: ad.seller.address.clone().unwrap_or_default(),
            locations,
            chat_enabled: ad.chat_enabled,
        }
    }

    /// The ad this form submits. `id` is empty (and `created_at` zero)
    /// for new ads, leaving assignment to the repository.
    pub fn into_ad(self) -> Ad {
        let video = self.video.trim();
        Ad {
            id: self.id.unwrap_or_default(),
            title: self.title,
            description: self.description,
            images: self.images,
            video: (!video.is_empty()).then(|| video.to_string()),
            seller: Seller::from_fields(&self.phone, &self.email, &self.address),
            locations: self.locations.iter().filter_map(LocationDraft::finish).collect(),
            chat_enabled: self.chat_enabled,
            created_at: 0,
            legacy_location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_rows_are_dropped_and_radius_parsed() {
        let draft: AdDraft = serde_json::from_value(json!({
            "title": "Bike",
            "video": "  ",
            "locations": [
                { "city": "  Paris ", "radius": "10", "coordinates": null },
                { "city": "   ", "radius": "5" },
                { "city": "Lyon", "radius": 25 },
                { "city": "Nice", "radius": "far" }
            ],
            "chatEnabled": true
        }))
        .unwrap();
        let ad = draft.into_ad();
        assert_eq!(ad.id, "");
        assert_eq!(ad.video, None);
        assert!(ad.chat_enabled);
        assert_eq!(
            ad.locations,
            vec![
                Location::named("Paris").with_radius(10.0),
                Location::named("Lyon").with_radius(25.0),
                Location::named("Nice"),
            ]
        );
    }

    #[test]
    fn invalid_coordinates_are_dropped() {
        let row = LocationDraft {
            city: "X".into(),
            radius: String::new(),
            coordinates: Some(Coordinates::new(123.0, 0.0)),
        };
        assert_eq!(row.finish(), Some(Location::named("X")));
    }

    #[test]
    fn edit_form_roundtrip() {
        let ad = Ad {
            id: "42".into(),
            created_at: 9,
            video: Some("https://v".into()),
            seller: Seller::from_fields("555", "a@b.c", ""),
            ..Ad::new("Chair").with_location(
                Location::named("Rome")
                    .with_radius(3.0)
                    .with_coordinates(41.9, 12.5),
            )
        };
        let draft = AdDraft::from_ad(&ad);
        assert_eq!(draft.locations[0].radius, "3");
        let back = draft.into_ad();
        assert_eq!(back.id, "42");
        assert_eq!(back.created_at, 0);
        assert_eq!(back.locations, ad.locations);
        assert_eq!(back.seller, ad.seller);
        assert_eq!(back.video, ad.video);
    }

    #[test]
    fn empty_ad_gets_one_blank_row() {
        let draft = AdDraft::from_ad(&Ad::default());
        assert_eq!(draft.locations, vec![LocationDraft::default()]);
        assert_eq!(draft.id, None);
    }
}
