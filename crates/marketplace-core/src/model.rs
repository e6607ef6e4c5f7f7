// crates/marketplace-core/src/model.rs
use crate::location::{normalize_locations, Location, LocationInput};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Contact details of the person selling. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Seller {
    /// Builds a seller from form fields; blank fields become `None`.
    pub fn from_fields(phone: &str, email: &str, address: &str) -> Self {
        fn non_blank(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Self {
            phone: non_blank(phone),
            email: non_blank(email),
            address: non_blank(address),
        }
    }
}

/// A classified ad.
///
/// `id` and `created_at` are assigned once by the repository and never
/// change; everything else is replaced through [`AdUpdate`]. An empty `id`
/// or a zero `created_at` means "not assigned yet".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Data URIs or URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default)]
    pub seller: Seller,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub chat_enabled: bool,
    /// Milliseconds since the Unix epoch. Missing in some old records (0).
    #[serde(default)]
    pub created_at: i64,
    /// Singular `location` field written by the earliest app versions.
    /// Only the city index still reads it.
    #[serde(rename = "location", default, skip_serializing_if = "Option::is_none")]
    pub legacy_location: Option<LocationInput>,
}

impl Ad {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_seller(mut self, seller: Seller) -> Self {
        self.seller = seller;
        self
    }

    /// Cities of all locations, in order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|l| l.city.as_str())
    }
}

/// Shallow patch applied by `update_ad`.
///
/// Fields left `None` keep their stored value. `id` and `createdAt` are not
/// patchable; if a caller sends them they are ignored. `video` distinguishes
/// "not sent" (`None`) from an explicit `null` (`Some(None)`, clears it).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub video: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<Seller>,
    /// Any stored location shape. An explicit `null` clears the list.
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub locations: Option<Option<LocationInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_enabled: Option<bool>,
}

impl AdUpdate {
    /// A patch that overwrites every replaceable field with `ad`'s values.
    pub fn replacing(ad: Ad) -> Self {
        Self {
            title: Some(ad.title),
            description: Some(ad.description),
            images: Some(ad.images),
            video: Some(ad.video),
            seller: Some(ad.seller),
            locations: Some(Some(ad.locations.into())),
            chat_enabled: Some(ad.chat_enabled),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the patch over `ad`, returning the result.
    pub fn apply_to(self, mut ad: Ad) -> Ad {
        if let Some(title) = self.title {
            ad.title = title;
        }
        if let Some(description) = self.description {
            ad.description = description;
        }
        if let Some(images) = self.images {
            ad.images = images;
        }
        if let Some(video) = self.video {
            ad.video = video;
        }
        if let Some(seller) = self.seller {
            ad.seller = seller;
        }
        if let Some(locations) = self.locations {
            ad.locations = normalize_locations(locations.as_ref());
        }
        if let Some(chat_enabled) = self.chat_enabled {
            ad.chat_enabled = chat_enabled;
        }
        ad
    }
}

/// Present-but-null deserializes to `Some(None)`; absence is handled by
/// `#[serde(default)]`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The local user's profile record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub profile_picture: String,
}

/// UI color scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Lenient parse: anything other than `dark` is `Light`.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ad_serializes_with_camel_case_keys() {
        let ad = Ad {
            id: "1".into(),
            chat_enabled: true,
            created_at: 100,
            ..Ad::new("Bike")
        };
        let v = serde_json::to_value(&ad).unwrap();
        assert_eq!(v["chatEnabled"], json!(true));
        assert_eq!(v["createdAt"], json!(100));
        assert!(v.get("video").is_none());
        assert!(v.get("location").is_none());
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let ad = Ad {
            id: "7".into(),
            created_at: 42,
            description: "old".into(),
            video: Some("https://v".into()),
            ..Ad::new("Old title")
        };
        let patch: AdUpdate = serde_json::from_value(json!({
            "title": "New title",
            "id": "hijack",
            "createdAt": 1
        }))
        .unwrap();
        let merged = patch.apply_to(ad);
        assert_eq!(merged.title, "New title");
        assert_eq!(merged.description, "old");
        assert_eq!(merged.id, "7");
        assert_eq!(merged.created_at, 42);
        assert_eq!(merged.video.as_deref(), Some("https://v"));
    }

    #[test]
    fn explicit_null_clears_video() {
        let patch: AdUpdate = serde_json::from_value(json!({ "video": null })).unwrap();
        assert_eq!(patch.video, Some(None));
        let merged = patch.apply_to(Ad {
            video: Some("x".into()),
            ..Ad::default()
        });
        assert_eq!(merged.video, None);

        let absent: AdUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(absent.is_empty());
    }

    #[test]
    fn update_locations_accept_legacy_shapes() {
        let patch: AdUpdate = serde_json::from_value(json!({ "locations": ["Oslo"] })).unwrap();
        let merged = patch.apply_to(Ad::default());
        assert_eq!(merged.locations, vec![Location::named("Oslo")]);
    }

    #[test]
    fn explicit_null_clears_locations() {
        let ad = Ad::new("x").with_location(Location::named("Paris"));

        let cleared: AdUpdate = serde_json::from_value(json!({ "locations": null })).unwrap();
        assert_eq!(cleared.locations, Some(None));
        assert!(cleared.apply_to(ad.clone()).locations.is_empty());

        let untouched: AdUpdate = serde_json::from_value(json!({ "title": "y" })).unwrap();
        assert_eq!(untouched.locations, None);
        assert_eq!(untouched.apply_to(ad).locations, vec![Location::named("Paris")]);
    }

    #[test]
    fn theme_parsing_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("purple"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }

    #[test]
    fn seller_blank_fields_are_dropped() {
        let s = Seller::from_fields(" 555 ", "", "  ");
        assert_eq!(s.phone.as_deref(), Some("555"));
        assert_eq!(s.email, None);
        assert_eq!(s.address, None);
    }
}
