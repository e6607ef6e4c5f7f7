// crates/marketplace-core/src/api.rs

//! Serializable views for presentation layers.
//!
//! The core hands these to the UI instead of asking it to re-derive
//! display strings from raw ads.

use crate::config::MarketConfig;
use crate::model::Ad;
use crate::search::SearchHit;
use crate::text::excerpt;
use serde::Serialize;

/// Human-readable distance: meters below one kilometer, otherwise
/// kilometers with one decimal.
///
/// ```rust
/// use marketplace_core::api::format_distance;
///
/// assert_eq!(format_distance(0.35), "350m away");
/// assert_eq!(format_distance(12.345), "12.3km away");
/// ```
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m away", (km * 1000.0).round() as i64)
    } else {
        format!("{km:.1}km away")
    }
}

/// Everything an ad card in a result grid shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCardView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    /// First `excerpt_chars` characters followed by `...`; empty when the
    /// ad has no description.
    pub excerpt: String,
    pub image: Option<&'a str>,
    /// First city, with ` +N` when the ad lists more places.
    pub location_label: Option<String>,
    pub distance_label: Option<String>,
}

impl<'a> AdCardView<'a> {
    pub fn new(ad: &'a Ad, distance: Option<f64>, config: &MarketConfig) -> Self {
        let title = if ad.title.is_empty() {
            "Untitled"
        } else {
            ad.title.as_str()
        };
        let excerpt = if ad.description.is_empty() {
            String::new()
        } else {
            format!("{}...", excerpt(&ad.description, config.excerpt_chars))
        };
        let location_label = ad.locations.first().map(|first| {
            match ad.locations.len() {
                1 => first.city.clone(),
                n => format!("{} +{}", first.city, n - 1),
            }
        });
        Self {
            id: &ad.id,
            title,
            excerpt,
            image: ad.images.first().map(String::as_str),
            location_label,
            distance_label: distance.map(format_distance),
        }
    }

    pub fn from_hit(hit: &SearchHit<'a>, config: &MarketConfig) -> Self {
        Self::new(hit.ad, hit.distance, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    #[test]
    fn distance_labels() {
        assert_eq!(format_distance(0.0), "0m away");
        assert_eq!(format_distance(0.9994), "999m away");
        assert_eq!(format_distance(1.0), "1.0km away");
        assert_eq!(format_distance(878.46), "878.5km away");
    }

    #[test]
    fn card_for_untitled_ad_without_extras() {
        let ad = Ad::default();
        let view = AdCardView::new(&ad, None, &MarketConfig::default());
        assert_eq!(view.title, "Untitled");
        assert_eq!(view.excerpt, "");
        assert_eq!(view.image, None);
        assert_eq!(view.location_label, None);
        assert_eq!(view.distance_label, None);
    }

    #[test]
    fn card_labels_extra_locations_and_truncates() {
        let ad = Ad {
            images: vec!["data:image/png;base64,AA".into(), "b.png".into()],
            ..Ad::new("Sofa")
                .with_description("x".repeat(200))
                .with_location(Location::named("Paris"))
                .with_location(Location::named("Lyon"))
                .with_location(Location::named("Nice"))
        };
        let view = AdCardView::new(&ad, Some(2.26), &MarketConfig::default());
        assert_eq!(view.excerpt.len(), 123);
        assert!(view.excerpt.ends_with("..."));
        assert_eq!(view.image, Some("data:image/png;base64,AA"));
        assert_eq!(view.location_label.as_deref(), Some("Paris +2"));
        assert_eq!(view.distance_label.as_deref(), Some("2.3km away"));
    }
}
