//! Advanced filtering example for marketplace-rs
//!
//! Shows free-text search, city and radius filters, distance sorting and
//! the card views a result grid renders.

use marketplace_rs::prelude::*;

const PLACES: [(&str, f64, f64); 5] = [
    ("Paris", 48.8566, 2.3522),
    ("Versailles", 48.8049, 2.1204),
    ("Orléans", 47.9030, 1.9093),
    ("Lyon", 45.7640, 4.8357),
    ("Marseille", 43.2965, 5.3698),
];

fn main() -> Result<()> {
    marketplace_rs::init_tracing();
    println!("=== Marketplace-RS Advanced Filtering Example ===\n");

    let clock = ManualClock::new(1_700_000_000_000);
    let mut repo = AdRepository::with_clock(MemoryStore::new(), &clock);
    for (i, (city, lat, lng)) in PLACES.iter().enumerate() {
        let title = if i % 2 == 0 { "Mountain bike" } else { "Desk lamp" };
        repo.save_ad(
            Ad::new(format!("{title} #{i}"))
                .with_description(format!("Pick up in {city}"))
                .with_location(Location::named(*city).with_coordinates(*lat, *lng)),
        )?;
        clock.advance(60_000);
    }
    repo.save_ad(Ad::new("Mountain bike, no coordinates").with_location(Location::named("Paris")))?;
    let ads = repo.get_ads()?;
    let config = MarketConfig::default();

    // Example 1: Free text
    println!("--- Example 1: Free text 'bike', newest first ---");
    for hit in search(&ads, &SearchQuery::new().text("bike")) {
        println!("  {}", hit.ad.title);
    }
    println!();

    // Example 2: City substring
    println!("--- Example 2: City filter 'par' ---");
    for hit in search(&ads, &SearchQuery::new().location(LocationFilter::city("par"))) {
        println!("  {} ({})", hit.ad.title, hit.ad.cities().collect::<Vec<_>>().join(", "));
    }
    println!();

    // Example 3: Radius around Paris
    println!("--- Example 3: Within 150 km of Paris, nearest first ---");
    let near_paris = SearchQuery::new()
        .location(LocationFilter::near(48.8566, 2.3522, Some(150.0)))
        .sort(SortOrder::Distance);
    for hit in search(&ads, &near_paris) {
        let card = AdCardView::from_hit(&hit, &config);
        println!(
            "  {:<28} {:<12} {}",
            card.title,
            card.location_label.unwrap_or_default(),
            card.distance_label.unwrap_or_default()
        );
    }
    println!();

    // Example 4: Distance order without a radius keeps unlocated ads last
    println!("--- Example 4: All ads by distance from Lyon ---");
    let from_lyon = SearchQuery::new()
        .location(LocationFilter::near(45.7640, 4.8357, None))
        .sort(SortOrder::Distance);
    for hit in search(&ads, &from_lyon) {
        match hit.distance {
            Some(km) => println!("  {:<32} {}", hit.ad.title, format_distance(km)),
            None => println!("  {:<32} (no coordinates)", hit.ad.title),
        }
    }
    println!();

    // Example 5: Raw distance helpers
    println!("--- Example 5: Distance helpers ---");
    let paris = Location::named("Paris").with_coordinates(48.8566, 2.3522);
    let lyon = Location::named("Lyon").with_coordinates(45.7640, 4.8357);
    println!("  Paris -> Lyon: {:.1} km", get_location_distance(&paris, &lyon).unwrap_or_default());
    println!("  Lyon within 400 km of Paris: {}", is_within_radius(&lyon, &paris, Some(400.0)));
    println!("  Lyon within 300 km of Paris: {}", is_within_radius(&lyon, &paris, Some(300.0)));

    Ok(())
}
