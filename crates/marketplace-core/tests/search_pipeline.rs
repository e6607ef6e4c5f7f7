use marketplace_core::prelude::*;

const PARIS: (f64, f64) = (48.8566, 2.3522);

fn seeded() -> AdRepository<MemoryStore, ManualClock> {
    let mut repo = AdRepository::with_clock(MemoryStore::new(), ManualClock::new(1_000));
    let ads = [
        Ad::new("Road bike")
            .with_description("Carbon frame")
            .with_location(Location::named("Paris").with_coordinates(48.8606, 2.3376)),
        Ad::new("City bike").with_location(Location::named("Versailles").with_coordinates(48.8049, 2.1204)),
        Ad::new("Bike helmet").with_location(Location::named("Lyon").with_coordinates(45.764, 4.8357)),
        Ad::new("Kids bike").with_location(Location::named("Paris")),
        Ad::new("Sofa").with_location(Location::named("Paris").with_coordinates(48.85, 2.35)),
    ];
    for (i, ad) in ads.into_iter().enumerate() {
        repo.save_ad(Ad {
            created_at: 1_000 + i as i64,
            ..ad
        })
        .unwrap();
    }
    repo
}

fn titles<'a>(hits: &'a [SearchHit<'_>]) -> Vec<&'a str> {
    hits.iter().map(|h| h.ad.title.as_str()).collect()
}

#[test]
fn text_and_radius_with_distance_sort() {
    let repo = seeded();
    let ads = repo.get_ads().unwrap();
    let query = SearchQuery::new()
        .text("bike")
        .location(LocationFilter::near(PARIS.0, PARIS.1, Some(25.0)))
        .sort(SortOrder::Distance);

    let hits = search(&ads, &query);
    assert_eq!(titles(&hits), ["Road bike", "City bike"]);
    assert!(hits[0].distance.unwrap() < hits[1].distance.unwrap());
}

#[test]
fn city_filter_without_point_sorted_newest() {
    let repo = seeded();
    let ads = repo.get_ads().unwrap();
    let query = SearchQuery::new()
        .text("bike")
        .location(LocationFilter::city("paris"));
    let hits = search(&ads, &query);
    assert_eq!(titles(&hits), ["Kids bike", "Road bike"]);
    assert!(hits.iter().all(|h| h.distance.is_none()));
}

#[test]
fn unlocated_ads_trail_in_distance_order() {
    let repo = seeded();
    let ads = repo.get_ads().unwrap();
    let query = SearchQuery::new()
        .location(LocationFilter::near(PARIS.0, PARIS.1, None))
        .sort(SortOrder::Distance);
    let hits = search(&ads, &query);
    assert_eq!(hits.len(), 5);
    assert_eq!(hits.last().unwrap().ad.title, "Kids bike");
    let distances: Vec<f64> = hits.iter().filter_map(|h| h.distance).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn search_results_render_as_cards() {
    let repo = seeded();
    let ads = repo.get_ads().unwrap();
    let config = MarketConfig::default();
    let hits = search(
        &ads,
        &SearchQuery::new()
            .text("road")
            .location(LocationFilter::near(PARIS.0, PARIS.1, None)),
    );
    let card = AdCardView::from_hit(&hits[0], &config);
    assert_eq!(card.title, "Road bike");
    assert_eq!(card.excerpt, "Carbon frame...");
    assert_eq!(card.location_label.as_deref(), Some("Paris"));
    assert!(card.distance_label.unwrap().ends_with("km away"));
}

#[test]
fn suggestions_follow_the_city_index() {
    let repo = seeded();
    let cities = repo.city_list().unwrap();
    assert_eq!(cities, ["Lyon", "Paris", "Versailles"]);
    assert_eq!(suggest_cities(&cities, "S", 5), ["Paris", "Versailles"]);
}
