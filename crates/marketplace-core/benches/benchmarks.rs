// crates/marketplace-core/benches/benchmarks.rs

use criterion::{criterion_group, criterion_main, Criterion};
use marketplace_core::migrate::migrate_collection;
use marketplace_core::prelude::*;
use std::hint::black_box;

const CITIES: [(&str, f64, f64); 6] = [
    ("Paris", 48.8566, 2.3522),
    ("Lyon", 45.764, 4.8357),
    ("Berlin", 52.52, 13.405),
    ("Madrid", 40.4168, -3.7038),
    ("Oslo", 59.9139, 10.7522),
    ("Nice", 43.7102, 7.262),
];

fn sample_ads(n: usize) -> Vec<Ad> {
    (0..n)
        .map(|i| {
            let (city, lat, lng) = CITIES[i % CITIES.len()];
            let jitter = (i % 97) as f64 * 0.001;
            Ad {
                id: i.to_string(),
                created_at: i as i64,
                ..Ad::new(format!("Item {i} {}", if i % 3 == 0 { "bike" } else { "chair" }))
                    .with_description("Used, good condition")
                    .with_location(Location::named(city).with_coordinates(lat + jitter, lng - jitter))
            }
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let ads = sample_ads(5_000);
    let near_paris = SearchQuery::new()
        .text("bike")
        .location(LocationFilter::near(48.8566, 2.3522, Some(50.0)))
        .sort(SortOrder::Distance);
    let by_city = SearchQuery::new().location(LocationFilter::city("ly"));

    c.bench_function("search_text_radius_distance_5k", |b| {
        b.iter(|| search(black_box(&ads), black_box(&near_paris)).len())
    });
    c.bench_function("search_city_newest_5k", |b| {
        b.iter(|| search(black_box(&ads), black_box(&by_city)).len())
    });
    c.bench_function("city_list_5k", |b| b.iter(|| city_list(black_box(&ads))));
}

fn bench_migration(c: &mut Criterion) {
    let legacy: Vec<serde_json::Value> = (0..1_000)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "title": format!("Ad {i}"),
                "locations": [CITIES[i % CITIES.len()].0, "Lyon"],
                "createdAt": i,
            })
        })
        .collect();
    let json = serde_json::to_string(&legacy).unwrap_or_default();

    c.bench_function("migrate_legacy_1k", |b| {
        b.iter(|| migrate_collection(black_box(&json)).map(|ads| ads.len()))
    });
}

criterion_group!(benches, bench_search, bench_migration);
criterion_main!(benches);
