//! Error handling example for marketplace-rs
//!
//! This example demonstrates proper error handling and edge cases:
//! legacy data, corrupt storage, missing ids and geolocation failures.

use marketplace_rs::prelude::*;

fn main() -> Result<()> {
    marketplace_rs::init_tracing();
    println!("=== Marketplace-RS Error Handling Example ===\n");

    // Example 1: Legacy records are migrated on read
    println!("--- Example 1: Reading legacy data ---");
    let legacy = r#"[{"id": 1, "title": "Old ad", "locations": ["Paris", "Lyon"], "createdAt": 1}]"#;
    let repo = AdRepository::new(MemoryStore::new().with_entry("marketplace_ads", legacy));
    for ad in repo.get_ads()? {
        println!("  {} -> {:?}", ad.title, ad.locations);
    }
    println!();

    // Example 2: Corrupt storage
    println!("--- Example 2: Corrupt collection ---");
    let broken = AdRepository::new(MemoryStore::new().with_entry("marketplace_ads", "[{oops"));
    match broken.get_ads() {
        Ok(ads) => println!("  Unexpectedly loaded {} ads", ads.len()),
        Err(e) => eprintln!("  ✗ {e}"),
    }
    println!();

    // Example 3: Missing ids are not errors
    println!("--- Example 3: Missing ids ---");
    let mut repo = AdRepository::new(MemoryStore::new());
    let update = AdUpdate {
        title: Some("ghost".into()),
        ..AdUpdate::default()
    };
    println!("  get_ad:    {:?}", repo.get_ad("missing")?);
    println!("  update_ad: {:?}", repo.update_ad("missing", update)?);
    println!("  delete_ad: {}", repo.delete_ad("missing")?);
    println!();

    // Example 4: Lenient radius input
    println!("--- Example 4: Radius input ---");
    for raw in ["10", " 2.5 ", "", "abc", "-3", "0"] {
        let filter: LocationFilter =
            serde_json::from_str(&format!(r#"{{"city": "Paris", "radius": "{raw}"}}"#))?;
        println!("  {raw:?} -> {:?}", filter.radius);
    }
    println!();

    // Example 5: Geolocation failures
    println!("--- Example 5: Geolocation failures ---");
    for (code, message) in [(1, "User denied Geolocation"), (2, ""), (3, "Timeout expired")] {
        println!("  code {code}: {}", GeolocationError::from_code(code, message));
    }
    let wrapped: MarketError = GeolocationError::Unsupported.into();
    println!("  {wrapped}");

    Ok(())
}
