//! Basic usage example for marketplace-rs
//!
//! This example demonstrates how to:
//! - Open a repository over an in-memory store
//! - Post, edit and delete ads
//! - Build the city list used for autocomplete
//! - Store the user profile and theme

use marketplace_rs::prelude::*;

fn main() -> Result<()> {
    marketplace_rs::init_tracing();
    println!("=== Marketplace-RS Basic Usage Example ===\n");

    let mut repo = AdRepository::new(MemoryStore::new());
    println!("✓ Repository opened (in-memory)\n");

    // Example 1: Post a few ads
    println!("--- Example 1: Post ads ---");
    let bike = repo.save_ad(
        Ad::new("Road bike")
            .with_description("Aluminium frame, 54cm, recently serviced")
            .with_location(Location::named("Paris").with_coordinates(48.8566, 2.3522))
            .with_seller(Seller::from_fields("+33 6 12 34 56 78", "", "")),
    )?;
    let sofa = repo.save_ad(
        Ad::new("Corner sofa")
            .with_location(Location::named("Lyon").with_radius(15.0))
            .with_location(Location::named("Grenoble")),
    )?;
    for ad in repo.get_ads()? {
        println!("{} | {} | {}", ad.id, ad.title, ad.cities().collect::<Vec<_>>().join(", "));
    }
    println!();

    // Example 2: Edit an ad
    println!("--- Example 2: Update an ad ---");
    let changes = AdUpdate {
        description: Some("Three seats, grey fabric".into()),
        chat_enabled: Some(true),
        ..AdUpdate::default()
    };
    if let Some(updated) = repo.update_ad(&sofa.id, changes)? {
        println!("Updated: {} (chat: {})", updated.description, updated.chat_enabled);
    }
    println!();

    // Example 3: City list
    println!("--- Example 3: City list ---");
    let cities = repo.city_list()?;
    println!("Cities: {cities:?}");
    println!("Suggestions for 'gr': {:?}", suggest_cities(&cities, "gr", 5));
    println!();

    // Example 4: Delete
    println!("--- Example 4: Delete an ad ---");
    println!("Deleted {}: {}", bike.id, repo.delete_ad(&bike.id)?);
    println!("Deleted again: {}", repo.delete_ad(&bike.id)?);
    println!("Ads left: {}", repo.get_ads()?.len());
    println!();

    // Example 5: Profile & theme
    println!("--- Example 5: Profile and theme ---");
    repo.save_user(UserProfile {
        profile_picture: "data:image/png;base64,iVBORw0KGgo=".into(),
    })?;
    println!("Theme: {}", repo.get_theme()?);
    println!("Theme after toggle: {}", repo.toggle_theme()?);

    Ok(())
}
