//! marketplace-wasm: WebAssembly bindings for marketplace-core
//!
//! This crate exposes the marketplace core to JavaScript. Ads, the user
//! profile and the theme live in `window.localStorage` under the same keys
//! the core uses on every other backend.
//!
//! What it provides
//! ----------------
//! - Automatic initialization on module load (via `#[wasm_bindgen(start)]`),
//!   which also applies the stored theme to `<html data-theme>`
//! - Ad CRUD: `getAds()`, `getAd(id)`, `saveAd(ad)`, `updateAd(id, changes)`,
//!   `deleteAd(id)`, `confirmDeleteAd(id)`, `saveDraft(form)`
//! - Location helpers: `normalizeLocations`, `calculateDistance`,
//!   `isWithinRadius`, `matchesCity`, `getLocationDistance`
//! - Search: `searchAds(query)` and `searchCards(query)`
//! - City index: `getCityList()`, `suggestCities(input)`
//! - `currentPosition()`: a Promise over `navigator.geolocation`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { saveDraft, searchAds } from 'marketplace-wasm';
//!
//! async function main() {
//!   await init();
//!   saveDraft({ title: 'Road bike', locations: [{ city: 'Paris', radius: '' }] });
//!
//!   const hits = searchAds({ freeText: 'bike', sortOrder: 'newest' });
//!   console.log(hits.map(h => h.ad.title));
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - When `localStorage` is unavailable (Node.js, some private modes) the
//!   bindings fall back to an in-memory store for the lifetime of the page.
//! - Errors are thrown as JS `Error`s carrying the core's message.

use std::cell::RefCell;
use std::fmt::Display;

use js_sys::{Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Core Imports
use marketplace_core::api::{format_distance, AdCardView};
use marketplace_core::cities::suggest_cities;
use marketplace_core::config::MarketConfig;
use marketplace_core::draft::{AdDraft, LocationDraft};
use marketplace_core::geolocation::GeolocationError;
use marketplace_core::migrate::{migrate_ad, StoredAd};
use marketplace_core::storage::{KeyValueStore, MemoryStore};
use marketplace_core::{
    calculate_distance, get_location_distance, is_within_radius, matches_city,
    normalize_locations, search, AdRepository, AdUpdate, Coordinates, LocationFilter,
    LocationInput, MarketError, SearchQuery, Theme, UserProfile,
};

/* --------------------------------------------------------------------------
   localStorage backend
-------------------------------------------------------------------------- */

/// [`KeyValueStore`] over `window.localStorage`. Values are stored as text.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// The page's local storage, if the host exposes one.
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

fn storage_error(err: JsValue) -> MarketError {
    MarketError::Storage(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> marketplace_core::Result<Option<Vec<u8>>> {
        let item = self.storage.get_item(key).map_err(storage_error)?;
        Ok(item.map(String::into_bytes))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> marketplace_core::Result<()> {
        let text = std::str::from_utf8(value).map_err(|_| MarketError::Encoding {
            key: key.to_string(),
        })?;
        // Quota exceeded surfaces here.
        self.storage.set_item(key, text).map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> marketplace_core::Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}

/// Local storage when available, otherwise page-lifetime memory.
pub enum BrowserStore {
    Local(LocalStorageStore),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn detect() -> Self {
        match LocalStorageStore::from_window() {
            Some(local) => Self::Local(local),
            None => Self::Memory(MemoryStore::new()),
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> marketplace_core::Result<Option<Vec<u8>>> {
        match self {
            Self::Local(s) => s.get(key),
            Self::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> marketplace_core::Result<()> {
        match self {
            Self::Local(s) => s.set(key, value),
            Self::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> marketplace_core::Result<()> {
        match self {
            Self::Local(s) => s.remove(key),
            Self::Memory(s) => s.remove(key),
        }
    }
}

/* --------------------------------------------------------------------------
   Module state
-------------------------------------------------------------------------- */

thread_local! {
    static REPO: RefCell<AdRepository<BrowserStore>> =
        RefCell::new(AdRepository::new(BrowserStore::detect()));
    static CONFIG: MarketConfig = MarketConfig::default();
}

fn with_repo<R>(
    f: impl FnOnce(&mut AdRepository<BrowserStore>) -> marketplace_core::Result<R>,
) -> Result<R, JsValue> {
    REPO.with(|repo| f(&mut repo.borrow_mut())).map_err(js_error)
}

fn js_error(err: impl Display) -> JsValue {
    JsError::new(&err.to_string()).into()
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

/// Lenient `{city, radius, coordinates}` parse for the helper exports;
/// anything unusable is `None`.
fn place_from_js(value: JsValue) -> Option<LocationFilter> {
    serde_wasm_bindgen::from_value(value).ok()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing marketplace WASM module...".into());

    match init_theme() {
        Ok(theme) => web_sys::console::log_1(&format!("✓ Theme: {theme}").into()),
        Err(err) => web_sys::console::error_1(&err),
    }
    if let Ok(ads) = with_repo(|repo| repo.get_ads()) {
        web_sys::console::log_1(&format!("✓ Loaded {} ads", ads.len()).into());
    }
}

/* --------------------------------------------------------------------------
   Ads
-------------------------------------------------------------------------- */

#[wasm_bindgen(js_name = getAds)]
pub fn get_ads() -> Result<JsValue, JsValue> {
    to_js(&with_repo(|repo| repo.get_ads())?)
}

/// The ad with `id`, or `null`.
#[wasm_bindgen(js_name = getAd)]
pub fn get_ad(id: &str) -> Result<JsValue, JsValue> {
    match with_repo(|repo| repo.get_ad(id))? {
        Some(ad) => to_js(&ad),
        None => Ok(JsValue::NULL),
    }
}

/// Saves a new ad. Any location shape is accepted and normalized.
#[wasm_bindgen(js_name = saveAd)]
pub fn save_ad(ad: JsValue) -> Result<JsValue, JsValue> {
    let stored: StoredAd = from_js(ad)?;
    let ad = migrate_ad(stored);
    to_js(&with_repo(|repo| repo.save_ad(ad))?)
}

/// Merges `changes` into the ad with `id`. Returns the merged ad, or
/// `null` when no such ad exists.
#[wasm_bindgen(js_name = updateAd)]
pub fn update_ad(id: &str, changes: JsValue) -> Result<JsValue, JsValue> {
    let changes: AdUpdate = from_js(changes)?;
    match with_repo(|repo| repo.update_ad(id, changes))? {
        Some(ad) => to_js(&ad),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen(js_name = deleteAd)]
pub fn delete_ad(id: &str) -> Result<bool, JsValue> {
    with_repo(|repo| repo.delete_ad(id))
}

/// Asks the user first; `false` when they cancel or nothing was deleted.
#[wasm_bindgen(js_name = confirmDeleteAd)]
pub fn confirm_delete_ad(id: &str) -> Result<bool, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    if !window.confirm_with_message("Delete this ad?")? {
        return Ok(false);
    }
    delete_ad(id)
}

/// Submit path of the ad form: creates or edits depending on `draft.id`.
#[wasm_bindgen(js_name = saveDraft)]
pub fn save_draft(draft: JsValue) -> Result<JsValue, JsValue> {
    let draft: AdDraft = from_js(draft)?;
    to_js(&with_repo(|repo| repo.upsert(draft.into_ad()))?)
}

/// Form state for editing the ad with `id`, or an empty form.
#[wasm_bindgen(js_name = draftFor)]
pub fn draft_for(id: Option<String>) -> Result<JsValue, JsValue> {
    let ad = match id {
        Some(id) => with_repo(|repo| repo.get_ad(&id))?,
        None => None,
    };
    let draft = ad.as_ref().map(AdDraft::from_ad).unwrap_or_else(|| AdDraft {
        locations: vec![LocationDraft::default()],
        ..AdDraft::default()
    });
    to_js(&draft)
}

/* --------------------------------------------------------------------------
   User & Theme
-------------------------------------------------------------------------- */

#[wasm_bindgen(js_name = getUser)]
pub fn get_user() -> Result<JsValue, JsValue> {
    to_js(&with_repo(|repo| repo.get_user())?)
}

#[wasm_bindgen(js_name = saveUser)]
pub fn save_user(user: JsValue) -> Result<JsValue, JsValue> {
    let user: UserProfile = from_js(user)?;
    to_js(&with_repo(|repo| repo.save_user(user))?)
}

#[wasm_bindgen(js_name = getTheme)]
pub fn get_theme() -> Result<String, JsValue> {
    Ok(with_repo(|repo| repo.get_theme())?.to_string())
}

#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(theme: &str) -> Result<String, JsValue> {
    let theme = with_repo(|repo| repo.set_theme(Theme::parse(theme)))?;
    apply_theme(theme)?;
    Ok(theme.to_string())
}

#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Result<String, JsValue> {
    let theme = with_repo(|repo| repo.toggle_theme())?;
    apply_theme(theme)?;
    Ok(theme.to_string())
}

/// Applies the stored theme to the document root.
#[wasm_bindgen(js_name = initTheme)]
pub fn init_theme() -> Result<String, JsValue> {
    let theme = with_repo(|repo| repo.get_theme())?;
    apply_theme(theme)?;
    Ok(theme.to_string())
}

fn apply_theme(theme: Theme) -> Result<(), JsValue> {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    // Headless hosts have no document; the stored value still counts.
    match root {
        Some(root) => root.set_attribute("data-theme", theme.as_str()),
        None => Ok(()),
    }
}

/* --------------------------------------------------------------------------
   Location helpers
-------------------------------------------------------------------------- */

/// Any stored or legacy location shape to canonical `{city, radius?, coordinates?}` objects.
#[wasm_bindgen(js_name = normalizeLocations)]
pub fn normalize_locations_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: Option<LocationInput> = from_js(input).unwrap_or(None);
    to_js(&normalize_locations(input.as_ref()))
}

#[wasm_bindgen(js_name = calculateDistance)]
pub fn calculate_distance_js(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    calculate_distance(lat1, lng1, lat2, lng2)
}

#[wasm_bindgen(js_name = isWithinRadius)]
pub fn is_within_radius_js(location: JsValue, target: JsValue, radius: Option<f64>) -> bool {
    match (place_from_js(location), place_from_js(target)) {
        (Some(a), Some(b)) => is_within_radius(&a, &b, radius),
        _ => false,
    }
}

#[wasm_bindgen(js_name = matchesCity)]
pub fn matches_city_js(locations: JsValue, city: &str) -> bool {
    let input: Option<LocationInput> = from_js(locations).unwrap_or(None);
    matches_city(&normalize_locations(input.as_ref()), city)
}

/// Kilometers between two located places, or `null`.
#[wasm_bindgen(js_name = getLocationDistance)]
pub fn get_location_distance_js(location: JsValue, target: JsValue) -> Option<f64> {
    let a = place_from_js(location)?;
    let b = place_from_js(target)?;
    get_location_distance(&a, &b)
}

#[wasm_bindgen(js_name = formatDistance)]
pub fn format_distance_js(km: f64) -> String {
    format_distance(km)
}

/* --------------------------------------------------------------------------
   Search & City Index
-------------------------------------------------------------------------- */

/// `[{ ad, distance }]` in result order.
#[wasm_bindgen(js_name = searchAds)]
pub fn search_ads(query: JsValue) -> Result<JsValue, JsValue> {
    let query: SearchQuery = from_js(query)?;
    let ads = with_repo(|repo| repo.get_ads())?;
    to_js(&search(&ads, &query))
}

/// Same as `searchAds`, rendered as card views.
#[wasm_bindgen(js_name = searchCards)]
pub fn search_cards(query: JsValue) -> Result<JsValue, JsValue> {
    let query: SearchQuery = from_js(query)?;
    let ads = with_repo(|repo| repo.get_ads())?;
    let hits = search(&ads, &query);
    CONFIG.with(|config| {
        let cards: Vec<AdCardView<'_>> = hits
            .iter()
            .map(|hit| AdCardView::from_hit(hit, config))
            .collect();
        to_js(&cards)
    })
}

#[wasm_bindgen(js_name = getCityList)]
pub fn get_city_list() -> Result<JsValue, JsValue> {
    to_js(&with_repo(|repo| repo.city_list())?)
}

#[wasm_bindgen(js_name = suggestCities)]
pub fn suggest_cities_js(input: &str, limit: Option<usize>) -> Result<JsValue, JsValue> {
    let cities = with_repo(|repo| repo.city_list())?;
    let limit = limit.unwrap_or_else(|| CONFIG.with(|c| c.suggestion_limit));
    to_js(&suggest_cities(&cities, input, limit))
}

/* --------------------------------------------------------------------------
   Geolocation
-------------------------------------------------------------------------- */

/// Resolves with `{lat, lng}`; rejects with an `Error` whose message is
/// ready to show the user.
#[wasm_bindgen(js_name = currentPosition)]
pub fn current_position() -> Promise {
    Promise::new(&mut |resolve, reject| {
        if let Err(err) = request_position(resolve, reject.clone()) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    })
}

fn request_position(resolve: Function, reject: Function) -> Result<(), JsValue> {
    let navigator = Reflect::get(&js_sys::global(), &"navigator".into())?;
    let geolocation = if navigator.is_object() {
        Reflect::get(&navigator, &"geolocation".into())?
    } else {
        JsValue::UNDEFINED
    };
    if !geolocation.is_object() {
        return Err(js_error(GeolocationError::Unsupported));
    }
    let get_current_position: Function =
        Reflect::get(&geolocation, &"getCurrentPosition".into())?.dyn_into()?;

    let on_error = reject.clone();
    let on_success = Closure::once_into_js(move |position: JsValue| {
        let outcome = coordinates_from_position(&position).and_then(|coords| to_js(&coords));
        let _ = match outcome {
            Ok(value) => resolve.call1(&JsValue::NULL, &value),
            Err(err) => reject.call1(&JsValue::NULL, &err),
        };
    });
    let on_failure = Closure::once_into_js(move |error: JsValue| {
        let code = Reflect::get(&error, &"code".into())
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(2.0) as u16;
        let message = Reflect::get(&error, &"message".into())
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let err = GeolocationError::from_code(code, message);
        let _ = on_error.call1(&JsValue::NULL, &js_error(err.user_message()));
    });

    get_current_position.call2(&geolocation, &on_success, &on_failure)?;
    Ok(())
}

fn coordinates_from_position(position: &JsValue) -> Result<Coordinates, JsValue> {
    let coords = Reflect::get(position, &"coords".into())?;
    let read = |field: &str| -> Result<f64, JsValue> {
        Reflect::get(&coords, &field.into())?
            .as_f64()
            .ok_or_else(|| js_error(GeolocationError::from_code(2, "")))
    };
    Ok(Coordinates::new(read("latitude")?, read("longitude")?))
}
