//! Shared test fixtures for the CardTrader dashboard integration tests.
//!
//! Provides marketplace payloads shaped like `GET /marketplace/products`
//! and an SDK whose session cache is pre-seeded, so queries never touch the
//! network.

#![allow(dead_code)]

use std::rc::Rc;
use std::time::Duration;

use cardtrader_dashboard::models::{Expansion, Game, ProductPayload};
use cardtrader_dashboard::CardTraderSdk;
use serde_json::{json, Value};

/// An address nothing listens on; any real fetch fails fast.
pub const DEAD_BASE_URL: &str = "http://127.0.0.1:9/api/v2";

/// One marketplace listing in the API's nested shape.
pub fn listing(id: u64, name: &str, condition: &str, language: &str, cents: i64, hub: bool) -> Value {
    json!({
        "id": id,
        "blueprint_id": 1000 + id,
        "name_en": name,
        "quantity": 1,
        "price": {"cents": cents, "currency": "EUR", "formatted": format!("€{:.2}", cents as f64 / 100.0)},
        "description": null,
        "properties_hash": {
            "condition": condition,
            "pokemon_language": language,
            "first_edition": false
        },
        "expansion": {"id": 1472, "code": "bs", "name_en": "Base Set"},
        "user": {
            "id": 500 + id,
            "username": format!("seller{}", id),
            "can_sell_via_hub": hub,
            "country_code": "IT"
        },
        "graded": false,
        "tag_list": ["1st"]
    })
}

/// A small Base Set payload:
///
/// - Charizard: NM hub 500.00, NM direct 480.00, Played hub 300.00
/// - Blastoise: SP direct 90.00, NM hub 120.00
/// - Pikachu: Italian only
/// - Mewtwo: hub-only seller, NM 45.00
/// - a malformed group without any language field
pub fn base_set_payload() -> ProductPayload {
    let payload = json!({
        "2001": [
            listing(1, "Charizard", "Near Mint", "en", 50000, true),
            listing(2, "Charizard", "Near Mint", "en", 48000, false),
            listing(3, "Charizard", "Played", "en", 30000, true),
        ],
        "2002": [
            listing(4, "Blastoise", "Slightly Played", "en", 9000, false),
            listing(5, "Blastoise", "Near Mint", "en", 12000, true),
        ],
        "2003": [
            listing(6, "Pikachu", "Near Mint", "it", 800, false),
        ],
        "2004": [
            listing(7, "Mewtwo", "Near Mint", "en", 4500, true),
        ],
        "2005": [
            {"id": 8, "name_en": "Missingno", "condition": "Near Mint", "price": {"cents": 1}}
        ],
    });
    payload.as_object().cloned().unwrap()
}

/// A payload whose only group has no listings.
pub fn empty_group_payload() -> ProductPayload {
    json!({"3001": []}).as_object().cloned().unwrap()
}

pub fn games() -> Vec<Game> {
    vec![
        Game { id: 1, name: "Magic".into(), display_name: "Magic: the Gathering".into() },
        Game { id: 5, name: "Pokémon".into(), display_name: "Pokémon".into() },
    ]
}

pub fn expansions() -> Vec<Expansion> {
    vec![
        Expansion { id: 10, game_id: 1, name: "Alpha".into(), code: Some("lea".into()) },
        Expansion { id: 1471, game_id: 5, name: "Jungle".into(), code: Some("ju".into()) },
        Expansion { id: 1472, game_id: 5, name: "Base Set".into(), code: Some("bs".into()) },
    ]
}

/// An SDK pointed at a dead address with games, expansions and the Base Set
/// products (`expansion_id` 1472, language `en`) already cached.
pub fn seeded_sdk() -> CardTraderSdk {
    seeded_sdk_with_ttl(cardtrader_dashboard::config::DEFAULT_CACHE_TTL)
}

/// [`seeded_sdk`] with a custom cache TTL; the seeded entries are stamped now.
pub fn seeded_sdk_with_ttl(ttl: Duration) -> CardTraderSdk {
    let sdk = CardTraderSdk::builder()
        .token("test-token")
        .base_url(DEAD_BASE_URL)
        .cache_ttl(ttl)
        .build()
        .unwrap();
    {
        let mut cache = sdk.session().cache.borrow_mut();
        cache.games.insert((), Rc::new(games()));
        cache.expansions.insert((), Rc::new(expansions()));
        cache
            .products
            .insert((1472, "en".to_string()), Rc::new(base_set_payload()));
    }
    sdk
}
