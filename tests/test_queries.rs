//! Query interfaces over a pre-seeded session cache.

mod common;

use std::rc::Rc;
use std::time::Duration;

use cardtrader_dashboard::queries::BestPriceParams;
use cardtrader_dashboard::report::ExpansionReport;
use cardtrader_dashboard::{CardTraderError, CardTraderSdk, Condition};

// ---------------------------------------------------------------------------
// Games and expansions
// ---------------------------------------------------------------------------

#[test]
fn default_game_is_pokemon() {
    let sdk = common::seeded_sdk();
    let game = sdk.games().default_game().unwrap();
    assert_eq!(game.id, 5);
}

#[test]
fn find_game_by_display_or_internal_name() {
    let sdk = common::seeded_sdk();
    assert_eq!(sdk.games().find("Magic: the Gathering").unwrap().unwrap().id, 1);
    assert_eq!(sdk.games().find("magic").unwrap().unwrap().id, 1);
    assert!(sdk.games().find("Yu-Gi-Oh!").unwrap().is_none());
    assert!(sdk.games().get_by_name("Pokémon").unwrap().is_some());
    assert!(sdk.games().get_by_display_name("Magic").unwrap().is_none());
}

#[test]
fn expansions_are_filtered_by_game() {
    let sdk = common::seeded_sdk();
    let names: Vec<String> = sdk
        .expansions()
        .for_game(5)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Jungle", "Base Set"]);
}

#[test]
fn default_expansion_is_base_set_or_first() {
    let sdk = common::seeded_sdk();
    assert_eq!(sdk.expansions().default_for_game(5).unwrap().id, 1472);
    assert_eq!(sdk.expansions().default_for_game(1).unwrap().id, 10);
    assert!(matches!(
        sdk.expansions().default_for_game(99),
        Err(CardTraderError::NotFound(_))
    ));
}

#[test]
fn expansion_lookup_by_name_or_code() {
    let sdk = common::seeded_sdk();
    assert_eq!(sdk.expansions().get_by_name(5, "Jungle").unwrap().unwrap().id, 1471);
    assert_eq!(sdk.expansions().get_by_name(5, "BS").unwrap().unwrap().id, 1472);
    assert!(sdk.expansions().get_by_name(1, "Base Set").unwrap().is_none());
    assert_eq!(sdk.expansions().get_by_id(10).unwrap().unwrap().name, "Alpha");
}

// ---------------------------------------------------------------------------
// Best prices and memoization
// ---------------------------------------------------------------------------

#[test]
fn best_prices_uses_cached_products() {
    let sdk = common::seeded_sdk();
    let params = BestPriceParams::new(1472, "en").min_condition(Condition::SlightlyPlayed);
    let result = sdk.cards().best_prices(&params).unwrap();
    assert_eq!(result.cards.len(), 3);

    let report = ExpansionReport::new(&result);
    assert_eq!(report.total_cost_cents(), 48000 + 9000 + 4500);
    assert_eq!(report.total_cost(), 615.0);
    assert_eq!(report.hub_percentage(), 100.0);
}

#[test]
fn equal_params_hit_the_same_cached_result() {
    let sdk = common::seeded_sdk();
    let params = BestPriceParams::new(1472, "en").hub_only(true);
    let first = sdk.cards().best_prices(&params).unwrap();
    let second = sdk.cards().best_prices(&params.clone()).unwrap();
    assert!(Rc::ptr_eq(&first, &second));

    let other = sdk.cards().best_prices(&params.clone().hub_only(false)).unwrap();
    assert!(!Rc::ptr_eq(&first, &other));
}

#[test]
fn best_prices_expire_with_their_products() {
    let sdk = common::seeded_sdk_with_ttl(Duration::from_millis(300));
    let params = BestPriceParams::new(1472, "en");

    std::thread::sleep(Duration::from_millis(250));
    assert!(sdk.cards().best_prices(&params).is_ok());

    std::thread::sleep(Duration::from_millis(250));
    assert!(sdk.cards().products(1472, "en").is_err());
    assert!(matches!(
        sdk.cards().best_prices(&params),
        Err(CardTraderError::Http(_))
    ));
}

#[test]
fn empty_group_is_not_reported_as_skipped() {
    let sdk = common::seeded_sdk();
    sdk.session()
        .cache
        .borrow_mut()
        .products
        .insert((1472, "fr".to_string()), Rc::new(common::empty_group_payload()));
    let result = sdk.cards().best_prices(&BestPriceParams::new(1472, "fr")).unwrap();
    assert!(result.is_empty());
    assert!(result.skipped.is_empty());
}

#[test]
fn fetch_failure_is_returned_not_swallowed() {
    let sdk = common::seeded_sdk();
    let params = BestPriceParams::new(1472, "it");
    match sdk.cards().best_prices(&params) {
        Err(CardTraderError::Http(_)) => {}
        other => panic!("expected HTTP error, got {:?}", other.map(|r| r.cards.len())),
    }
}

#[test]
fn empty_language_is_rejected() {
    let sdk = common::seeded_sdk();
    assert!(matches!(
        sdk.cards().products(1472, " "),
        Err(CardTraderError::InvalidArgument(_))
    ));
}

#[test]
fn clear_cache_forces_refetch() {
    let sdk = common::seeded_sdk();
    assert!(sdk.games().list().is_ok());
    sdk.clear_cache();
    assert!(matches!(sdk.games().list(), Err(CardTraderError::Http(_))));
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn build_without_token_fails() {
    assert!(matches!(
        CardTraderSdk::builder().build(),
        Err(CardTraderError::MissingToken(_))
    ));
    assert!(matches!(
        CardTraderSdk::builder().token("  ").build(),
        Err(CardTraderError::MissingToken(_))
    ));
}

#[test]
fn display_reports_cache_state() {
    let sdk = CardTraderSdk::builder()
        .token("t")
        .base_url(common::DEAD_BASE_URL)
        .cache_ttl(Duration::from_secs(120))
        .build()
        .unwrap();
    assert_eq!(
        sdk.to_string(),
        format!("CardTraderSdk(base_url={}, ttl=120s, cached_entries=0)", common::DEAD_BASE_URL)
    );
}

#[test]
fn zero_ttl_disables_memoization() {
    let sdk = CardTraderSdk::builder()
        .token("t")
        .base_url(common::DEAD_BASE_URL)
        .cache_ttl(Duration::ZERO)
        .build()
        .unwrap();
    sdk.session()
        .cache
        .borrow_mut()
        .games
        .insert((), Rc::new(common::games()));
    assert!(sdk.games().list().is_err());
}
