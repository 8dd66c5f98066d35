//! Price selector: picks one representative listing per card.
//!
//! Input is the grouped `marketplace/products` payload of one expansion. Each
//! group is flattened, filtered by language and minimum condition, and reduced
//! to at most one [`CardSelection`]. Groups that cannot be evaluated are
//! recorded as [`SkippedGroup`]s and never abort the batch.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::condition::Condition;
use crate::config;
use crate::error::GroupSkip;
use crate::flatten::flatten_listing;
use crate::models::{
    CardSelection, ExpansionResult, FlatListing, FlatValue, ProductPayload, SkippedGroup,
};
use crate::stats;

// ---------------------------------------------------------------------------
// ListingFields
// ---------------------------------------------------------------------------

/// Flat keys the selector reads from each listing.
///
/// The defaults match the flattened shape of a Pokémon marketplace product.
/// The language key is game-specific (`pokemon_language`, `mtg_language`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingFields {
    pub language: String,
    pub condition: String,
    pub price: String,
    pub hub: String,
    pub name: String,
    pub id: String,
}

impl Default for ListingFields {
    fn default() -> Self {
        Self {
            language: config::DEFAULT_LANGUAGE_FIELD.to_string(),
            condition: "condition".to_string(),
            price: "cents".to_string(),
            hub: "can_sell_via_hub".to_string(),
            name: "name_en".to_string(),
            id: "id".to_string(),
        }
    }
}

impl ListingFields {
    /// Default fields with a different language key.
    pub fn with_language_field(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// SelectionParams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionParams {
    pub language: String,
    pub min_condition: Condition,
    pub hub_only: bool,
}

// ---------------------------------------------------------------------------
// GroupOutcome
// ---------------------------------------------------------------------------

/// What one successfully evaluated group contributes to the expansion result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupOutcome {
    /// Distinct acceptable conditions seen among the filtered listings.
    pub conditions_seen: BTreeSet<Condition>,
    pub has_hub_seller: bool,
    pub selection: Option<CardSelection>,
}

/// A filtered listing with the fields the selector needs, already typed.
#[derive(Debug)]
struct Candidate<'a> {
    row: &'a FlatListing,
    condition: Condition,
    cents: i64,
    hub: bool,
    name: &'a str,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Run the selector over every group of one expansion's payload.
///
/// Groups are visited in payload order, so `cards` follows the API's order.
pub fn select_expansion(
    payload: &ProductPayload,
    params: &SelectionParams,
    fields: &ListingFields,
) -> ExpansionResult {
    let mut result = ExpansionResult::default();

    for (group, listings) in payload {
        match select_group(listings, params, fields) {
            Ok(outcome) => {
                for condition in outcome.conditions_seen {
                    *result.condition_counts.entry(condition).or_insert(0) += 1;
                }
                if outcome.has_hub_seller {
                    result.hub_cards_count += 1;
                }
                if let Some(card) = outcome.selection {
                    result.cards.push(card);
                }
            }
            Err(reason) => {
                tracing::debug!(group = %group, %reason, "skipping product group");
                result.skipped.push(SkippedGroup {
                    group: group.clone(),
                    reason,
                });
            }
        }
    }

    tracing::debug!(
        cards = result.cards.len(),
        hub_cards = result.hub_cards_count,
        skipped = result.skipped.len(),
        "selected expansion prices"
    );
    result
}

/// Evaluate one product group.
///
/// An empty filter result is a successful, empty outcome. Missing or mistyped
/// fields yield a [`GroupSkip`] and the group contributes nothing at all.
pub fn select_group(
    listings: &Value,
    params: &SelectionParams,
    fields: &ListingFields,
) -> Result<GroupOutcome, GroupSkip> {
    let rows = flatten_group(listings)?;
    if rows.is_empty() {
        return Ok(GroupOutcome::default());
    }

    for field in [&fields.language, &fields.condition] {
        if !rows.iter().any(|r| r.contains_key(field)) {
            return Err(GroupSkip::MissingField {
                field: field.clone(),
            });
        }
    }

    let mut candidates = Vec::new();
    for row in &rows {
        let language_matches = row
            .get(&fields.language)
            .and_then(FlatValue::as_str)
            .is_some_and(|l| l == params.language);
        let condition = row
            .get(&fields.condition)
            .and_then(FlatValue::as_str)
            .and_then(Condition::from_label)
            .filter(|c| c.is_acceptable(params.min_condition));

        if let (true, Some(condition)) = (language_matches, condition) {
            candidates.push(Candidate {
                row,
                condition,
                cents: require(row, &fields.price, FlatValue::as_i64)?,
                hub: require(row, &fields.hub, FlatValue::as_bool)?,
                name: require(row, &fields.name, FlatValue::as_str)?,
            });
        }
    }

    if candidates.is_empty() {
        return Ok(GroupOutcome::default());
    }

    let conditions_seen: BTreeSet<Condition> = candidates.iter().map(|c| c.condition).collect();

    // Stable: equal (rank, cents) keep their encounter order.
    candidates.sort_by_key(|c| (c.condition.rank(), c.cents));
    let canonical = &candidates[0];

    let pool: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.name == canonical.name)
        .collect();
    let has_hub_seller = pool.iter().any(|c| c.hub);

    if params.hub_only && !has_hub_seller {
        return Ok(GroupOutcome {
            conditions_seen,
            has_hub_seller,
            selection: None,
        });
    }

    let min_cents = |hub: bool| pool.iter().filter(|c| c.hub == hub).map(|c| c.cents).min();
    let price_cents = if params.hub_only {
        min_cents(true)
    } else {
        min_cents(false).or_else(|| min_cents(true))
    };

    let selection = match price_cents {
        Some(cents) => {
            let source_id = canonical
                .row
                .get(&fields.id)
                .filter(|v| !v.is_null())
                .map(FlatValue::to_display_string)
                .ok_or_else(|| GroupSkip::MissingField {
                    field: fields.id.clone(),
                })?;
            let pool_prices: Vec<f64> = pool.iter().map(|c| cents_to_major(c.cents)).collect();

            Some(CardSelection {
                name: canonical.name.to_string(),
                price: cents_to_major(cents),
                price_cents: cents,
                source_id,
                can_sell_via_hub: has_hub_seller,
                condition: canonical.condition,
                price_std: stats::sample_std_dev(&pool_prices),
            })
        }
        None => None,
    };

    Ok(GroupOutcome {
        conditions_seen,
        has_hub_seller,
        selection,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn flatten_group(listings: &Value) -> Result<Vec<FlatListing>, GroupSkip> {
    let items = listings.as_array().ok_or(GroupSkip::NotAList)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_object()
                .map(flatten_listing)
                .ok_or(GroupSkip::NotAnObject { index })
        })
        .collect()
}

/// Read a required field, distinguishing absence from a bad type.
fn require<'a, T>(
    row: &'a FlatListing,
    field: &str,
    convert: impl Fn(&'a FlatValue) -> Option<T>,
) -> Result<T, GroupSkip> {
    let value = row
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| GroupSkip::MissingField {
            field: field.to_string(),
        })?;
    convert(value).ok_or_else(|| GroupSkip::InvalidField {
        field: field.to_string(),
    })
}

pub fn cents_to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}
