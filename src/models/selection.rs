use std::collections::BTreeMap;

use serde::Serialize;

use crate::condition::Condition;
use crate::error::GroupSkip;

// ---------------------------------------------------------------------------
// CardSelection: The representative listing chosen for one card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSelection {
    pub name: String,
    /// Selected price in major currency units.
    pub price: f64,
    /// Selected price in minor units, exact.
    pub price_cents: i64,
    pub source_id: String,
    /// True if any acceptable listing in the candidate pool ships via the hub.
    pub can_sell_via_hub: bool,
    pub condition: Condition,
    /// Sample standard deviation of the candidate pool, in major units.
    pub price_std: f64,
}

// ---------------------------------------------------------------------------
// SkippedGroup: A product group dropped as malformed or empty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedGroup {
    pub group: String,
    pub reason: GroupSkip,
}

// ---------------------------------------------------------------------------
// ExpansionResult: Everything the selector produces for one expansion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpansionResult {
    pub cards: Vec<CardSelection>,
    pub hub_cards_count: usize,
    pub condition_counts: BTreeMap<Condition, usize>,
    pub skipped: Vec<SkippedGroup>,
}

impl ExpansionResult {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}
