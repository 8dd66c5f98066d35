//! Card price queries: raw marketplace listings and best-price selection.

use std::rc::Rc;

use crate::cache::BestPriceKey;
use crate::condition::Condition;
use crate::error::{CardTraderError, Result};
use crate::models::{ExpansionResult, ProductPayload};
use crate::selector::{self, SelectionParams};
use crate::session::Session;

// ---------------------------------------------------------------------------
// BestPriceParams
// ---------------------------------------------------------------------------

/// Parameters for [`CardQuery::best_prices`].
///
/// Equal parameter sets share one cached result within the TTL window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BestPriceParams {
    pub expansion_id: u64,
    pub language: String,
    pub min_condition: Condition,
    pub hub_only: bool,
}

impl BestPriceParams {
    /// Near Mint only, any seller.
    pub fn new(expansion_id: u64, language: impl Into<String>) -> Self {
        Self {
            expansion_id,
            language: language.into(),
            min_condition: Condition::NearMint,
            hub_only: false,
        }
    }

    pub fn min_condition(mut self, min_condition: Condition) -> Self {
        self.min_condition = min_condition;
        self
    }

    pub fn hub_only(mut self, hub_only: bool) -> Self {
        self.hub_only = hub_only;
        self
    }

    pub fn selection(&self) -> SelectionParams {
        SelectionParams {
            language: self.language.clone(),
            min_condition: self.min_condition,
            hub_only: self.hub_only,
        }
    }
}

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for marketplace listings of one expansion at a time.
pub struct CardQuery<'a> {
    session: &'a Session,
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Raw listings grouped by product, as returned by the marketplace.
    pub fn products(&self, expansion_id: u64, language: &str) -> Result<Rc<ProductPayload>> {
        check_language(language)?;
        self.session.products(expansion_id, language)
    }

    /// One representative price per card of the expansion, with hub and
    /// condition tallies.
    ///
    /// A failed fetch is returned as an error. Malformed product groups are
    /// skipped and listed in [`ExpansionResult::skipped`].
    pub fn best_prices(&self, params: &BestPriceParams) -> Result<Rc<ExpansionResult>> {
        check_language(&params.language)?;
        let key = BestPriceKey {
            expansion_id: params.expansion_id,
            params: params.selection(),
        };

        if let Some(hit) = self.session.cache.borrow_mut().best_prices.get(&key) {
            tracing::debug!(expansion_id = params.expansion_id, "best prices served from cache");
            return Ok(hit);
        }

        let (payload, fetched_at) = self
            .session
            .products_entry(params.expansion_id, &params.language)?;
        let result = Rc::new(selector::select_expansion(
            &payload,
            &key.params,
            &self.session.fields,
        ));
        if !result.skipped.is_empty() {
            tracing::warn!(
                skipped = result.skipped.len(),
                expansion_id = params.expansion_id,
                "some product groups were malformed and skipped"
            );
        }

        self.session
            .cache
            .borrow_mut()
            .best_prices
            .insert_at(key, Rc::clone(&result), fetched_at);
        Ok(result)
    }
}

fn check_language(language: &str) -> Result<()> {
    if language.trim().is_empty() {
        return Err(CardTraderError::InvalidArgument(
            "language must not be empty".to_string(),
        ));
    }
    Ok(())
}
