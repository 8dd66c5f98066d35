//! Session state: the API client plus the memoized results of its calls.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::cache::SessionCache;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Expansion, Game, ProductPayload};
use crate::selector::ListingFields;

/// Owns the [`ApiClient`] and a [`SessionCache`] consulted before every
/// fetch. Query wrappers borrow it.
pub struct Session {
    client: ApiClient,
    /// Memoized fetch and selection results.
    pub cache: RefCell<SessionCache>,
    /// Flat keys the price selector reads from listings.
    pub fields: ListingFields,
}

impl Session {
    pub fn new(client: ApiClient, cache: SessionCache, fields: ListingFields) -> Self {
        Self {
            client,
            cache: RefCell::new(cache),
            fields,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// All games, fetched at most once per TTL window.
    pub fn games(&self) -> Result<Rc<Vec<Game>>> {
        let mut cache = self.cache.borrow_mut();
        if let Some(hit) = cache.games.get(&()) {
            tracing::debug!("games served from cache");
            return Ok(hit);
        }
        let games = Rc::new(self.client.fetch_games()?);
        cache.games.insert((), Rc::clone(&games));
        Ok(games)
    }

    /// All expansions of every game, fetched at most once per TTL window.
    pub fn expansions(&self) -> Result<Rc<Vec<Expansion>>> {
        let mut cache = self.cache.borrow_mut();
        if let Some(hit) = cache.expansions.get(&()) {
            tracing::debug!("expansions served from cache");
            return Ok(hit);
        }
        let expansions = Rc::new(self.client.fetch_expansions()?);
        cache.expansions.insert((), Rc::clone(&expansions));
        Ok(expansions)
    }

    /// Grouped marketplace listings for one expansion and language.
    pub fn products(&self, expansion_id: u64, language: &str) -> Result<Rc<ProductPayload>> {
        self.products_entry(expansion_id, language)
            .map(|(payload, _)| payload)
    }

    /// Like [`products`](Self::products), also returning when the payload was
    /// fetched. Results derived from it must not outlive that instant's TTL.
    pub fn products_entry(
        &self,
        expansion_id: u64,
        language: &str,
    ) -> Result<(Rc<ProductPayload>, Instant)> {
        let key = (expansion_id, language.to_string());
        let mut cache = self.cache.borrow_mut();
        if let Some(hit) = cache.products.get_entry(&key) {
            tracing::debug!(expansion_id, language, "products served from cache");
            return Ok(hit);
        }
        let payload = Rc::new(self.client.fetch_products(expansion_id, language)?);
        let fetched_at = Instant::now();
        cache
            .products
            .insert_at(key, Rc::clone(&payload), fetched_at);
        Ok((payload, fetched_at))
    }

    /// Drop every cached entry, fresh or not.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}
