//! Blocking HTTP client for the three CardTrader read endpoints.
//!
//! Every request carries `Authorization: Bearer <token>`. Transport failures
//! and non-2xx statuses are returned as errors; nothing is retried here.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config;
use crate::error::Result;
use crate::models::{Expansion, Game, GamesResponse, ProductPayload};

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /games`, unwrapped from its `{"array": [...]}` envelope.
    pub fn fetch_games(&self) -> Result<Vec<Game>> {
        let url = config::games_url(&self.base_url);
        tracing::info!(%url, "fetching games");
        let resp: GamesResponse = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(resp.array)
    }

    /// `GET /expansions` for every game.
    pub fn fetch_expansions(&self) -> Result<Vec<Expansion>> {
        let url = config::expansions_url(&self.base_url);
        tracing::info!(%url, "fetching expansions");
        let expansions = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(expansions)
    }

    /// `GET /marketplace/products?expansion_id=&language=`.
    ///
    /// Only the top-level shape (an object of groups) is checked here; the
    /// groups themselves are validated by the price selector.
    pub fn fetch_products(&self, expansion_id: u64, language: &str) -> Result<ProductPayload> {
        let url = config::products_url(&self.base_url);
        tracing::info!(%url, expansion_id, language, "fetching marketplace products");
        let expansion_id = expansion_id.to_string();
        let payload: ProductPayload = self
            .client
            .get(&url)
            .query(&[("expansion_id", expansion_id.as_str()), ("language", language)])
            .bearer_auth(&self.token)
            .send()?
            .error_for_status()?
            .json()?;
        tracing::info!(groups = payload.len(), "received product groups");
        Ok(payload)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
