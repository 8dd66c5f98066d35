//! CardTrader marketplace price analysis.
//!
//! Fetches games, expansions and marketplace listings from the CardTrader
//! API, picks one representative "best" price per card of an expansion, and
//! derives summary statistics for display.
//!
//! # Quick start
//!
//! ```no_run
//! use cardtrader_dashboard::{CardTraderSdk, Condition};
//! use cardtrader_dashboard::queries::BestPriceParams;
//! use cardtrader_dashboard::report::ExpansionReport;
//!
//! let sdk = CardTraderSdk::builder().token_from_env().unwrap().build().unwrap();
//!
//! let game = sdk.games().default_game().unwrap();
//! let expansion = sdk.expansions().default_for_game(game.id).unwrap();
//!
//! let params = BestPriceParams::new(expansion.id, "it")
//!     .min_condition(Condition::SlightlyPlayed);
//! let result = sdk.cards().best_prices(&params).unwrap();
//!
//! let report = ExpansionReport::new(&result);
//! println!("total: {:.2}", report.total_cost());
//! ```

pub mod cache;
pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod flatten;
pub mod models;
pub mod queries;
pub mod render;
pub mod report;
pub mod selector;
pub mod session;
pub mod stats;

pub use cache::{SessionCache, TtlCache};
pub use client::ApiClient;
pub use condition::{acceptable_conditions, Condition};
pub use error::{CardTraderError, GroupSkip, Result};
pub use flatten::flatten_listing;
pub use selector::{select_expansion, select_group, ListingFields, SelectionParams};
pub use session::Session;

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// CardTraderSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardTraderSdk`] instance.
///
/// Use [`CardTraderSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CardTraderSdkBuilder::build) to create the SDK.
pub struct CardTraderSdkBuilder {
    token: Option<String>,
    base_url: String,
    timeout: Duration,
    cache_ttl: Duration,
    fields: ListingFields,
}

impl Default for CardTraderSdkBuilder {
    fn default() -> Self {
        Self {
            token: None,
            base_url: config::API_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            cache_ttl: config::DEFAULT_CACHE_TTL,
            fields: ListingFields::default(),
        }
    }
}

impl CardTraderSdkBuilder {
    /// Set the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Read the bearer token from `CARDTRADER_TOKEN`, falling back to `jwt`.
    pub fn token_from_env(self) -> Result<Self> {
        let token = config::token_from_env()?;
        Ok(self.token(token))
    }

    /// Point the client at a different API root. Defaults to
    /// [`config::API_BASE`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long fetched and computed results stay valid. Defaults to one
    /// hour; `Duration::ZERO` disables memoization.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Flat listing keys the price selector reads.
    pub fn listing_fields(mut self, fields: ListingFields) -> Self {
        self.fields = fields;
        self
    }

    /// Build the SDK. No request is sent until the first query.
    pub fn build(self) -> Result<CardTraderSdk> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CardTraderError::MissingToken(config::TOKEN_ENV_VARS.join(" or ")))?;
        let client = ApiClient::new(self.base_url, token, self.timeout)?;
        let session = Session::new(client, SessionCache::new(self.cache_ttl), self.fields);
        Ok(CardTraderSdk { session })
    }
}

// ---------------------------------------------------------------------------
// CardTraderSdk
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Wraps a [`Session`] (which owns the HTTP client and the TTL caches) and
/// exposes query interfaces as lightweight borrowing wrappers.
pub struct CardTraderSdk {
    session: Session,
}

impl CardTraderSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> CardTraderSdkBuilder {
        CardTraderSdkBuilder::default()
    }

    /// Access the game query interface.
    pub fn games(&self) -> queries::GameQuery<'_> {
        queries::GameQuery::new(&self.session)
    }

    /// Access the expansion query interface.
    pub fn expansions(&self) -> queries::ExpansionQuery<'_> {
        queries::ExpansionQuery::new(&self.session)
    }

    /// Access the card price query interface.
    ///
    /// Listing fetches and best-price results are both memoized per
    /// parameter set.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.session)
    }

    /// Drop every memoized result so the next query hits the network.
    pub fn clear_cache(&self) {
        self.session.clear_cache();
    }

    /// Drop only entries older than the TTL. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        self.session.cache.borrow_mut().evict_expired()
    }

    /// Return a reference to the underlying [`Session`] for advanced usage.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CardTraderSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.session.cache.borrow();
        write!(
            f,
            "CardTraderSdk(base_url={}, ttl={}s, cached_entries={})",
            self.session.client().base_url(),
            cache.games.ttl().as_secs(),
            cache.len()
        )
    }
}
