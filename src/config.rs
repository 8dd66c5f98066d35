use std::time::Duration;

use crate::error::{CardTraderError, Result};

pub const API_BASE: &str = "https://api.cardtrader.com/api/v2";

/// Environment variables checked, in order, for the bearer token.
pub const TOKEN_ENV_VARS: [&str; 2] = ["CARDTRADER_TOKEN", "jwt"];

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const DEFAULT_GAME: &str = "Pokémon";
pub const DEFAULT_EXPANSION: &str = "Base Set";
pub const DEFAULT_LANGUAGE: &str = "it";
/// Flat listing key holding a Pokémon card's language.
pub const DEFAULT_LANGUAGE_FIELD: &str = "pokemon_language";

/// Listing languages offered by the marketplace filter.
pub const LANGUAGES: [&str; 6] = ["en", "it", "fr", "de", "es", "jp"];

/// Upper bound of the adjustable top-N table.
pub const MAX_TOP_N: usize = 50;
/// Number of cards plotted in the price chart.
pub const CHART_TOP_N: usize = 10;

pub fn games_url(base: &str) -> String {
    format!("{}/games", base.trim_end_matches('/'))
}

pub fn expansions_url(base: &str) -> String {
    format!("{}/expansions", base.trim_end_matches('/'))
}

pub fn products_url(base: &str) -> String {
    format!("{}/marketplace/products", base.trim_end_matches('/'))
}

/// Read the bearer token from the environment.
///
/// Empty values are treated as unset.
pub fn token_from_env() -> Result<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .ok_or_else(|| CardTraderError::MissingToken(TOKEN_ENV_VARS.join(" or ")))
}
