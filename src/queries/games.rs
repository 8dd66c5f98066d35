//! Game lookups over the cached `GET /games` list.

use crate::config;
use crate::error::{CardTraderError, Result};
use crate::models::Game;
use crate::session::Session;

// ---------------------------------------------------------------------------
// GameQuery
// ---------------------------------------------------------------------------

/// Query interface for the games the marketplace lists.
pub struct GameQuery<'a> {
    session: &'a Session,
}

impl<'a> GameQuery<'a> {
    /// Create a new `GameQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Every game, in API order.
    pub fn list(&self) -> Result<Vec<Game>> {
        Ok(self.session.games()?.as_ref().clone())
    }

    /// Find a game by its internal name (e.g. `"Pokémon"`).
    pub fn get_by_name(&self, name: &str) -> Result<Option<Game>> {
        Ok(self.session.games()?.iter().find(|g| g.name == name).cloned())
    }

    /// Find a game by the name shown to users.
    pub fn get_by_display_name(&self, display_name: &str) -> Result<Option<Game>> {
        Ok(self
            .session
            .games()?
            .iter()
            .find(|g| g.display_name == display_name)
            .cloned())
    }

    /// Resolve user input against display names first, then internal names,
    /// then either one case-insensitively.
    pub fn find(&self, query: &str) -> Result<Option<Game>> {
        let games = self.session.games()?;
        let lowered = query.to_lowercase();
        Ok(games
            .iter()
            .find(|g| g.display_name == query)
            .or_else(|| games.iter().find(|g| g.name == query))
            .or_else(|| {
                games.iter().find(|g| {
                    g.display_name.to_lowercase() == lowered || g.name.to_lowercase() == lowered
                })
            })
            .cloned())
    }

    /// The game selected when the user picks none: [`config::DEFAULT_GAME`]
    /// if listed, otherwise the first game.
    pub fn default_game(&self) -> Result<Game> {
        let games = self.session.games()?;
        games
            .iter()
            .find(|g| g.name == config::DEFAULT_GAME)
            .or_else(|| games.first())
            .cloned()
            .ok_or_else(|| CardTraderError::NotFound("the API returned no games".to_string()))
    }
}
