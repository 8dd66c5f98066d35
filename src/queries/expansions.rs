//! Expansion lookups over the cached `GET /expansions` list.

use crate::config;
use crate::error::{CardTraderError, Result};
use crate::models::Expansion;
use crate::session::Session;

// ---------------------------------------------------------------------------
// ExpansionQuery
// ---------------------------------------------------------------------------

/// Query interface for expansions (printed card sets) across all games.
pub struct ExpansionQuery<'a> {
    session: &'a Session,
}

impl<'a> ExpansionQuery<'a> {
    /// Create a new `ExpansionQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Every expansion of every game.
    pub fn list(&self) -> Result<Vec<Expansion>> {
        Ok(self.session.expansions()?.as_ref().clone())
    }

    /// Expansions belonging to one game, in API order.
    pub fn for_game(&self, game_id: u64) -> Result<Vec<Expansion>> {
        Ok(self
            .session
            .expansions()?
            .iter()
            .filter(|e| e.game_id == game_id)
            .cloned()
            .collect())
    }

    pub fn get_by_id(&self, id: u64) -> Result<Option<Expansion>> {
        Ok(self.session.expansions()?.iter().find(|e| e.id == id).cloned())
    }

    /// Find an expansion of `game_id` by exact name, falling back to a
    /// case-insensitive match on name or code.
    pub fn get_by_name(&self, game_id: u64, name: &str) -> Result<Option<Expansion>> {
        let expansions = self.for_game(game_id)?;
        let lowered = name.to_lowercase();
        let exact = expansions.iter().position(|e| e.name == name);
        let loose = || {
            expansions.iter().position(|e| {
                e.name.to_lowercase() == lowered
                    || e.code.as_deref().is_some_and(|c| c.to_lowercase() == lowered)
            })
        };
        Ok(exact.or_else(loose).map(|i| expansions[i].clone()))
    }

    /// The expansion selected when the user picks none:
    /// [`config::DEFAULT_EXPANSION`] if the game has it, otherwise its first.
    pub fn default_for_game(&self, game_id: u64) -> Result<Expansion> {
        let expansions = self.for_game(game_id)?;
        expansions
            .iter()
            .find(|e| e.name == config::DEFAULT_EXPANSION)
            .or_else(|| expansions.first())
            .cloned()
            .ok_or_else(|| {
                CardTraderError::NotFound(format!("no expansions listed for game {}", game_id))
            })
    }
}
