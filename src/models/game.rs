use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Game: One entry of `GET /games`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    pub name: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// GamesResponse: The `{"array": [...]}` wrapper around the game list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesResponse {
    pub array: Vec<Game>,
}
