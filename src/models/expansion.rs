use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Expansion: One printed set, as returned by `GET /expansions`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    pub id: u64,
    pub game_id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}
