pub mod expansion;
pub mod game;
pub mod listing;
pub mod selection;

pub use expansion::*;
pub use game::*;
pub use listing::*;
pub use selection::*;
