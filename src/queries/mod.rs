//! Query modules for the CardTrader SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Session`](crate::session::Session) and goes through its TTL cache before
//! touching the network.

pub mod cards;
pub mod expansions;
pub mod games;

pub use cards::{BestPriceParams, CardQuery};
pub use expansions::ExpansionQuery;
pub use games::GameQuery;
