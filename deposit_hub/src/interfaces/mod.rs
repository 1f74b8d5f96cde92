//! Capability boundaries of the hub.
//!
//! The hub never reaches into a venue, a strategy or the ledger engine directly. Everything it
//! touches goes through one of these traits, resolved by address through an [`Environment`].

pub mod environment;
pub mod ledger;
pub mod plan;
pub mod pool;
pub mod settlement;

pub use environment::{Environment, Settle};
pub use ledger::{IlkLedger, Ledger, Urn};
pub use plan::Plan;
pub use pool::Pool;
pub use settlement::Settlement;
