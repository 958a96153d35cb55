//! Deterministic rules for two-player commit-reveal duels.
//!
//! Nothing in this crate touches a clock, a ledger or shared state. The
//! arena contract drives it.

pub mod codec;
pub mod combat;
pub mod commitment;
pub mod elements;
pub mod error;
pub mod payout;
pub mod types;

pub use error::MoveError;
