//! Escrowed two-player duels on top of [`duel_engine`].
//!
//! [`Arena`] owns the game store and drives each game through
//! `Created -> CommitPhase -> RevealPhase -> Settling -> Finished`, handing
//! fund movements to a [`Ledger`]. [`SharedArena`] wraps it with the pause
//! switch, operator checks and reentrancy rejection.

pub mod arena;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod guard;
pub mod settlement;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use arena::Arena;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ArenaConfig;
pub use error::{ArenaError, Result};
pub use game::GameView;
pub use guard::{Request, Response, SharedArena};
pub use settlement::{Ledger, LedgerError, Payout, PayoutKind};
pub use types::{AccountId, Amount, GameId, Phase, Reveal, RuleSet};
