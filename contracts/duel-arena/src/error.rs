use duel_engine::MoveError;
use thiserror::Error;

use crate::types::{GameId, Phase, RuleSet};

pub type Result<T> = std::result::Result<T, ArenaError>;

/// Every rejection the arena can report.
///
/// All variants except `SettlementTransferFailed` are raised before any
/// state is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("stake must be non-zero and match the game's stake")]
    InvalidStake,

    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("operation not permitted in phase {0:?}")]
    WrongPhase(Phase),

    #[error("caller is not a player in this game")]
    NotAParticipant,

    #[error("cannot join your own game")]
    CannotJoinOwnGame,

    #[error("expected {expected} commitments, got {actual}")]
    WrongCommitmentCount { expected: usize, actual: usize },

    #[error("already committed this round")]
    AlreadyCommitted,

    #[error("already revealed this round")]
    AlreadyRevealed,

    #[error("reveal {index} does not match its commitment")]
    CommitmentMismatch { index: usize },

    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error("game is played under {expected:?} rules")]
    WrongRuleSet { expected: RuleSet },

    #[error("timeout not reached: deadline {deadline}, now {now}")]
    TimeoutNotReached { deadline: u64, now: u64 },

    #[error("settlement transfer failed for game {game}: {reason}")]
    SettlementTransferFailed { game: GameId, reason: String },

    #[error("arena is paused")]
    Paused,

    #[error("reentrant call rejected")]
    ReentrantCall,

    #[error("caller is not the operator")]
    Unauthorized,

    #[error("invalid account id: {0}")]
    InvalidAccount(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ArenaError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
