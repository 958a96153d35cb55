//! Payout planning, the ledger seam, and the timeout policy.

use duel_engine::payout::split_prize;
use duel_engine::types::{GameOutcome, Side};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ArenaConfig;
use crate::error::{ArenaError, Result};
use crate::game::Game;
use crate::types::{AccountId, Amount, GameId, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutKind {
    Prize,
    Fee,
    Refund,
}

/// One fund-movement instruction for the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: AccountId,
    pub amount: Amount,
    pub kind: PayoutKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct LedgerError(pub String);

/// Escrow collaborator holding the staked funds.
pub trait Ledger {
    /// Move `payout.amount` out of escrow for `game`. Must report failure
    /// rather than silently dropping the transfer.
    fn transfer(&mut self, game: GameId, payout: &Payout) -> std::result::Result<(), LedgerError>;
}

/// How a game ends, before it is turned into payouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Winner takes the pool minus the platform fee.
    Winner(Side),
    /// Both stakes go back in full, no fee.
    RefundBoth,
    /// Nobody joined; the creator's stake goes back.
    RefundCreator,
}

impl Verdict {
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            Verdict::Winner(side) => Some(GameOutcome::Winner(side)),
            Verdict::RefundBoth => Some(GameOutcome::Draw),
            Verdict::RefundCreator => None,
        }
    }
}

impl From<GameOutcome> for Verdict {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Winner(side) => Verdict::Winner(side),
            GameOutcome::Draw => Verdict::RefundBoth,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementReason {
    Resolved,
    Timeout,
}

/// Payout instructions recorded on a game, with per-instruction progress so
/// a retry never re-sends a confirmed transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub reason: SettlementReason,
    pub verdict: Verdict,
    pub payouts: Vec<Payout>,
    pub completed: Vec<bool>,
    pub last_failure: Option<String>,
}

impl Settlement {
    pub fn new(reason: SettlementReason, verdict: Verdict, payouts: Vec<Payout>) -> Self {
        let completed = vec![false; payouts.len()];
        Self {
            reason,
            verdict,
            payouts,
            completed,
            last_failure: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed.iter().all(|done| *done)
    }

    pub fn status(&self) -> SettlementStatus {
        SettlementStatus {
            reason: self.reason,
            verdict: self.verdict,
            payouts: self.payouts.clone(),
            completed: self.completed.clone(),
            last_failure: self.last_failure.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettlementStatus {
    pub reason: SettlementReason,
    pub verdict: Verdict,
    pub payouts: Vec<Payout>,
    pub completed: Vec<bool>,
    pub last_failure: Option<String>,
}

/// Turn a verdict into payout instructions.
///
/// A winner receives `total_prize - fee` and the fee recipient `fee`;
/// refunds return exactly `stake` per player with no fee.
pub fn plan_payouts(game: &Game, verdict: Verdict, config: &ArenaConfig) -> Result<Vec<Payout>> {
    let refund = |recipient: AccountId| Payout {
        recipient,
        amount: game.stake,
        kind: PayoutKind::Refund,
    };

    match verdict {
        Verdict::Winner(side) => {
            let winner = game.player(side).ok_or(ArenaError::WrongPhase(game.phase))?;
            let split = split_prize(game.total_prize, config.fee_percent)?;
            Ok(vec![
                Payout {
                    recipient: winner,
                    amount: split.winner_prize,
                    kind: PayoutKind::Prize,
                },
                Payout {
                    recipient: config.fee_recipient,
                    amount: split.fee,
                    kind: PayoutKind::Fee,
                },
            ])
        }
        Verdict::RefundBoth => {
            let player2 = game.player2.ok_or(ArenaError::WrongPhase(game.phase))?;
            Ok(vec![refund(game.player1), refund(player2)])
        }
        Verdict::RefundCreator => Ok(vec![refund(game.player1)]),
    }
}

/// Decide who a stalled game falls to.
///
/// Progress is ranked reveal > commit > nothing within the current waiting
/// phase: the player who kept up wins by forfeit, equal silence refunds.
pub fn timeout_verdict(game: &Game) -> Result<Verdict> {
    let (p1, p2) = match game.phase {
        Phase::Created => return Ok(Verdict::RefundCreator),
        Phase::CommitPhase => (
            game.has_committed(Side::Player1),
            game.has_committed(Side::Player2),
        ),
        Phase::RevealPhase => (
            game.has_revealed(Side::Player1),
            game.has_revealed(Side::Player2),
        ),
        other => return Err(ArenaError::WrongPhase(other)),
    };

    match (p1, p2) {
        (false, false) => Ok(Verdict::RefundBoth),
        (true, false) => Ok(Verdict::Winner(Side::Player1)),
        (false, true) => Ok(Verdict::Winner(Side::Player2)),
        // Both acted: the phase would already have advanced.
        (true, true) => Err(ArenaError::WrongPhase(game.phase)),
    }
}
