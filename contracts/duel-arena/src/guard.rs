//! Request boundary around the arena.
//!
//! Requests run through `not reentrant -> not paused -> dispatch`. The
//! reentrant mutex serializes all access; a call arriving on the thread that
//! already holds it (a ledger calling back into the arena mid-transfer)
//! finds the arena borrowed and is rejected instead of deadlocking.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use duel_engine::commitment::Commitment;
use duel_engine::types::{BattleUnit, Side};
use parking_lot::ReentrantMutex;
use tracing::{info, warn};

use crate::arena::Arena;
use crate::clock::Clock;
use crate::error::{ArenaError, Result};
use crate::game::GameView;
use crate::settlement::Ledger;
use crate::types::{AccountId, Amount, GameId, Reveal, RuleSet};

/// A state-mutating call submitted by `caller`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Create { stake: Amount, rules: RuleSet },
    Join { game: GameId, value: Amount },
    Commit { game: GameId, commitments: Vec<Commitment> },
    Reveal { game: GameId, reveal: Reveal },
    ClaimTimeout { game: GameId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    Created(GameId),
    Accepted,
}

pub struct SharedArena<L, C> {
    inner: ReentrantMutex<RefCell<Arena<L, C>>>,
    paused: AtomicBool,
}

impl<L: Ledger, C: Clock> SharedArena<L, C> {
    pub fn new(arena: Arena<L, C>) -> Self {
        Self {
            inner: ReentrantMutex::new(RefCell::new(arena)),
            paused: AtomicBool::new(false),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Run `f` with exclusive access, rejecting same-thread reentry.
    fn with_arena_mut<T>(&self, f: impl FnOnce(&mut Arena<L, C>) -> Result<T>) -> Result<T> {
        let guard = self.inner.lock();
        let mut arena = guard.try_borrow_mut().map_err(|_| {
            warn!("reentrant arena call rejected");
            ArenaError::ReentrantCall
        })?;
        f(&mut arena)
    }

    fn with_arena<T>(&self, f: impl FnOnce(&Arena<L, C>) -> Result<T>) -> Result<T> {
        let guard = self.inner.lock();
        let arena = guard.try_borrow().map_err(|_| ArenaError::ReentrantCall)?;
        f(&arena)
    }

    pub fn submit(&self, caller: AccountId, request: Request) -> Result<Response> {
        self.with_arena_mut(|arena| {
            if self.is_paused() {
                return Err(ArenaError::Paused);
            }
            match request {
                Request::Create { stake, rules } => {
                    arena.create_game(caller, stake, rules).map(Response::Created)
                }
                Request::Join { game, value } => {
                    arena.join_game(caller, game, value).map(|_| Response::Accepted)
                }
                Request::Commit { game, commitments } => arena
                    .commit_moves(caller, game, &commitments)
                    .map(|_| Response::Accepted),
                Request::Reveal { game, reveal } => arena
                    .reveal_moves(caller, game, reveal)
                    .map(|_| Response::Accepted),
                Request::ClaimTimeout { game } => {
                    arena.claim_timeout(caller, game).map(|_| Response::Accepted)
                }
            }
        })
    }

    fn require_operator(&self, caller: &AccountId) -> Result<()> {
        self.with_arena(|arena| {
            if arena.config().operator == *caller {
                Ok(())
            } else {
                Err(ArenaError::Unauthorized)
            }
        })
    }

    pub fn pause(&self, caller: AccountId) -> Result<()> {
        self.require_operator(&caller)?;
        self.paused.store(true, Ordering::SeqCst);
        info!(operator = %caller, "arena paused");
        Ok(())
    }

    pub fn unpause(&self, caller: AccountId) -> Result<()> {
        self.require_operator(&caller)?;
        self.paused.store(false, Ordering::SeqCst);
        info!(operator = %caller, "arena unpaused");
        Ok(())
    }

    /// Operator remediation for a game left in `Settling` by a failed
    /// transfer. Allowed while paused.
    pub fn retry_settlement(&self, caller: AccountId, game: GameId) -> Result<()> {
        self.require_operator(&caller)?;
        self.with_arena_mut(|arena| arena.retry_settlement(game))
    }

    pub fn game_state(&self, game: GameId) -> Result<GameView> {
        self.with_arena(|arena| arena.game_state(game))
    }

    pub fn unit_stats(&self, game: GameId, side: Side, index: usize) -> Result<BattleUnit> {
        self.with_arena(|arena| arena.unit_stats(game, side, index))
    }

    /// Read access to the ledger, e.g. for balance inspection.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&L) -> T) -> Result<T> {
        self.with_arena(|arena| Ok(f(arena.ledger())))
    }
}
