//! The duel state machine.
//!
//! Every public operation checks, in order: the game exists, the caller holds
//! a seat where one is required, and the phase permits the operation. All
//! checks run before the first write, so a rejected call leaves the game
//! untouched.

use duel_engine::combat::{self, validate_move};
use duel_engine::commitment::{verify_combat_move, verify_element, Commitment};
use duel_engine::elements::score_game;
use duel_engine::types::{BattleUnit, Side};
use duel_engine::MoveError;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::ArenaConfig;
use crate::error::{ArenaError, Result};
use crate::game::{Game, GameView, RuleState};
use crate::settlement::{
    plan_payouts, timeout_verdict, Ledger, Settlement, SettlementReason, Verdict,
};
use crate::store::GameStore;
use crate::types::{AccountId, Amount, GameId, Phase, Reveal, RevealedMoves, RuleSet};

pub struct Arena<L, C> {
    config: ArenaConfig,
    store: GameStore,
    ledger: L,
    clock: C,
}

impl<L: Ledger, C: Clock> Arena<L, C> {
    pub fn new(config: ArenaConfig, ledger: L, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store: GameStore::new(),
            ledger,
            clock,
        })
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // -----------------------------------------------------------------------
    // create / join
    // -----------------------------------------------------------------------

    pub fn create_game(&mut self, caller: AccountId, stake: Amount, rules: RuleSet) -> Result<GameId> {
        if stake == 0 || stake.checked_mul(2).is_none() {
            return Err(ArenaError::InvalidStake);
        }
        let now = self.clock.now();
        let id = self
            .store
            .insert(|id| Game::new(id, caller, stake, rules, now));
        info!(game = id, creator = %caller, stake, ?rules, "game created");
        Ok(id)
    }

    pub fn join_game(&mut self, caller: AccountId, id: GameId, value: Amount) -> Result<()> {
        let now = self.clock.now();
        let game = self.store.get_mut(id)?;
        if game.phase != Phase::Created {
            return Err(ArenaError::WrongPhase(game.phase));
        }
        if caller == game.player1 {
            return Err(ArenaError::CannotJoinOwnGame);
        }
        if value != game.stake {
            return Err(ArenaError::InvalidStake);
        }

        game.player2 = Some(caller);
        game.total_prize = game.stake * 2;
        if let RuleState::Combat { rosters } = &mut game.rules {
            rosters[Side::Player2.index()] = combat::init_roster();
        }
        game.phase = Phase::CommitPhase;
        game.last_action_at = now;
        info!(game = id, joiner = %caller, total_prize = game.total_prize, "game joined");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // commit / reveal
    // -----------------------------------------------------------------------

    pub fn commit_moves(
        &mut self,
        caller: AccountId,
        id: GameId,
        commitments: &[Commitment],
    ) -> Result<()> {
        let now = self.clock.now();
        let game = self.store.get_mut(id)?;
        let side = game.side_of(&caller).ok_or(ArenaError::NotAParticipant)?;
        if game.phase != Phase::CommitPhase {
            return Err(ArenaError::WrongPhase(game.phase));
        }
        let expected = game.rule_set().moves_per_commit();
        if commitments.len() != expected {
            return Err(ArenaError::WrongCommitmentCount {
                expected,
                actual: commitments.len(),
            });
        }
        if game.has_committed(side) {
            return Err(ArenaError::AlreadyCommitted);
        }

        game.commitments[side.index()] = Some(commitments.to_vec());
        debug!(game = id, ?side, round = game.round, "commitment accepted");

        if game.has_committed(side.opponent()) {
            game.phase = Phase::RevealPhase;
            game.last_action_at = now;
            info!(game = id, round = game.round, "both committed, reveal phase open");
        }
        Ok(())
    }

    /// Verify and store a reveal. The second reveal of a round resolves it,
    /// which may settle the game; a failed ledger transfer during that
    /// settlement surfaces here as `SettlementTransferFailed`.
    pub fn reveal_moves(&mut self, caller: AccountId, id: GameId, reveal: Reveal) -> Result<()> {
        let game = self.store.get_mut(id)?;
        let side = game.side_of(&caller).ok_or(ArenaError::NotAParticipant)?;
        if game.phase != Phase::RevealPhase {
            return Err(ArenaError::WrongPhase(game.phase));
        }
        if game.has_revealed(side) {
            return Err(ArenaError::AlreadyRevealed);
        }
        let rule_set = game.rule_set();
        if reveal.rule_set() != rule_set {
            return Err(ArenaError::WrongRuleSet { expected: rule_set });
        }
        let committed = game.commitments[side.index()]
            .as_deref()
            .ok_or(ArenaError::WrongPhase(game.phase))?;

        let revealed = match (&reveal, &game.rules) {
            (Reveal::Elemental { moves, salts }, _) => {
                for (index, ((element, salt), commitment)) in
                    moves.iter().zip(salts.iter()).zip(committed.iter()).enumerate()
                {
                    if !verify_element(commitment, *element, salt) {
                        warn!(game = id, ?side, index, "reveal does not match commitment");
                        return Err(ArenaError::CommitmentMismatch { index });
                    }
                }
                RevealedMoves::Elemental(*moves)
            }
            (Reveal::Combat { mv, salt }, RuleState::Combat { rosters }) => {
                if !verify_combat_move(&committed[0], mv, salt) {
                    warn!(game = id, ?side, "reveal does not match commitment");
                    return Err(ArenaError::CommitmentMismatch { index: 0 });
                }
                validate_move(&rosters[side.index()], mv)?;
                RevealedMoves::Combat(*mv)
            }
            (Reveal::Combat { .. }, RuleState::Elemental { .. }) => {
                return Err(ArenaError::WrongRuleSet { expected: rule_set })
            }
        };

        game.reveals[side.index()] = Some(revealed);
        debug!(game = id, ?side, round = game.round, "reveal accepted");

        if game.has_revealed(side.opponent()) {
            self.resolve(id)?;
        }
        Ok(())
    }

    /// Both sides have revealed: score the round and either settle or loop
    /// back for another combat round.
    fn resolve(&mut self, id: GameId) -> Result<()> {
        let now = self.clock.now();
        let game = self.store.get_mut(id)?;
        let [Some(first), Some(second)] = game.reveals else {
            return Err(ArenaError::WrongPhase(game.phase));
        };
        let rule_set = game.rule_set();

        let verdict = match (first, second, &mut game.rules) {
            (
                RevealedMoves::Elemental(moves1),
                RevealedMoves::Elemental(moves2),
                RuleState::Elemental { player1_wins, player2_wins },
            ) => {
                let tally = score_game(&moves1, &moves2);
                *player1_wins = tally.player1_wins;
                *player2_wins = tally.player2_wins;
                info!(
                    game = id,
                    player1_wins = tally.player1_wins,
                    player2_wins = tally.player2_wins,
                    rounds_played = tally.rounds_played,
                    "elemental game scored"
                );
                Some(Verdict::from(tally.outcome))
            }
            (
                RevealedMoves::Combat(move1),
                RevealedMoves::Combat(move2),
                RuleState::Combat { rosters },
            ) => {
                let [roster1, roster2] = rosters;
                let result = combat::resolve_round(roster1, roster2, &move1, &move2);
                info!(game = id, round = game.round, outcome = ?result.outcome, "combat round resolved");
                result.outcome.map(Verdict::from)
            }
            _ => return Err(ArenaError::WrongRuleSet { expected: rule_set }),
        };

        match verdict {
            Some(verdict) => self.settle(id, verdict, SettlementReason::Resolved),
            None => {
                game.clear_round();
                game.round += 1;
                game.phase = Phase::CommitPhase;
                game.last_action_at = now;
                info!(game = id, round = game.round, "next combat round");
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // timeout / settlement
    // -----------------------------------------------------------------------

    /// Anyone may end a game that has sat idle past the reveal window.
    pub fn claim_timeout(&mut self, caller: AccountId, id: GameId) -> Result<()> {
        let now = self.clock.now();
        let window = self.config.reveal_window;
        let game = self.store.get(id)?;
        if !matches!(
            game.phase,
            Phase::Created | Phase::CommitPhase | Phase::RevealPhase
        ) {
            return Err(ArenaError::WrongPhase(game.phase));
        }
        let deadline = game.last_action_at.saturating_add(window);
        if now <= deadline {
            return Err(ArenaError::TimeoutNotReached { deadline, now });
        }
        let verdict = timeout_verdict(game)?;
        info!(game = id, claimant = %caller, ?verdict, phase = ?game.phase, "timeout claimed");
        self.settle(id, verdict, SettlementReason::Timeout)
    }

    /// Record the payout plan and move to `Settling` before the first ledger
    /// call, then execute it.
    fn settle(&mut self, id: GameId, verdict: Verdict, reason: SettlementReason) -> Result<()> {
        let game = self.store.get_mut(id)?;
        let payouts = plan_payouts(game, verdict, &self.config)?;
        game.phase = Phase::Settling;
        game.outcome = verdict.outcome();
        game.settlement = Some(Settlement::new(reason, verdict, payouts));
        self.execute_settlement(id)
    }

    /// Send every unconfirmed payout. Stops at the first failure, leaving the
    /// game in `Settling` for an operator retry.
    fn execute_settlement(&mut self, id: GameId) -> Result<()> {
        let game = self.store.get_mut(id)?;
        let phase = game.phase;
        let settlement = game
            .settlement
            .as_mut()
            .ok_or(ArenaError::WrongPhase(phase))?;

        for i in 0..settlement.payouts.len() {
            if settlement.completed[i] {
                continue;
            }
            let payout = settlement.payouts[i];
            if payout.amount > 0 {
                if let Err(err) = self.ledger.transfer(id, &payout) {
                    warn!(
                        game = id,
                        recipient = %payout.recipient,
                        amount = payout.amount,
                        kind = ?payout.kind,
                        %err,
                        "settlement transfer failed"
                    );
                    settlement.last_failure = Some(err.to_string());
                    return Err(ArenaError::SettlementTransferFailed {
                        game: id,
                        reason: err.to_string(),
                    });
                }
            }
            settlement.completed[i] = true;
        }

        settlement.last_failure = None;
        game.phase = Phase::Finished;
        info!(game = id, verdict = ?settlement.verdict, reason = ?settlement.reason, "game settled");
        Ok(())
    }

    /// Re-send the unconfirmed payouts of a game stuck in `Settling`.
    /// Authorization is the caller's concern; see [`crate::guard`].
    pub fn retry_settlement(&mut self, id: GameId) -> Result<()> {
        let game = self.store.get(id)?;
        if game.phase != Phase::Settling {
            return Err(ArenaError::WrongPhase(game.phase));
        }
        info!(game = id, "retrying settlement");
        self.execute_settlement(id)
    }

    // -----------------------------------------------------------------------
    // queries
    // -----------------------------------------------------------------------

    pub fn game_state(&self, id: GameId) -> Result<GameView> {
        Ok(self.store.get(id)?.view())
    }

    pub fn unit_stats(&self, id: GameId, side: Side, index: usize) -> Result<BattleUnit> {
        let game = self.store.get(id)?;
        match &game.rules {
            RuleState::Combat { rosters } => rosters[side.index()]
                .get(index)
                .copied()
                .ok_or(ArenaError::InvalidMove(MoveError::UnitOutOfRange(
                    u8::try_from(index).unwrap_or(u8::MAX),
                ))),
            RuleState::Elemental { .. } => Err(ArenaError::WrongRuleSet {
                expected: RuleSet::Elemental,
            }),
        }
    }
}
