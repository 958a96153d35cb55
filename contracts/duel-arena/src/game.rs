use duel_engine::combat::init_roster;
use duel_engine::commitment::Commitment;
use duel_engine::types::{GameOutcome, Roster, Side};
use serde::Serialize;

use crate::settlement::{Settlement, SettlementStatus};
use crate::types::{AccountId, Amount, GameId, Phase, RevealedMoves, RuleSet};

/// Rule-set specific state carried alongside the shared commit/reveal slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RuleState {
    Elemental { player1_wins: u8, player2_wins: u8 },
    Combat { rosters: [Roster; 2] },
}

impl RuleState {
    fn new(rules: RuleSet) -> Self {
        match rules {
            RuleSet::Elemental => RuleState::Elemental {
                player1_wins: 0,
                player2_wins: 0,
            },
            RuleSet::Combat => RuleState::Combat {
                rosters: [init_roster(), init_roster()],
            },
        }
    }

    pub fn rule_set(&self) -> RuleSet {
        match self {
            RuleState::Elemental { .. } => RuleSet::Elemental,
            RuleState::Combat { .. } => RuleSet::Combat,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    pub id: GameId,
    pub player1: AccountId,
    pub player2: Option<AccountId>,
    pub stake: Amount,
    /// Zero until a second player joins.
    pub total_prize: Amount,
    pub phase: Phase,
    pub rules: RuleState,
    /// Combat round counter, starting at 1. Elemental games play a single round.
    pub round: u32,
    pub last_action_at: u64,
    /// Indexed by [`Side::index`]. Write-once per round.
    pub commitments: [Option<Vec<Commitment>>; 2],
    /// Indexed by [`Side::index`]. Write-once per round.
    pub reveals: [Option<RevealedMoves>; 2],
    pub outcome: Option<GameOutcome>,
    pub settlement: Option<Settlement>,
}

impl Game {
    pub(crate) fn new(
        id: GameId,
        creator: AccountId,
        stake: Amount,
        rules: RuleSet,
        now: u64,
    ) -> Self {
        Self {
            id,
            player1: creator,
            player2: None,
            stake,
            total_prize: 0,
            phase: Phase::Created,
            rules: RuleState::new(rules),
            round: 1,
            last_action_at: now,
            commitments: [None, None],
            reveals: [None, None],
            outcome: None,
            settlement: None,
        }
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rules.rule_set()
    }

    /// Which seat `account` occupies, if any.
    pub fn side_of(&self, account: &AccountId) -> Option<Side> {
        if *account == self.player1 {
            Some(Side::Player1)
        } else if self.player2.as_ref() == Some(account) {
            Some(Side::Player2)
        } else {
            None
        }
    }

    pub fn player(&self, side: Side) -> Option<AccountId> {
        match side {
            Side::Player1 => Some(self.player1),
            Side::Player2 => self.player2,
        }
    }

    pub fn has_committed(&self, side: Side) -> bool {
        self.commitments[side.index()].is_some()
    }

    pub fn has_revealed(&self, side: Side) -> bool {
        self.reveals[side.index()].is_some()
    }

    pub(crate) fn clear_round(&mut self) {
        self.commitments = [None, None];
        self.reveals = [None, None];
    }

    pub fn view(&self) -> GameView {
        let (player1_wins, player2_wins) = match self.rules {
            RuleState::Elemental { player1_wins, player2_wins } => (player1_wins, player2_wins),
            RuleState::Combat { .. } => (0, 0),
        };
        let winner = match self.outcome {
            Some(GameOutcome::Winner(side)) => self.player(side),
            _ => None,
        };
        GameView {
            id: self.id,
            player1: self.player1,
            player2: self.player2,
            stake: self.stake,
            total_prize: self.total_prize,
            phase: self.phase,
            rule_set: self.rule_set(),
            round: self.round,
            player1_wins,
            player2_wins,
            committed: [self.has_committed(Side::Player1), self.has_committed(Side::Player2)],
            revealed: [self.has_revealed(Side::Player1), self.has_revealed(Side::Player2)],
            last_action_at: self.last_action_at,
            outcome: self.outcome,
            winner,
            settlement: self.settlement.as_ref().map(Settlement::status),
        }
    }
}

/// Read-only snapshot returned by state queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub id: GameId,
    pub player1: AccountId,
    pub player2: Option<AccountId>,
    pub stake: Amount,
    pub total_prize: Amount,
    pub phase: Phase,
    pub rule_set: RuleSet,
    pub round: u32,
    pub player1_wins: u8,
    pub player2_wins: u8,
    pub committed: [bool; 2],
    pub revealed: [bool; 2],
    pub last_action_at: u64,
    pub outcome: Option<GameOutcome>,
    pub winner: Option<AccountId>,
    pub settlement: Option<SettlementStatus>,
}
