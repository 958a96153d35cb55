use duel_engine::commitment::{commit_combat_move, commit_element, Commitment, Salt};
use duel_engine::types::{CombatMove, Element, ELEMENTAL_ROUNDS};

use crate::arena::Arena;
use crate::clock::ManualClock;
use crate::config::ArenaConfig;
use crate::settlement::{Ledger, LedgerError, Payout};
use crate::types::{AccountId, GameId, Reveal, RuleSet};

pub const ALICE: AccountId = AccountId([0xa1; 20]);
pub const BOB: AccountId = AccountId([0xb0; 20]);
pub const CAROL: AccountId = AccountId([0xc4; 20]);
pub const OPERATOR: AccountId = AccountId([0x0e; 20]);
pub const TREASURY: AccountId = AccountId([0xfe; 20]);

pub const STAKE: u64 = 50;
pub const WINDOW: u64 = 900;

/// Ledger that records every confirmed transfer and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingLedger {
    pub transfers: Vec<(GameId, Payout)>,
    /// Number of upcoming transfers to reject.
    pub fail_next: usize,
    /// Reject every transfer to this account while set.
    pub reject: Option<AccountId>,
    pub attempts: usize,
}

impl RecordingLedger {
    pub fn paid_to(&self, account: AccountId) -> u64 {
        self.transfers
            .iter()
            .filter(|(_, p)| p.recipient == account)
            .map(|(_, p)| p.amount)
            .sum()
    }
}

impl Ledger for RecordingLedger {
    fn transfer(&mut self, game: GameId, payout: &Payout) -> Result<(), LedgerError> {
        self.attempts += 1;
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(LedgerError("escrow unavailable".to_string()));
        }
        if self.reject == Some(payout.recipient) {
            return Err(LedgerError(format!("recipient {} blocked", payout.recipient)));
        }
        self.transfers.push((game, *payout));
        Ok(())
    }
}

/// Route arena logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn config() -> ArenaConfig {
    ArenaConfig::new(OPERATOR, TREASURY)
}

pub fn new_arena() -> (Arena<RecordingLedger, ManualClock>, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(1_000);
    let arena = Arena::new(config(), RecordingLedger::default(), clock.clone()).unwrap();
    (arena, clock)
}

pub fn salt(tag: u8) -> Salt {
    Salt([tag; 32])
}

pub fn elemental_commit(moves: [Element; ELEMENTAL_ROUNDS], base: u8) -> Vec<Commitment> {
    moves
        .iter()
        .enumerate()
        .map(|(i, e)| commit_element(*e, &salt(base + i as u8)))
        .collect()
}

pub fn elemental_reveal(moves: [Element; ELEMENTAL_ROUNDS], base: u8) -> Reveal {
    Reveal::Elemental {
        moves,
        salts: [salt(base), salt(base + 1), salt(base + 2)],
    }
}

pub fn combat_commit(mv: &CombatMove, tag: u8) -> Vec<Commitment> {
    vec![commit_combat_move(mv, &salt(tag))]
}

pub fn combat_reveal(mv: CombatMove, tag: u8) -> Reveal {
    Reveal::Combat { mv, salt: salt(tag) }
}

/// Create and join a game between alice and bob.
pub fn joined(arena: &mut Arena<RecordingLedger, ManualClock>, rules: RuleSet) -> GameId {
    let id = arena.create_game(ALICE, STAKE, rules).unwrap();
    arena.join_game(BOB, id, STAKE).unwrap();
    id
}

/// Play one full combat round: both commit, both reveal.
pub fn play_combat_round(
    arena: &mut Arena<RecordingLedger, ManualClock>,
    id: GameId,
    alice_move: CombatMove,
    bob_move: CombatMove,
    tag: u8,
) {
    arena.commit_moves(ALICE, id, &combat_commit(&alice_move, tag)).unwrap();
    arena.commit_moves(BOB, id, &combat_commit(&bob_move, tag.wrapping_add(128))).unwrap();
    arena.reveal_moves(ALICE, id, combat_reveal(alice_move, tag)).unwrap();
    arena.reveal_moves(BOB, id, combat_reveal(bob_move, tag.wrapping_add(128))).unwrap();
}
