use core::fmt;
use core::str::FromStr;

use duel_engine::commitment::Salt;
use duel_engine::types::{CombatMove, Element, ELEMENTAL_ROUNDS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ArenaError;

pub type GameId = u64;
pub type Amount = u64;

/// A 20-byte account address, displayed as `0x`-prefixed hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub [u8; 20]);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for AccountId {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)
            .map_err(|_| ArenaError::InvalidAccount(s.to_string()))?;
        Ok(AccountId(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleSet {
    /// Three pre-committed elemental picks, revealed together.
    Elemental,
    /// Roster combat, one committed move per round.
    Combat,
}

impl RuleSet {
    /// Commitments each player submits per commit phase.
    pub fn moves_per_commit(self) -> usize {
        match self {
            RuleSet::Elemental => ELEMENTAL_ROUNDS,
            RuleSet::Combat => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Created,
    CommitPhase,
    RevealPhase,
    /// Payout instructions are recorded and not yet all confirmed by the ledger.
    Settling,
    Finished,
}

/// A player's reveal: the moves they committed to plus the salts used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reveal {
    Elemental {
        moves: [Element; ELEMENTAL_ROUNDS],
        salts: [Salt; ELEMENTAL_ROUNDS],
    },
    Combat {
        mv: CombatMove,
        salt: Salt,
    },
}

impl Reveal {
    pub fn rule_set(&self) -> RuleSet {
        match self {
            Reveal::Elemental { .. } => RuleSet::Elemental,
            Reveal::Combat { .. } => RuleSet::Combat,
        }
    }
}

/// Verified move payload stored once a reveal passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealedMoves {
    Elemental([Element; ELEMENTAL_ROUNDS]),
    Combat(CombatMove),
}
