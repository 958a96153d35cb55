use serde::{Deserialize, Serialize};

/// Number of pre-committed rounds in an elemental game.
pub const ELEMENTAL_ROUNDS: usize = 3;

/// Round wins needed to end an elemental game early.
pub const ELEMENTAL_WIN_THRESHOLD: u8 = 2;

/// Units fielded by each side in a combat game.
pub const ROSTER_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    Fire = 0,
    Water = 1,
    Earth = 2,
    Air = 3,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Earth, Element::Air];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// Slot index for per-player arrays: 0 for player1, 1 for player2.
    pub fn index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Winner(Side),
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Side),
    /// Nobody won; both stakes are refunded.
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CombatAction {
    Attack = 0,
    Defend = 1,
    Bluff = 2,
}

/// One side's move for a combat round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatMove {
    pub action: CombatAction,
    /// Index of the acting unit in the mover's roster.
    pub source: u8,
    /// Index of the targeted unit in the opponent's roster.
    pub target: u8,
    pub energy_cost: u32,
}

impl CombatMove {
    pub fn attack(source: u8, target: u8, energy_cost: u32) -> Self {
        Self { action: CombatAction::Attack, source, target, energy_cost }
    }

    pub fn defend(source: u8, energy_cost: u32) -> Self {
        Self { action: CombatAction::Defend, source, target: source, energy_cost }
    }

    pub fn bluff(source: u8) -> Self {
        Self { action: CombatAction::Bluff, source, target: source, energy_cost: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleUnit {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub energy: u32,
    pub is_alive: bool,
}

impl BattleUnit {
    pub const BASELINE: BattleUnit = BattleUnit {
        health: 100,
        attack: 20,
        defense: 10,
        energy: 100,
        is_alive: true,
    };
}

pub type Roster = [BattleUnit; ROSTER_SIZE];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    Attack {
        attacker: Side,
        source: u8,
        target: u8,
        damage: u32,
        remaining_health: u32,
    },
    Defend {
        side: Side,
        unit: u8,
    },
    Bluff {
        side: Side,
        unit: u8,
    },
    Eliminated {
        side: Side,
        unit: u8,
    },
}
