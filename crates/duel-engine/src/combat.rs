use crate::error::MoveError;
use crate::types::{
    BattleUnit, CombatAction, CombatMove, GameOutcome, Roster, RoundEvent, Side, ROSTER_SIZE,
};

/// Fresh roster with every unit at baseline stats.
pub fn init_roster() -> Roster {
    [BattleUnit::BASELINE; ROSTER_SIZE]
}

/// Check if every unit on a roster is eliminated.
pub fn is_eliminated(roster: &Roster) -> bool {
    roster.iter().all(|unit| !unit.is_alive)
}

/// Reject moves that reference missing or eliminated units, or that the
/// acting unit cannot pay for.
pub fn validate_move(own: &Roster, mv: &CombatMove) -> Result<(), MoveError> {
    let source = own
        .get(mv.source as usize)
        .ok_or(MoveError::UnitOutOfRange(mv.source))?;
    if mv.target as usize >= ROSTER_SIZE {
        return Err(MoveError::UnitOutOfRange(mv.target));
    }
    if !source.is_alive {
        return Err(MoveError::UnitEliminated(mv.source));
    }
    if mv.energy_cost > source.energy {
        return Err(MoveError::InsufficientEnergy {
            cost: mv.energy_cost,
            available: source.energy,
        });
    }
    Ok(())
}

#[cfg(feature = "events")]
type EventLog = Vec<RoundEvent>;

/// Stand-in log when event tracking is compiled out.
#[cfg(not(feature = "events"))]
#[derive(Default)]
struct EventLog;

#[cfg(not(feature = "events"))]
impl EventLog {
    fn push(&mut self, _event: RoundEvent) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatRound {
    #[cfg(feature = "events")]
    pub events: Vec<RoundEvent>,
    /// `None` while both rosters still field a living unit.
    pub outcome: Option<GameOutcome>,
}

/// Resolve one simultaneous combat round in place.
///
/// Both moves must have passed [`validate_move`] against the rosters as they
/// stood before the round. Player1's move is applied first, then player2's;
/// since both were committed blind, a unit eliminated by the first move
/// still lands the second.
pub fn resolve_round(
    roster1: &mut Roster,
    roster2: &mut Roster,
    move1: &CombatMove,
    move2: &CombatMove,
) -> CombatRound {
    let mut events = EventLog::default();

    apply_move(Side::Player1, roster1, roster2, move1, &mut events);
    apply_move(Side::Player2, roster2, roster1, move2, &mut events);

    let outcome = match (is_eliminated(roster1), is_eliminated(roster2)) {
        (false, false) => None,
        (true, false) => Some(GameOutcome::Winner(Side::Player2)),
        (false, true) => Some(GameOutcome::Winner(Side::Player1)),
        // Mutual elimination in the same round is a draw.
        (true, true) => Some(GameOutcome::Draw),
    };

    CombatRound {
        #[cfg(feature = "events")]
        events,
        outcome,
    }
}

fn apply_move(
    side: Side,
    own: &mut Roster,
    opponent: &mut Roster,
    mv: &CombatMove,
    events: &mut EventLog,
) {
    let source = &mut own[mv.source as usize];
    source.energy = source.energy.saturating_sub(mv.energy_cost);
    let damage = source.attack;

    match mv.action {
        CombatAction::Attack => {
            let target = &mut opponent[mv.target as usize];
            let was_alive = target.is_alive;
            if damage >= target.health {
                target.health = 0;
                target.is_alive = false;
            } else {
                target.health -= damage;
            }
            events.push(RoundEvent::Attack {
                attacker: side,
                source: mv.source,
                target: mv.target,
                damage,
                remaining_health: target.health,
            });
            if was_alive && !target.is_alive {
                events.push(RoundEvent::Eliminated {
                    side: side.opponent(),
                    unit: mv.target,
                });
            }
        }
        // Defend and bluff leave health untouched; they only spend energy.
        CombatAction::Defend => events.push(RoundEvent::Defend { side, unit: mv.source }),
        CombatAction::Bluff => events.push(RoundEvent::Bluff { side, unit: mv.source }),
    }
}
