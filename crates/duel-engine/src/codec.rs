use crate::error::MoveError;
use crate::types::{CombatAction, CombatMove, Element};

/// Encoded width of a combat move: action, source, target, energy cost (u32 BE).
pub const COMBAT_MOVE_LEN: usize = 7;

pub fn encode_element(element: Element) -> u8 {
    element as u8
}

pub fn decode_element(tag: u8) -> Result<Element, MoveError> {
    match tag {
        0 => Ok(Element::Fire),
        1 => Ok(Element::Water),
        2 => Ok(Element::Earth),
        3 => Ok(Element::Air),
        other => Err(MoveError::UnknownElement(other)),
    }
}

/// Encode a combat move into the exact bytes its commitment covers.
pub fn encode_combat_move(mv: &CombatMove) -> [u8; COMBAT_MOVE_LEN] {
    let cost = mv.energy_cost.to_be_bytes();
    [
        mv.action as u8,
        mv.source,
        mv.target,
        cost[0],
        cost[1],
        cost[2],
        cost[3],
    ]
}

pub fn decode_combat_move(bytes: &[u8]) -> Result<CombatMove, MoveError> {
    if bytes.len() != COMBAT_MOVE_LEN {
        return Err(MoveError::BadLength {
            expected: COMBAT_MOVE_LEN,
            actual: bytes.len(),
        });
    }
    let action = match bytes[0] {
        0 => CombatAction::Attack,
        1 => CombatAction::Defend,
        2 => CombatAction::Bluff,
        other => return Err(MoveError::UnknownAction(other)),
    };
    Ok(CombatMove {
        action,
        source: bytes[1],
        target: bytes[2],
        energy_cost: u32::from_be_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]),
    })
}
