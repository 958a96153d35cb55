use crate::types::{
    Element, GameOutcome, RoundOutcome, Side, ELEMENTAL_ROUNDS, ELEMENTAL_WIN_THRESHOLD,
};

/// Dominance cycle: Fire -> Air -> Earth -> Water -> Fire
/// (each element beats the one it points to).
pub fn beats(attacker: Element, defender: Element) -> bool {
    let prey = match attacker {
        Element::Fire => Element::Air,
        Element::Air => Element::Earth,
        Element::Earth => Element::Water,
        Element::Water => Element::Fire,
    };
    prey == defender
}

/// Score a single round. Non-adjacent pairs in the cycle and equal elements tie.
pub fn resolve_round(player1: Element, player2: Element) -> RoundOutcome {
    if beats(player1, player2) {
        RoundOutcome::Winner(Side::Player1)
    } else if beats(player2, player1) {
        RoundOutcome::Winner(Side::Player2)
    } else {
        RoundOutcome::Tie
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementalTally {
    pub player1_wins: u8,
    pub player2_wins: u8,
    pub rounds_played: u8,
    pub outcome: GameOutcome,
}

/// Score a fully revealed elemental game.
///
/// Rounds are evaluated in order and scoring stops as soon as either side
/// reaches [`ELEMENTAL_WIN_THRESHOLD`]. If all rounds are consumed the
/// higher score wins and an equal score is a draw.
pub fn score_game(
    player1: &[Element; ELEMENTAL_ROUNDS],
    player2: &[Element; ELEMENTAL_ROUNDS],
) -> ElementalTally {
    let mut tally = ElementalTally {
        player1_wins: 0,
        player2_wins: 0,
        rounds_played: 0,
        outcome: GameOutcome::Draw,
    };

    for (a, b) in player1.iter().zip(player2.iter()) {
        tally.rounds_played += 1;
        match resolve_round(*a, *b) {
            RoundOutcome::Winner(Side::Player1) => tally.player1_wins += 1,
            RoundOutcome::Winner(Side::Player2) => tally.player2_wins += 1,
            RoundOutcome::Tie => {}
        }
        if tally.player1_wins >= ELEMENTAL_WIN_THRESHOLD {
            tally.outcome = GameOutcome::Winner(Side::Player1);
            return tally;
        }
        if tally.player2_wins >= ELEMENTAL_WIN_THRESHOLD {
            tally.outcome = GameOutcome::Winner(Side::Player2);
            return tally;
        }
    }

    tally.outcome = if tally.player1_wins > tally.player2_wins {
        GameOutcome::Winner(Side::Player1)
    } else if tally.player2_wins > tally.player1_wins {
        GameOutcome::Winner(Side::Player2)
    } else {
        GameOutcome::Draw
    };
    tally
}
