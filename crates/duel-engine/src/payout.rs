use serde::{Deserialize, Serialize};

use crate::error::MoveError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeSplit {
    pub winner_prize: u64,
    pub fee: u64,
}

/// Split a pooled prize into the winner's share and the platform fee.
/// The fee rounds down, so `winner_prize + fee == total_prize` always.
pub fn split_prize(total_prize: u64, fee_percent: u8) -> Result<PrizeSplit, MoveError> {
    if fee_percent > 100 {
        return Err(MoveError::FeePercentTooHigh(fee_percent));
    }
    // u128 keeps total * percent from overflowing for any u64 prize.
    let fee = (total_prize as u128 * fee_percent as u128 / 100) as u64;
    Ok(PrizeSplit {
        winner_prize: total_prize - fee,
        fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn two_percent_of_one_hundred() {
        assert_eq!(
            split_prize(100, 2).unwrap(),
            PrizeSplit { winner_prize: 98, fee: 2 }
        );
    }

    #[test]
    fn fee_rounds_down() {
        assert_eq!(
            split_prize(101, 2).unwrap(),
            PrizeSplit { winner_prize: 99, fee: 2 }
        );
        assert_eq!(
            split_prize(149, 2).unwrap(),
            PrizeSplit { winner_prize: 147, fee: 2 }
        );
        assert_eq!(
            split_prize(49, 2).unwrap(),
            PrizeSplit { winner_prize: 49, fee: 0 }
        );
    }

    #[test]
    fn rejects_fee_over_100() {
        assert_eq!(split_prize(100, 101), Err(MoveError::FeePercentTooHigh(101)));
        assert_eq!(split_prize(100, 100).unwrap().winner_prize, 0);
    }

    #[test]
    fn max_prize_does_not_overflow() {
        let split = split_prize(u64::MAX, 2).unwrap();
        assert_eq!(split.winner_prize + split.fee, u64::MAX);
    }

    proptest! {
        #[test]
        fn split_conserves_the_pool(total in any::<u64>(), pct in 0u8..=100) {
            let split = split_prize(total, pct).unwrap();
            prop_assert_eq!(split.winner_prize as u128 + split.fee as u128, total as u128);
            prop_assert!(split.fee as u128 * 100 <= total as u128 * pct as u128);
        }
    }
}
