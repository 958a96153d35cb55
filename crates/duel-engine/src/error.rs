use thiserror::Error;

/// Rejections raised while decoding or validating a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("unknown element tag {0}")]
    UnknownElement(u8),

    #[error("unknown combat action tag {0}")]
    UnknownAction(u8),

    #[error("combat move must be {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("unit index {0} out of range")]
    UnitOutOfRange(u8),

    #[error("unit {0} is eliminated and cannot act")]
    UnitEliminated(u8),

    #[error("energy cost {cost} exceeds unit energy {available}")]
    InsufficientEnergy { cost: u32, available: u32 },

    #[error("fee percent {0} exceeds 100")]
    FeePercentTooHigh(u8),

    #[error("expected 32 hex-encoded bytes")]
    InvalidHex,
}
