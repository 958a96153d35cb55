use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::types::AccountId;

pub const DEFAULT_FEE_PERCENT: u8 = 2;

/// Default reveal window, in clock units.
pub const DEFAULT_REVEAL_WINDOW: u64 = 900;

fn default_fee_percent() -> u8 {
    DEFAULT_FEE_PERCENT
}

fn default_reveal_window() -> u64 {
    DEFAULT_REVEAL_WINDOW
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Percent of the pooled prize withheld as platform fee on decisive games.
    #[serde(default = "default_fee_percent")]
    pub fee_percent: u8,
    /// Time a stalled game must sit idle before anyone may claim a timeout.
    #[serde(default = "default_reveal_window")]
    pub reveal_window: u64,
    /// May pause the arena and retry failed settlements.
    pub operator: AccountId,
    pub fee_recipient: AccountId,
}

impl ArenaConfig {
    pub fn new(operator: AccountId, fee_recipient: AccountId) -> Self {
        Self {
            fee_percent: DEFAULT_FEE_PERCENT,
            reveal_window: DEFAULT_REVEAL_WINDOW,
            operator,
            fee_recipient,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ArenaConfig =
            serde_json::from_str(json).map_err(|e| ArenaError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fee_percent > 100 {
            return Err(ArenaError::config(format!(
                "fee_percent {} exceeds 100",
                self.fee_percent
            )));
        }
        if self.reveal_window == 0 {
            return Err(ArenaError::config("reveal_window must be non-zero"));
        }
        Ok(())
    }
}
