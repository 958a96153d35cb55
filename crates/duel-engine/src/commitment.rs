//! Commit-reveal hashing.
//!
//! A commitment is `SHA-256(domain || len(payload) || payload || salt)`.
//! The length prefix keeps payload and salt boundaries unambiguous, and the
//! 256-bit caller-supplied salt hides moves drawn from a tiny move space.

use core::fmt;
use core::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec::{encode_combat_move, encode_element};
use crate::error::MoveError;
use crate::types::{CombatMove, Element};

const COMMITMENT_DOMAIN: &[u8] = b"DUEL_COMMIT_V1";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Salt(pub [u8; 32]);

impl Salt {
    /// Draw a fresh salt. Client-side helper; the arena never generates salts.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Salt(bytes)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(pub [u8; 32]);

fn parse_hex32(s: &str) -> Result<[u8; 32], MoveError> {
    let mut out = [0u8; 32];
    hex::decode_to_slice(s.trim_start_matches("0x"), &mut out)
        .map_err(|_| MoveError::InvalidHex)?;
    Ok(out)
}

macro_rules! hex_newtype {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = MoveError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex32(s).map($name)
            }
        }
    };
}

hex_newtype!(Salt);
hex_newtype!(Commitment);

/// Hash a move payload together with its salt.
pub fn commit(payload: &[u8], salt: &Salt) -> Commitment {
    let mut hasher = Sha256::new();
    hasher.update(COMMITMENT_DOMAIN);
    hasher.update((payload.len() as u32).to_be_bytes());
    hasher.update(payload);
    hasher.update(salt.0);
    Commitment(hasher.finalize().into())
}

/// Recompute and compare. Never panics.
pub fn verify(commitment: &Commitment, payload: &[u8], salt: &Salt) -> bool {
    commit(payload, salt) == *commitment
}

pub fn commit_element(element: Element, salt: &Salt) -> Commitment {
    commit(&[encode_element(element)], salt)
}

pub fn verify_element(commitment: &Commitment, element: Element, salt: &Salt) -> bool {
    verify(commitment, &[encode_element(element)], salt)
}

pub fn commit_combat_move(mv: &CombatMove, salt: &Salt) -> Commitment {
    commit(&encode_combat_move(mv), salt)
}

pub fn verify_combat_move(commitment: &Commitment, mv: &CombatMove, salt: &Salt) -> bool {
    verify(commitment, &encode_combat_move(mv), salt)
}
