use crate::error::BidError;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A single seat's contract, always within `0..=13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Bid(u8);

impl Bid {
    pub const MAX: u8 = 13;

    pub fn new(tricks: u8) -> Result<Self, BidError> {
        if tricks > Self::MAX {
            return Err(BidError::OutOfRange(tricks));
        }
        Ok(Self(tricks))
    }

    /// Clamps into range; used by heuristics that compute a raw estimate.
    pub fn saturating(tricks: i32) -> Self {
        Self(tricks.clamp(0, Self::MAX as i32) as u8)
    }

    pub const fn tricks(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Bid {
    type Error = BidError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Bid::new(value)
    }
}

impl From<Bid> for u8 {
    fn from(bid: Bid) -> Self {
        bid.0
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
