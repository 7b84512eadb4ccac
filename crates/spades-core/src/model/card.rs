use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_trump(self) -> bool {
        self.suit.is_trump()
    }

    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Whether `self` takes `other` once `other` is the card to beat in a trick
    /// led with `lead`.
    pub fn beats(self, other: Card, lead: Suit) -> bool {
        match (self.is_trump(), other.is_trump()) {
            (true, false) => true,
            (false, true) => false,
            _ if self.suit == other.suit => self.rank > other.rank,
            _ => self.suit == lead && other.suit != lead,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
