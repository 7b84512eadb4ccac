use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_SCORE: i32 = 500;

/// Table rules chosen by the host before the first deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_target_score")]
    pub target_score: i32,
    /// Seat that bids first in round one; later rounds start with the winner
    /// of the previous round's final trick.
    #[serde(default = "default_first_bidder")]
    pub first_bidder: PlayerPosition,
}

impl GameConfig {
    pub fn with_target(target_score: i32) -> Self {
        Self {
            target_score,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: default_target_score(),
            first_bidder: default_first_bidder(),
        }
    }
}

fn default_target_score() -> i32 {
    DEFAULT_TARGET_SCORE
}

fn default_first_bidder() -> PlayerPosition {
    PlayerPosition::South
}
