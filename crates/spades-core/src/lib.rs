pub mod error;
pub mod game;
pub mod model;
pub mod rules;

pub use error::{BidError, GameError, InvariantViolation, PlayError};
pub use model::deck::deal_cards;
pub use model::hand::sort_hand;
pub use model::score::{RoundScore, calculate_round_score};
pub use model::seat::team_bid;
pub use rules::{determine_trick_winner, valid_plays};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "spades"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
