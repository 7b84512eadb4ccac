mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::bot::UnseenTracker;
use spades_core::model::bid::Bid;
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::player::PlayerPosition;
use spades_core::model::trick::Trick;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub trick: &'a Trick,
    pub spades_broken: bool,
    pub team_bid: u8,
    pub team_tricks: u8,
    pub tracker: &'a UnseenTracker,
}

/// Decision-making interface for an AI seat
pub trait Policy: Send {
    /// Choose a bid (called during the bidding phase)
    fn choose_bid(&mut self, ctx: &PolicyContext) -> Bid;

    /// Choose a card to play; `None` only for an empty hand
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card>;
}
