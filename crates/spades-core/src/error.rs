use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use thiserror::Error;

/// A rejected play. The state that produced it is left untouched, so the
/// caller can surface the message and ask again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("cards can only be played during the playing phase")]
    NotInPlayPhase,
    #[error("{0} is not in the hand")]
    CardNotInHand(Card),
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("must follow the lead suit {0}")]
    MustFollowSuit(Suit),
    #[error("spades have not been broken")]
    SpadesNotBroken,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidError {
    #[error("bids are only accepted during the bidding phase")]
    NotInBiddingPhase,
    #[error("bid {0} is outside 0..=13")]
    OutOfRange(u8),
    #[error("expected {expected} to bid next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
}

/// Defects inside the engine or its AI. These are never user-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("trick resolved with {plays} plays")]
    IncompleteTrick { plays: usize },
    #[error("{0} appears more than once in the deal")]
    DuplicateCard(Card),
    #[error("deal accounts for {count} cards instead of 52")]
    CardCount { count: usize },
    #[error("round closed with {total} tricks instead of 13")]
    TrickTotal { total: u8 },
    #[error("{seat} has no bid at scoring time")]
    MissingBid { seat: PlayerPosition },
    #[error("AI seat {seat} chose illegal card {card}")]
    IllegalAiPlay { seat: PlayerPosition, card: Card },
    #[error("AI seat {seat} produced bid {bid} outside 0..=13")]
    IllegalAiBid { seat: PlayerPosition, bid: u8 },
    #[error("AI seat {seat} returned no card")]
    NoAiPlay { seat: PlayerPosition },
    #[error("{position} is seated more than once")]
    SeatOrder { position: PlayerPosition },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error(transparent)]
    Bid(#[from] BidError),
    #[error("the game is over")]
    GameOver,
    #[error("no round is waiting to be dealt")]
    NotInRoundTransition,
    #[error("engine invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl GameError {
    /// Whether the presentation layer may simply ask the player again.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, GameError::Invariant(_))
    }
}
