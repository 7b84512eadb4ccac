use crate::error::InvariantViolation;
use crate::model::player::PlayerPosition;
use crate::model::trick::Trick;

/// Highest spade if any spade was played, otherwise highest card of the lead
/// suit. Only defined for a trick holding all four plays.
pub fn determine_trick_winner(trick: &Trick) -> Result<PlayerPosition, InvariantViolation> {
    trick.winner().ok_or(InvariantViolation::IncompleteTrick {
        plays: trick.plays().len(),
    })
}
