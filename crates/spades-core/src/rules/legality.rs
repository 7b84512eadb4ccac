use crate::error::PlayError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::trick::Trick;

/// Cards `hand` may legally contribute to `trick`.
///
/// Leading: anything, except that spades are withheld while unbroken and the
/// hand still has another suit. Following: the lead suit when held, otherwise
/// anything. Never empty for a non-empty hand.
pub fn valid_plays(hand: &Hand, trick: &Trick, spades_broken: bool) -> Vec<Card> {
    match trick.lead_suit() {
        None => {
            if spades_broken || hand.only_trump() {
                hand.cards().to_vec()
            } else {
                hand.iter().copied().filter(|c| !c.is_trump()).collect()
            }
        }
        Some(lead) => {
            if hand.has_suit(lead) {
                hand.iter().copied().filter(|c| c.suit == lead).collect()
            } else {
                hand.cards().to_vec()
            }
        }
    }
}

/// Validates a single card against `valid_plays`, naming the rule it breaks.
pub fn check_play(
    hand: &Hand,
    trick: &Trick,
    spades_broken: bool,
    card: Card,
) -> Result<(), PlayError> {
    if !hand.contains(card) {
        return Err(PlayError::CardNotInHand(card));
    }
    if valid_plays(hand, trick, spades_broken).contains(&card) {
        return Ok(());
    }
    match trick.lead_suit() {
        Some(lead) => Err(PlayError::MustFollowSuit(lead)),
        None => Err(PlayError::SpadesNotBroken),
    }
}
