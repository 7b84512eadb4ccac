use crate::error::{GameError, InvariantViolation, PlayError};
use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::deck::deal_cards;
use crate::model::hand::Hand;
use crate::model::player::{PlayerPosition, Team};
use crate::model::seat::{Seat, arrange_seats, team_bid, team_tricks};
use crate::model::trick::Trick;
use crate::rules::{check_play, determine_trick_winner, valid_plays};
use std::collections::HashSet;

pub const TRICKS_PER_ROUND: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    round_number: u32,
    seats: [Seat; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    bidding_leader: PlayerPosition,
    spades_broken: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: PlayerPosition },
    RoundCompleted { winner: PlayerPosition },
}

impl RoundState {
    pub fn deal<R: rand::Rng + ?Sized>(
        seats: &[Seat; 4],
        round_number: u32,
        bidding_leader: PlayerPosition,
        rng: &mut R,
    ) -> Result<Self, InvariantViolation> {
        Self::from_seats(deal_cards(seats, rng), round_number, bidding_leader)
    }

    /// Builds a round from already-dealt seats. The first trick is led by the
    /// seat that opened the bidding.
    ///
    /// Seats are stored at their own position's index; a repeated position is
    /// rejected.
    pub fn from_seats(
        seats: [Seat; 4],
        round_number: u32,
        bidding_leader: PlayerPosition,
    ) -> Result<Self, InvariantViolation> {
        let seats = arrange_seats(seats)?;
        Ok(Self {
            round_number,
            seats,
            current_trick: Trick::new(bidding_leader),
            trick_history: Vec::with_capacity(TRICKS_PER_ROUND),
            bidding_leader,
            spades_broken: false,
        })
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn seats(&self) -> &[Seat; 4] {
        &self.seats
    }

    pub fn seat(&self, seat: PlayerPosition) -> &Seat {
        &self.seats[seat.index()]
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.seats[seat.index()].hand
    }

    pub fn bid(&self, seat: PlayerPosition) -> Option<Bid> {
        self.seats[seat.index()].bid
    }

    pub fn bidding_leader(&self) -> PlayerPosition {
        self.bidding_leader
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn last_trick(&self) -> Option<&Trick> {
        self.trick_history.last()
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn is_complete(&self) -> bool {
        self.tricks_completed() == TRICKS_PER_ROUND
    }

    pub fn spades_broken(&self) -> bool {
        self.spades_broken
    }

    pub fn all_bids_in(&self) -> bool {
        self.seats.iter().all(|seat| seat.bid.is_some())
    }

    pub fn team_bid(&self, team: Team) -> u8 {
        team_bid(&self.seats, team)
    }

    pub fn team_tricks(&self, team: Team) -> u8 {
        team_tricks(&self.seats, team)
    }

    pub fn tricks_won(&self, seat: PlayerPosition) -> u8 {
        self.seats[seat.index()].tricks_won
    }

    pub fn next_to_play(&self) -> PlayerPosition {
        self.current_trick.expected_position()
    }

    pub fn valid_plays(&self, seat: PlayerPosition) -> Vec<Card> {
        valid_plays(self.hand(seat), &self.current_trick, self.spades_broken)
    }

    /// Every card already played this round, completed tricks first.
    pub fn played_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.trick_history
            .iter()
            .chain(std::iter::once(&self.current_trick))
            .flat_map(|trick| trick.plays().iter().map(|play| play.card))
    }

    pub(crate) fn record_bid(&mut self, seat: PlayerPosition, bid: Bid) {
        self.seats[seat.index()].bid = Some(bid);
    }

    pub(crate) fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, GameError> {
        let expected = self.next_to_play();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            }
            .into());
        }
        check_play(
            self.hand(seat),
            &self.current_trick,
            self.spades_broken,
            card,
        )?;

        self.current_trick
            .play(seat, card)
            .map_err(|_| PlayError::OutOfTurn {
                expected,
                actual: seat,
            })?;
        self.seats[seat.index()].hand.remove(card);
        if card.is_trump() {
            self.spades_broken = true;
        }

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played);
        }

        let winner = determine_trick_winner(&self.current_trick)?;
        self.complete_trick(winner);
        if self.is_complete() {
            Ok(PlayOutcome::RoundCompleted { winner })
        } else {
            Ok(PlayOutcome::TrickCompleted { winner })
        }
    }

    fn complete_trick(&mut self, winner: PlayerPosition) {
        let seat = &mut self.seats[winner.index()];
        seat.tricks_won = seat.tricks_won.saturating_add(1);
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        self.trick_history.push(finished);
    }

    /// Winner of the thirteenth trick, once the round is over.
    pub fn final_trick_winner(&self) -> Result<PlayerPosition, InvariantViolation> {
        match self.trick_history.last() {
            Some(trick) if self.is_complete() => determine_trick_winner(trick),
            _ => Err(InvariantViolation::TrickTotal {
                total: self.tricks_completed() as u8,
            }),
        }
    }

    /// Hands plus played cards must be exactly the 52-card deck.
    pub fn verify_card_accounting(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::with_capacity(52);
        let held = self.seats.iter().flat_map(|seat| seat.hand.iter().copied());
        for card in held.chain(self.played_cards()) {
            if !seen.insert(card) {
                return Err(InvariantViolation::DuplicateCard(card));
            }
        }
        if seen.len() != 52 {
            return Err(InvariantViolation::CardCount { count: seen.len() });
        }
        Ok(())
    }

    /// Total tricks across the table must equal tricks completed.
    pub fn verify_trick_total(&self) -> Result<(), InvariantViolation> {
        let total: u8 = self.seats.iter().map(|seat| seat.tricks_won).sum();
        if total as usize != self.tricks_completed() {
            return Err(InvariantViolation::TrickTotal { total });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayOutcome, RoundState};
    use crate::error::{InvariantViolation, PlayError};
    use crate::model::bid::Bid;
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::{PlayerPosition, Team};
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Deck::standard() split round-robin: North gets every fourth card from
    /// 2S, East from 3S, and so on.
    fn standard_round(leader: PlayerPosition) -> RoundState {
        let mut seats = Seat::all_ai();
        for (seat, hand) in seats.iter_mut().zip(Deck::standard().split()) {
            seat.hand = hand;
        }
        RoundState::from_seats(seats, 1, leader).unwrap()
    }

    #[test]
    fn dealing_distributes_thirteen_cards_per_player() {
        let mut rng = StdRng::seed_from_u64(3);
        let round = RoundState::deal(&Seat::all_ai(), 1, PlayerPosition::South, &mut rng).unwrap();

        for seat in PlayerPosition::LOOP.iter().copied() {
            assert_eq!(round.hand(seat).len(), 13, "{seat} should have 13 cards");
        }
        assert_eq!(round.current_trick().leader(), PlayerPosition::South);
        assert_eq!(round.trick_history().len(), 0);
        assert!(!round.spades_broken());
        assert!(round.verify_card_accounting().is_ok());
    }

    #[test]
    fn out_of_turn_play_is_rejected() {
        let mut round = standard_round(PlayerPosition::North);
        let card = round.hand(PlayerPosition::East).cards()[5];
        assert_eq!(
            round.play_card(PlayerPosition::East, card),
            Err(PlayError::OutOfTurn {
                expected: PlayerPosition::North,
                actual: PlayerPosition::East
            }
            .into())
        );
    }

    #[test]
    fn cannot_lead_spades_before_broken() {
        let mut round = standard_round(PlayerPosition::North);
        let spade = Card::new(Rank::Two, Suit::Spades);
        assert!(round.hand(PlayerPosition::North).contains(spade));
        assert_eq!(
            round.play_card(PlayerPosition::North, spade),
            Err(PlayError::SpadesNotBroken.into())
        );
        assert_eq!(round.hand(PlayerPosition::North).len(), 13);
    }

    #[test]
    fn completed_trick_goes_to_winner_who_leads_next() {
        let mut round = standard_round(PlayerPosition::North);
        let plays = [
            (PlayerPosition::North, Card::new(Rank::Five, Suit::Hearts)),
            (PlayerPosition::East, Card::new(Rank::Six, Suit::Hearts)),
            (PlayerPosition::South, Card::new(Rank::Seven, Suit::Hearts)),
            (PlayerPosition::West, Card::new(Rank::Eight, Suit::Hearts)),
        ];
        let mut last = PlayOutcome::Played;
        for (seat, card) in plays {
            last = round.play_card(seat, card).unwrap();
        }
        assert_eq!(
            last,
            PlayOutcome::TrickCompleted {
                winner: PlayerPosition::West
            }
        );
        assert_eq!(round.tricks_won(PlayerPosition::West), 1);
        assert_eq!(round.current_trick().leader(), PlayerPosition::West);
        assert_eq!(round.next_to_play(), PlayerPosition::West);
        assert!(round.verify_card_accounting().is_ok());
        assert!(round.verify_trick_total().is_ok());
    }

    #[test]
    fn trumping_breaks_spades() {
        let mut seats = Seat::all_ai();
        seats[0].hand = Hand::with_cards(vec![Card::new(Rank::Ace, Suit::Hearts)]);
        seats[1].hand = Hand::with_cards(vec![Card::new(Rank::Two, Suit::Spades)]);
        seats[2].hand = Hand::with_cards(vec![Card::new(Rank::King, Suit::Hearts)]);
        seats[3].hand = Hand::with_cards(vec![Card::new(Rank::Queen, Suit::Hearts)]);
        let mut round = RoundState::from_seats(seats, 1, PlayerPosition::North).unwrap();

        round
            .play_card(PlayerPosition::North, Card::new(Rank::Ace, Suit::Hearts))
            .unwrap();
        round
            .play_card(PlayerPosition::East, Card::new(Rank::Two, Suit::Spades))
            .unwrap();
        assert!(round.spades_broken());
        round
            .play_card(PlayerPosition::South, Card::new(Rank::King, Suit::Hearts))
            .unwrap();
        let outcome = round
            .play_card(PlayerPosition::West, Card::new(Rank::Queen, Suit::Hearts))
            .unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::TrickCompleted {
                winner: PlayerPosition::East
            }
        );
    }

    #[test]
    fn duplicate_card_is_detected() {
        let mut seats = Seat::all_ai();
        for (seat, hand) in seats.iter_mut().zip(Deck::standard().split()) {
            seat.hand = hand;
        }
        let stolen = seats[1].hand.cards()[0];
        seats[0].hand.add(stolen);
        let round = RoundState::from_seats(seats, 1, PlayerPosition::North).unwrap();
        assert!(round.verify_card_accounting().is_err());
    }

    #[test]
    fn rotated_seats_are_stored_by_position() {
        let mut seats = Seat::all_ai();
        seats.rotate_left(1);
        let mut round = RoundState::from_seats(seats, 1, PlayerPosition::North).unwrap();
        for seat in PlayerPosition::LOOP {
            assert_eq!(round.seat(seat).position, seat);
        }

        round.record_bid(PlayerPosition::North, Bid::new(5).unwrap());
        round.record_bid(PlayerPosition::South, Bid::new(4).unwrap());
        round.record_bid(PlayerPosition::East, Bid::new(0).unwrap());
        round.record_bid(PlayerPosition::West, Bid::new(0).unwrap());
        assert_eq!(round.team_bid(Team::A), 9);
        assert_eq!(round.team_bid(Team::B), 0);
    }

    #[test]
    fn repeated_position_is_rejected() {
        let mut seats = Seat::all_ai();
        seats[3].position = PlayerPosition::North;
        assert_eq!(
            RoundState::from_seats(seats, 1, PlayerPosition::North).unwrap_err(),
            InvariantViolation::SeatOrder {
                position: PlayerPosition::North
            }
        );
    }
}
