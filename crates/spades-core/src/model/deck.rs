use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Round-robin split into four 13-card hands indexed by seat.
    pub fn split(&self) -> [Hand; 4] {
        let mut hands: [Vec<Card>; 4] = Default::default();
        for (index, card) in self.cards.iter().enumerate() {
            hands[index % 4].push(*card);
        }
        hands.map(Hand::with_cards)
    }
}

/// Returns the seats with fresh 13-card hands from a newly shuffled deck.
/// Identity fields are kept; bids and trick counts are cleared.
pub fn deal_cards<R: rand::Rng + ?Sized>(seats: &[Seat; 4], rng: &mut R) -> [Seat; 4] {
    let mut hands = Deck::shuffled(rng).split().into_iter();
    let mut dealt = seats.clone();
    for seat in dealt.iter_mut() {
        seat.hand = hands.next().unwrap_or_default();
        seat.bid = None;
        seat.tricks_won = 0;
    }
    dealt
}
