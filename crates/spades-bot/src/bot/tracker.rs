use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::player::PlayerPosition;
use spades_core::model::rank::Rank;
use spades_core::model::suit::Suit;
use spades_core::model::trick::Trick;

/// Cards one seat has not seen yet (neither in its hand nor played), plus the
/// voids other seats have shown by failing to follow suit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnseenTracker {
    unseen: [[bool; 13]; 4],
    voids: [[bool; 4]; 4],
}

impl Default for UnseenTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl UnseenTracker {
    pub fn new() -> Self {
        Self {
            unseen: [[true; 13]; 4],
            voids: [[false; 4]; 4],
        }
    }

    /// Builds the view from `hand` and every trick played so far this round,
    /// the current partial trick included.
    pub fn observe<'a, I>(hand: &Hand, tricks: I) -> Self
    where
        I: IntoIterator<Item = &'a Trick>,
    {
        let mut tracker = Self::new();
        for card in hand.iter() {
            tracker.mark_seen(*card);
        }
        for trick in tricks {
            tracker.note_trick(trick);
        }
        tracker
    }

    pub fn note_trick(&mut self, trick: &Trick) {
        let lead = trick.lead_suit();
        for play in trick.plays() {
            self.note_play(play.position, play.card, lead);
        }
    }

    pub fn note_play(&mut self, seat: PlayerPosition, card: Card, lead: Option<Suit>) {
        self.mark_seen(card);
        if let Some(lead) = lead {
            if card.suit != lead {
                self.voids[seat.index()][lead.index()] = true;
            }
        }
    }

    fn mark_seen(&mut self, card: Card) {
        self.unseen[card.suit.index()][rank_slot(card.rank)] = false;
    }

    pub fn is_unseen(&self, card: Card) -> bool {
        self.unseen[card.suit.index()][rank_slot(card.rank)]
    }

    pub fn unseen_count(&self) -> usize {
        self.unseen.iter().flatten().filter(|flag| **flag).count()
    }

    pub fn unseen_in_suit(&self, suit: Suit) -> usize {
        self.unseen[suit.index()].iter().filter(|flag| **flag).count()
    }

    /// True when no unseen card of the same suit outranks `card`.
    pub fn is_master(&self, card: Card) -> bool {
        let suit = &self.unseen[card.suit.index()];
        suit[rank_slot(card.rank) + 1..].iter().all(|flag| !flag)
    }

    pub fn is_void(&self, seat: PlayerPosition, suit: Suit) -> bool {
        self.voids[seat.index()][suit.index()]
    }

    /// Whether either opponent of `seat` has shown out of `suit`.
    pub fn opponents_void(&self, seat: PlayerPosition, suit: Suit) -> bool {
        [seat.next(), seat.previous()]
            .into_iter()
            .any(|other| self.is_void(other, suit))
    }
}

fn rank_slot(rank: Rank) -> usize {
    (rank.value() - Rank::Two.value()) as usize
}
