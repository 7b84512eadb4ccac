use super::{BotDifficulty, BotParams, GameView, discard_key};
use rand::Rng;
use rand::seq::SliceRandom;
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::rank::Rank;
use spades_core::model::suit::Suit;
use spades_core::model::trick::{Play, Trick};
use spades_core::rules::valid_plays;

pub struct PlayPlanner;

impl PlayPlanner {
    /// Picks one of `valid_plays(hand, trick, view.spades_broken)`. Single
    /// pass over the legal cards per branch.
    pub fn choose<R: Rng + ?Sized>(
        hand: &Hand,
        trick: &Trick,
        view: &GameView<'_>,
        difficulty: BotDifficulty,
        _params: &BotParams,
        rng: &mut R,
    ) -> Option<Card> {
        let legal = valid_plays(hand, trick, view.spades_broken);
        if legal.len() <= 1 {
            return legal.first().copied();
        }
        if difficulty == BotDifficulty::Easy {
            return legal.choose(rng).copied();
        }

        let hard = difficulty == BotDifficulty::Hard;
        match (trick.lead_suit(), trick.current_winning_play()) {
            (Some(lead), Some(winning)) => Some(follow(&legal, trick, lead, winning, view, hard)),
            _ => Some(lead_card(&legal, hand, view, hard)),
        }
    }
}

fn lead_card(legal: &[Card], hand: &Hand, view: &GameView<'_>, hard: bool) -> Card {
    let side_suits: Vec<Card> = legal.iter().copied().filter(|c| !c.is_trump()).collect();

    if side_suits.is_empty() {
        // Only spades left to lead.
        if hard {
            if let Some(master) = lowest(legal.iter().copied().filter(|c| view.tracker.is_master(*c))) {
                return master;
            }
        }
        return lowest(legal.iter().copied()).unwrap_or(legal[0]);
    }

    if hard {
        let safe_master = side_suits.iter().copied().filter(|c| {
            view.tracker.is_master(*c) && !view.tracker.opponents_void(view.seat, c.suit)
        });
        if let Some(card) = lowest(safe_master) {
            return card;
        }
    }

    // Cash a side-suit ace before it can be trumped.
    if let Some(ace) = side_suits
        .iter()
        .copied()
        .filter(|c| c.rank == Rank::Ace)
        .max_by_key(|c| hand.count_suit(c.suit))
    {
        if !hard || !view.tracker.opponents_void(view.seat, ace.suit) {
            return ace;
        }
    }

    let suit = longest_suit(&side_suits, hand, view, hard);
    lowest(side_suits.iter().copied().filter(|c| c.suit == suit)).unwrap_or(side_suits[0])
}

/// Longest side suit; hard seats skip suits an opponent is known to trump.
fn longest_suit(side_suits: &[Card], hand: &Hand, view: &GameView<'_>, hard: bool) -> Suit {
    let mut best: Option<(Suit, usize)> = None;
    let mut fallback = side_suits[0].suit;
    let mut fallback_len = 0;
    for suit in Suit::ALL.into_iter().filter(|s| !s.is_trump()) {
        if !side_suits.iter().any(|c| c.suit == suit) {
            continue;
        }
        let len = hand.count_suit(suit);
        if len > fallback_len {
            fallback = suit;
            fallback_len = len;
        }
        if hard && view.tracker.opponents_void(view.seat, suit) {
            continue;
        }
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((suit, len));
        }
    }
    best.map(|(suit, _)| suit).unwrap_or(fallback)
}

fn follow(
    legal: &[Card],
    trick: &Trick,
    lead: Suit,
    winning: Play,
    view: &GameView<'_>,
    hard: bool,
) -> Card {
    let last_to_play = trick.plays().len() == 3;

    if winning.position == view.seat.partner() {
        let partner_safe = last_to_play || !hard || view.tracker.is_master(winning.card);
        if partner_safe || !view.team_needs_tricks() {
            return sluff(legal, winning.card, lead);
        }
    }

    let winners = legal.iter().copied().filter(|c| c.beats(winning.card, lead));
    let cheapest_winner = lowest(winners);
    let following = legal.iter().any(|c| c.suit == lead);

    if following {
        if let Some(card) = cheapest_winner {
            // Second seat ducks unless it holds the boss card.
            let second_seat = trick.plays().len() == 1;
            if hard && second_seat && !view.tracker.is_master(card) && !card.is_trump() {
                return lowest(legal.iter().copied()).unwrap_or(card);
            }
            return card;
        }
        return lowest(legal.iter().copied()).unwrap_or(legal[0]);
    }

    if let Some(card) = cheapest_winner {
        if card.is_trump() && view.team_needs_tricks() {
            return card;
        }
    }
    sluff(legal, winning.card, lead)
}

/// Lowest card that does not overtake `winning`, else the lowest overall.
fn sluff(legal: &[Card], winning: Card, lead: Suit) -> Card {
    lowest(legal.iter().copied().filter(|c| !c.beats(winning, lead)))
        .or_else(|| lowest(legal.iter().copied()))
        .unwrap_or(legal[0])
}

fn lowest(cards: impl Iterator<Item = Card>) -> Option<Card> {
    cards.min_by_key(|card| discard_key(*card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::UnseenTracker;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use spades_core::model::player::PlayerPosition;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn trick(leader: PlayerPosition, cards: &[Card]) -> Trick {
        let mut trick = Trick::new(leader);
        for (seat, card) in leader.rotation().into_iter().zip(cards) {
            trick.play(seat, *card).unwrap();
        }
        trick
    }

    fn choose(
        cards: Vec<Card>,
        trick: &Trick,
        team: (u8, u8),
        difficulty: BotDifficulty,
    ) -> Card {
        let hand = Hand::with_cards(cards);
        let tracker = UnseenTracker::observe(&hand, [trick]);
        let view = GameView {
            seat: trick.expected_position(),
            spades_broken: false,
            team_bid: team.0,
            team_tricks: team.1,
            tracker: &tracker,
        };
        let mut rng = StdRng::seed_from_u64(0);
        PlayPlanner::choose(&hand, trick, &view, difficulty, &BotParams::default(), &mut rng)
            .unwrap()
    }

    #[test]
    fn leads_lowest_of_longest_side_suit_without_exposing_trump() {
        let cards = vec![
            card(Rank::Ace, Suit::Spades),
            card(Rank::King, Suit::Spades),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Jack, Suit::Clubs),
        ];
        let led = choose(cards, &Trick::new(PlayerPosition::South), (4, 0), BotDifficulty::Medium);
        assert_eq!(led, card(Rank::Four, Suit::Hearts));
    }

    #[test]
    fn cashes_side_ace_when_leading() {
        let cards = vec![
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Seven, Suit::Hearts),
        ];
        let led = choose(cards, &Trick::new(PlayerPosition::South), (4, 0), BotDifficulty::Medium);
        assert_eq!(led, card(Rank::Ace, Suit::Diamonds));
    }

    #[test]
    fn hard_leads_a_master_king_once_the_ace_is_gone() {
        let cards = vec![
            card(Rank::King, Suit::Clubs),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Seven, Suit::Hearts),
        ];
        let hand = Hand::with_cards(cards);
        let mut tracker = UnseenTracker::observe(&hand, &[] as &[Trick]);
        tracker.note_play(PlayerPosition::East, card(Rank::Ace, Suit::Clubs), None);
        let view = GameView {
            seat: PlayerPosition::South,
            spades_broken: false,
            team_bid: 4,
            team_tricks: 0,
            tracker: &tracker,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let led = PlayPlanner::choose(
            &hand,
            &Trick::new(PlayerPosition::South),
            &view,
            BotDifficulty::Hard,
            &BotParams::default(),
            &mut rng,
        );
        assert_eq!(led, Some(card(Rank::King, Suit::Clubs)));
    }

    #[test]
    fn partner_winning_means_play_low() {
        // North (partner of South) is winning with the king.
        let t = trick(
            PlayerPosition::North,
            &[card(Rank::King, Suit::Hearts), card(Rank::Three, Suit::Hearts)],
        );
        let played = choose(
            vec![card(Rank::Ace, Suit::Hearts), card(Rank::Five, Suit::Hearts)],
            &t,
            (4, 0),
            BotDifficulty::Medium,
        );
        assert_eq!(played, card(Rank::Five, Suit::Hearts));
    }

    #[test]
    fn partner_winning_void_seat_does_not_trump_over() {
        let t = trick(
            PlayerPosition::North,
            &[card(Rank::King, Suit::Hearts), card(Rank::Three, Suit::Hearts)],
        );
        let played = choose(
            vec![card(Rank::Two, Suit::Spades), card(Rank::Nine, Suit::Clubs)],
            &t,
            (4, 0),
            BotDifficulty::Medium,
        );
        assert_eq!(played, card(Rank::Nine, Suit::Clubs));
    }

    #[test]
    fn takes_with_the_minimum_winning_card() {
        let t = trick(PlayerPosition::East, &[card(Rank::Ten, Suit::Diamonds)]);
        let played = choose(
            vec![
                card(Rank::Ace, Suit::Diamonds),
                card(Rank::Queen, Suit::Diamonds),
                card(Rank::Four, Suit::Diamonds),
            ],
            &t,
            (3, 0),
            BotDifficulty::Medium,
        );
        assert_eq!(played, card(Rank::Queen, Suit::Diamonds));
    }

    #[test]
    fn cannot_win_so_discards_lowest() {
        let t = trick(PlayerPosition::East, &[card(Rank::Ace, Suit::Diamonds)]);
        let played = choose(
            vec![card(Rank::Jack, Suit::Diamonds), card(Rank::Four, Suit::Diamonds)],
            &t,
            (3, 0),
            BotDifficulty::Medium,
        );
        assert_eq!(played, card(Rank::Four, Suit::Diamonds));
    }

    #[test]
    fn trumps_only_while_the_team_needs_tricks() {
        let t = trick(PlayerPosition::East, &[card(Rank::Ace, Suit::Diamonds)]);
        let hand = vec![
            card(Rank::Nine, Suit::Spades),
            card(Rank::Three, Suit::Spades),
            card(Rank::Six, Suit::Clubs),
        ];
        assert_eq!(
            choose(hand.clone(), &t, (5, 2), BotDifficulty::Medium),
            card(Rank::Three, Suit::Spades)
        );
        assert_eq!(
            choose(hand, &t, (5, 5), BotDifficulty::Medium),
            card(Rank::Six, Suit::Clubs)
        );
    }

    #[test]
    fn overtrumps_with_the_smallest_higher_spade() {
        let t = trick(
            PlayerPosition::North,
            &[card(Rank::Ace, Suit::Diamonds), card(Rank::Five, Suit::Spades)],
        );
        let played = choose(
            vec![
                card(Rank::Three, Suit::Spades),
                card(Rank::Eight, Suit::Spades),
                card(Rank::King, Suit::Spades),
            ],
            &t,
            (5, 0),
            BotDifficulty::Medium,
        );
        assert_eq!(played, card(Rank::Eight, Suit::Spades));
    }

    #[test]
    fn easy_picks_some_legal_card() {
        let t = trick(PlayerPosition::East, &[card(Rank::Ten, Suit::Clubs)]);
        let cards = vec![
            card(Rank::Two, Suit::Clubs),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Ace, Suit::Hearts),
        ];
        let played = choose(cards, &t, (3, 0), BotDifficulty::Easy);
        assert_eq!(played.suit, Suit::Clubs);
    }

    #[test]
    fn empty_hand_yields_nothing() {
        let tracker = UnseenTracker::new();
        let view = GameView {
            seat: PlayerPosition::North,
            spades_broken: true,
            team_bid: 0,
            team_tricks: 0,
            tracker: &tracker,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let choice = PlayPlanner::choose(
            &Hand::new(),
            &Trick::new(PlayerPosition::North),
            &view,
            BotDifficulty::Hard,
            &BotParams::default(),
            &mut rng,
        );
        assert_eq!(choice, None);
    }
}
