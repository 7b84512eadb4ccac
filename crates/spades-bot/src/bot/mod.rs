mod bid;
mod params;
mod play;
mod tracker;

pub use bid::BidPlanner;
pub use params::BotParams;
pub use play::PlayPlanner;
pub use tracker::UnseenTracker;

use rand::Rng;
use spades_core::model::bid::Bid;
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::player::PlayerPosition;
use spades_core::model::trick::Trick;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BotDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl BotDifficulty {
    pub const ALL: [BotDifficulty; 3] = [
        BotDifficulty::Easy,
        BotDifficulty::Medium,
        BotDifficulty::Hard,
    ];

    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| {
            Self::from_reader(|key| std::env::var(key).ok()).unwrap_or_default()
        })
    }

    fn from_reader<F>(mut read: F) -> Option<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        read("SPADES_BOT_DIFFICULTY").and_then(|raw| raw.parse().ok())
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Medium => "medium",
            BotDifficulty::Hard => "hard",
        }
    }
}

impl FromStr for BotDifficulty {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "medium" | "normal" | "default" => Ok(BotDifficulty::Medium),
            "hard" => Ok(BotDifficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

impl std::fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an AI seat may know when choosing a card: its own seat, the table
/// state everyone can see, and the cards it has not yet seen.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub seat: PlayerPosition,
    pub spades_broken: bool,
    pub team_bid: u8,
    pub team_tricks: u8,
    pub tracker: &'a UnseenTracker,
}

impl GameView<'_> {
    pub fn team_needs_tricks(&self) -> bool {
        self.team_tricks < self.team_bid
    }
}

/// Bid for a 13-card hand at the given difficulty.
pub fn ai_bid<R: Rng + ?Sized>(hand: &Hand, difficulty: BotDifficulty, rng: &mut R) -> Bid {
    BidPlanner::choose(hand, difficulty, &BotParams::default(), rng)
}

/// A legal card for `view.seat` to add to `trick`. `None` only for an empty
/// hand.
pub fn ai_play<R: Rng + ?Sized>(
    hand: &Hand,
    trick: &Trick,
    view: &GameView<'_>,
    difficulty: BotDifficulty,
    rng: &mut R,
) -> Option<Card> {
    PlayPlanner::choose(hand, trick, view, difficulty, &BotParams::default(), rng)
}

/// Discard ordering: non-trump before trump, then rank, then suit.
pub(crate) fn discard_key(card: Card) -> (bool, u8, usize) {
    (card.is_trump(), card.rank.value(), card.suit.index())
}
