use super::{Policy, PolicyContext};
use crate::bot::{BidPlanner, BotDifficulty, BotParams, GameView, PlayPlanner};
use rand::SeedableRng;
use rand::rngs::StdRng;
use spades_core::model::bid::Bid;
use spades_core::model::card::Card;
use spades_core::model::suit::Suit;
use tracing::{Level, event};

/// Wraps the bid and play planners with a per-seat seeded generator.
pub struct HeuristicPolicy {
    difficulty: BotDifficulty,
    params: BotParams,
    rng: StdRng,
}

impl HeuristicPolicy {
    pub fn new(difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            difficulty,
            params: BotParams::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_params(mut self, params: BotParams) -> Self {
        self.params = params;
        self
    }

    pub fn easy(seed: u64) -> Self {
        Self::new(BotDifficulty::Easy, seed)
    }

    pub fn medium(seed: u64) -> Self {
        Self::new(BotDifficulty::Medium, seed)
    }

    pub fn hard(seed: u64) -> Self {
        Self::new(BotDifficulty::Hard, seed)
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }
}

impl Policy for HeuristicPolicy {
    fn choose_bid(&mut self, ctx: &PolicyContext) -> Bid {
        let bid = BidPlanner::choose(ctx.hand, self.difficulty, &self.params, &mut self.rng);
        if tracing::enabled!(Level::INFO) {
            event!(
                target: "spades_bot::bid",
                Level::INFO,
                seat = %ctx.seat,
                difficulty = %self.difficulty,
                hand_size = ctx.hand.len(),
                spades = ctx.hand.count_suit(Suit::Spades),
                bid = bid.tricks(),
            );
        }
        bid
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let view = GameView {
            seat: ctx.seat,
            spades_broken: ctx.spades_broken,
            team_bid: ctx.team_bid,
            team_tricks: ctx.team_tricks,
            tracker: ctx.tracker,
        };
        let chosen = PlayPlanner::choose(
            ctx.hand,
            ctx.trick,
            &view,
            self.difficulty,
            &self.params,
            &mut self.rng,
        );
        if let Some(card) = chosen {
            log_play_decision(ctx, self.difficulty, card);
        }
        chosen
    }
}

fn log_play_decision(ctx: &PolicyContext, difficulty: BotDifficulty, chosen: Card) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let trick = ctx
        .trick
        .plays()
        .iter()
        .map(|play| play.card.to_string())
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "spades_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        difficulty = %difficulty,
        chosen = %chosen,
        trick = %trick,
        spades_broken = ctx.spades_broken,
        team_bid = ctx.team_bid,
        team_tricks = ctx.team_tricks,
        unseen = ctx.tracker.unseen_count(),
    );
}
