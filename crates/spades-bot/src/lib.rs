pub mod bot;
pub mod controller;
pub mod policy;

pub use bot::{
    BidPlanner, BotDifficulty, BotParams, GameView, PlayPlanner, UnseenTracker, ai_bid, ai_play,
};
pub use controller::{GameController, RunOutcome};
pub use policy::{HeuristicPolicy, Policy, PolicyContext};
