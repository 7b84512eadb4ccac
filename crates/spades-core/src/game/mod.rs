pub mod config;
pub mod result;
pub mod round;
pub mod state;

pub use config::GameConfig;
pub use result::RoundResult;
pub use round::{PlayOutcome, RoundState};
pub use state::{GameEvent, GameState, Phase, Transition};
