pub mod legality;
pub mod trick_winner;

pub use legality::{check_play, valid_plays};
pub use trick_winner::determine_trick_winner;
