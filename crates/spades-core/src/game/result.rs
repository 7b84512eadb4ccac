use crate::model::player::Team;
use crate::model::score::RoundScore;
use serde::Serialize;

/// Sealed record of one scored round. Indexed by `Team::index()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub round: u32,
    pub team_bids: [u8; 2],
    pub team_tricks: [u8; 2],
    pub outcomes: [RoundScore; 2],
    pub scores_after: [i32; 2],
    pub bags_after: [u8; 2],
}

impl RoundResult {
    pub fn bid(&self, team: Team) -> u8 {
        self.team_bids[team.index()]
    }

    pub fn tricks(&self, team: Team) -> u8 {
        self.team_tricks[team.index()]
    }

    pub fn outcome(&self, team: Team) -> RoundScore {
        self.outcomes[team.index()]
    }

    pub fn made_contract(&self, team: Team) -> bool {
        self.tricks(team) >= self.bid(team)
    }
}
