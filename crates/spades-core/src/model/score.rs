use crate::model::player::Team;
use serde::Serialize;

pub const POINTS_PER_BID_TRICK: i32 = 10;
pub const BAG_LIMIT: u8 = 10;
pub const BAG_PENALTY: i32 = 100;

/// One team's scoring outcome for a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    /// Contract points only: `10 * bid + overtricks`, or `-10 * bid` when set.
    pub points: i32,
    /// Cumulative bag counter after this round, always below `BAG_LIMIT`.
    pub new_bags: u8,
    /// Number of 100-point penalties triggered this round.
    pub bag_penalties: u8,
}

impl RoundScore {
    pub fn bag_penalty_applied(&self) -> bool {
        self.bag_penalties > 0
    }

    pub fn penalty_points(&self) -> i32 {
        self.bag_penalties as i32 * BAG_PENALTY
    }

    /// Contract points minus any bag penalty.
    pub fn net_points(&self) -> i32 {
        self.points - self.penalty_points()
    }
}

/// Scores a team contract. A set contract leaves the bag counter alone; a made
/// contract adds one bag per overtrick, and every full ten bags costs
/// `BAG_PENALTY` with the remainder carried forward.
pub fn calculate_round_score(bid: u8, tricks_won: u8, prior_bags: u8) -> RoundScore {
    let bid_points = bid as i32 * POINTS_PER_BID_TRICK;
    if tricks_won < bid {
        return RoundScore {
            points: -bid_points,
            new_bags: prior_bags,
            bag_penalties: 0,
        };
    }

    let overtricks = tricks_won - bid;
    let total_bags = prior_bags.saturating_add(overtricks);
    RoundScore {
        points: bid_points + overtricks as i32,
        new_bags: total_bags % BAG_LIMIT,
        bag_penalties: total_bags / BAG_LIMIT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBoard {
    scores: [i32; 2],
    bags: [u8; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            scores: [0; 2],
            bags: [0; 2],
        }
    }

    pub fn score(&self, team: Team) -> i32 {
        self.scores[team.index()]
    }

    pub fn bags(&self, team: Team) -> u8 {
        self.bags[team.index()]
    }

    pub fn standings(&self) -> &[i32; 2] {
        &self.scores
    }

    pub fn set_totals(&mut self, scores: [i32; 2], bags: [u8; 2]) {
        self.scores = scores;
        self.bags = bags;
    }

    /// Scores `team`'s contract against its current bag counter and folds it in.
    pub fn apply_contract(&mut self, team: Team, bid: u8, tricks_won: u8) -> RoundScore {
        let outcome = calculate_round_score(bid, tricks_won, self.bags(team));
        self.scores[team.index()] += outcome.net_points();
        self.bags[team.index()] = outcome.new_bags;
        outcome
    }

    /// The winning team once either side has reached `target`. Higher score
    /// wins; an exact tie goes to team A.
    pub fn winner_at(&self, target: i32) -> Option<Team> {
        let a = self.score(Team::A);
        let b = self.score(Team::B);
        if a < target && b < target {
            return None;
        }
        if a >= b { Some(Team::A) } else { Some(Team::B) }
    }
}
