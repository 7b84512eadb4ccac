use super::BotDifficulty;

/// Heuristic weights shared by the bid and play planners.
#[derive(Debug, Clone)]
pub struct BotParams {
    pub bid_ace_weight: f32,
    pub bid_king_weight: f32,
    pub bid_queen_weight: f32,
    /// Extra for J/Q/K/A of spades on top of the honour weight.
    pub bid_face_spade_bonus: f32,
    /// Per spade beyond `bid_spade_length_free`.
    pub bid_long_spade_weight: f32,
    pub bid_spade_length_free: usize,
    /// King only counts when guarded by at least this many cards in suit.
    pub bid_king_guard: usize,
    pub bid_floor: u8,
    pub bid_margin_easy: i32,
    pub bid_margin_medium: i32,
    pub bid_margin_hard: i32,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            bid_ace_weight: 1.0,
            bid_king_weight: 0.75,
            bid_queen_weight: 0.4,
            bid_face_spade_bonus: 0.25,
            bid_long_spade_weight: 1.0,
            bid_spade_length_free: 3,
            bid_king_guard: 2,
            bid_floor: 1,
            bid_margin_easy: 2,
            bid_margin_medium: 1,
            bid_margin_hard: 0,
        }
    }
}

impl BotParams {
    /// Largest random deviation from the estimate at `difficulty`.
    pub fn bid_margin(&self, difficulty: BotDifficulty) -> i32 {
        match difficulty {
            BotDifficulty::Easy => self.bid_margin_easy,
            BotDifficulty::Medium => self.bid_margin_medium,
            BotDifficulty::Hard => self.bid_margin_hard,
        }
        .max(0)
    }
}
