use crate::error::{BidError, GameError, InvariantViolation, PlayError};
use crate::game::config::GameConfig;
use crate::game::result::RoundResult;
use crate::game::round::{PlayOutcome, RoundState};
use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::player::{PlayerPosition, Team};
use crate::model::score::ScoreBoard;
use crate::model::seat::Seat;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bidding { next: PlayerPosition },
    Playing,
    /// Round scored, next deal pending. `next_leader` won the final trick.
    RoundTransition { next_leader: PlayerPosition },
    GameOver { winner: Team },
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Bidding { .. } => "bidding",
            Phase::Playing => "playing",
            Phase::RoundTransition { .. } => "round-transition",
            Phase::GameOver { .. } => "game-over",
        }
    }
}

/// Result of a successful action: the replacement state plus what happened.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub event: GameEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BidPlaced { seat: PlayerPosition, bid: Bid },
    BiddingClosed,
    CardPlayed { seat: PlayerPosition, card: Card },
    TrickWon { winner: PlayerPosition },
    RoundScored { round: u32 },
    RoundDealt { round: u32, leader: PlayerPosition },
    GameWon { winner: Team },
}

/// The single owned game. Every action borrows the current state and returns
/// a replacement; a rejected action leaves the caller's copy as it was.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    round: RoundState,
    scores: ScoreBoard,
    history: Vec<RoundResult>,
    phase: Phase,
    rng: StdRng,
    seed: u64,
}

impl GameState {
    /// Starts a game whose every deal derives from `seed`. Seats may arrive in
    /// any order but each position must appear exactly once.
    pub fn with_seed(seats: [Seat; 4], config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let leader = config.first_bidder;
        let round = RoundState::deal(&seats, 1, leader, &mut rng)?;
        Ok(Self {
            config,
            round,
            scores: ScoreBoard::new(),
            history: Vec::new(),
            phase: Phase::Bidding { next: leader },
            rng,
            seed,
        })
    }

    /// Resumes from an arbitrary round, e.g. a constructed position in tests.
    pub fn from_round(round: RoundState, config: GameConfig, scores: ScoreBoard, seed: u64) -> Self {
        let phase = if round.all_bids_in() {
            Phase::Playing
        } else {
            let next = round
                .bidding_leader()
                .rotation()
                .into_iter()
                .find(|seat| round.bid(*seat).is_none())
                .unwrap_or(round.bidding_leader());
            Phase::Bidding { next }
        };
        Self {
            config,
            round,
            scores,
            history: Vec::new(),
            phase,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_number(&self) -> u32 {
        self.round.round_number()
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn round_history(&self) -> &[RoundResult] {
        &self.history
    }

    pub fn spades_broken(&self) -> bool {
        self.round.spades_broken()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Team> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Seat whose bid or card the engine is waiting on.
    pub fn current_player(&self) -> Option<PlayerPosition> {
        match self.phase {
            Phase::Bidding { next } => Some(next),
            Phase::Playing => Some(self.round.next_to_play()),
            Phase::RoundTransition { .. } | Phase::GameOver { .. } => None,
        }
    }

    /// Legal cards for `seat` right now; empty outside the playing phase.
    pub fn valid_plays(&self, seat: PlayerPosition) -> Vec<Card> {
        match self.phase {
            Phase::Playing => self.round.valid_plays(seat),
            _ => Vec::new(),
        }
    }

    pub fn submit_bid(&self, seat: PlayerPosition, tricks: u8) -> Result<Transition, GameError> {
        let Phase::Bidding { next } = self.phase else {
            return Err(self.phase_error(BidError::NotInBiddingPhase.into()));
        };
        if next != seat {
            return Err(BidError::OutOfTurn {
                expected: next,
                actual: seat,
            }
            .into());
        }
        let bid = Bid::new(tricks)?;

        let mut state = self.clone();
        state.round.record_bid(seat, bid);
        if state.round.all_bids_in() {
            state.phase = Phase::Playing;
        } else {
            state.phase = Phase::Bidding { next: seat.next() };
        }
        let event = if matches!(state.phase, Phase::Playing) {
            GameEvent::BiddingClosed
        } else {
            GameEvent::BidPlaced { seat, bid }
        };
        Ok(Transition { state, event })
    }

    pub fn play_card(&self, seat: PlayerPosition, card: Card) -> Result<Transition, GameError> {
        if !matches!(self.phase, Phase::Playing) {
            return Err(self.phase_error(PlayError::NotInPlayPhase.into()));
        }

        let mut state = self.clone();
        let outcome = state.round.play_card(seat, card)?;
        let event = match outcome {
            PlayOutcome::Played => GameEvent::CardPlayed { seat, card },
            PlayOutcome::TrickCompleted { winner } => GameEvent::TrickWon { winner },
            PlayOutcome::RoundCompleted { .. } => state.close_round()?,
        };
        Ok(Transition { state, event })
    }

    /// Deals the next round; bidding opens with the final trick's winner.
    pub fn start_next_round(&self) -> Result<Transition, GameError> {
        let Phase::RoundTransition { next_leader } = self.phase else {
            return Err(self.phase_error(GameError::NotInRoundTransition));
        };

        let mut state = self.clone();
        let round_number = state.round.round_number() + 1;
        let seats = state.round.seats().clone();
        state.round = RoundState::deal(&seats, round_number, next_leader, &mut state.rng)?;
        state.phase = Phase::Bidding { next: next_leader };
        Ok(Transition {
            state,
            event: GameEvent::RoundDealt {
                round: round_number,
                leader: next_leader,
            },
        })
    }

    fn close_round(&mut self) -> Result<GameEvent, GameError> {
        self.round.verify_trick_total()?;
        self.round.verify_card_accounting()?;
        let last_winner = self.round.final_trick_winner()?;
        for seat in PlayerPosition::LOOP {
            if self.round.bid(seat).is_none() {
                return Err(InvariantViolation::MissingBid { seat }.into());
            }
        }

        let team_bids = Team::BOTH.map(|team| self.round.team_bid(team));
        let team_tricks = Team::BOTH.map(|team| self.round.team_tricks(team));
        let outcomes = Team::BOTH.map(|team| {
            self.scores
                .apply_contract(team, team_bids[team.index()], team_tricks[team.index()])
        });
        let round = self.round.round_number();
        self.history.push(RoundResult {
            round,
            team_bids,
            team_tricks,
            outcomes,
            scores_after: *self.scores.standings(),
            bags_after: Team::BOTH.map(|team| self.scores.bags(team)),
        });

        match self.scores.winner_at(self.config.target_score) {
            Some(winner) => {
                self.phase = Phase::GameOver { winner };
                Ok(GameEvent::GameWon { winner })
            }
            None => {
                self.phase = Phase::RoundTransition {
                    next_leader: last_winner,
                };
                Ok(GameEvent::RoundScored { round })
            }
        }
    }

    fn phase_error(&self, fallback: GameError) -> GameError {
        if self.is_over() {
            GameError::GameOver
        } else {
            fallback
        }
    }
}
