use crate::bot::{BotDifficulty, UnseenTracker};
use crate::policy::{HeuristicPolicy, Policy, PolicyContext};
use spades_core::error::{GameError, InvariantViolation};
use spades_core::game::state::{GameEvent, GameState, Phase, Transition};
use spades_core::model::card::Card;
use spades_core::model::player::{PlayerPosition, Team};
use spades_core::model::trick::Trick;
use std::iter;
use tracing::{Level, event};

/// How an unattended run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(Team),
    RoundLimit,
    AwaitingHuman(PlayerPosition),
}

/// Owns the game and the AI seats. Human actions are forwarded to the state
/// machine; AI actions are checked against the rules before they are applied.
pub struct GameController {
    state: GameState,
    policies: [Option<Box<dyn Policy>>; 4],
}

impl GameController {
    /// Every seat flagged `is_ai` gets a heuristic policy seeded from the
    /// game seed and its position.
    pub fn new(state: GameState, difficulty: BotDifficulty) -> Self {
        Self::with_difficulties(state, [difficulty; 4])
    }

    pub fn with_difficulties(state: GameState, difficulties: [BotDifficulty; 4]) -> Self {
        let seed = state.seed();
        let policies = PlayerPosition::LOOP.map(|seat| {
            if !state.round().seat(seat).is_ai {
                return None;
            }
            let policy_seed = seed.wrapping_add(1 + seat.index() as u64);
            Some(Box::new(HeuristicPolicy::new(difficulties[seat.index()], policy_seed))
                as Box<dyn Policy>)
        });
        Self { state, policies }
    }

    pub fn with_policies(state: GameState, policies: [Option<Box<dyn Policy>>; 4]) -> Self {
        Self { state, policies }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn is_ai(&self, seat: PlayerPosition) -> bool {
        self.policies[seat.index()].is_some()
    }

    /// The AI seat the engine is waiting on, if any.
    pub fn pending_ai(&self) -> Option<PlayerPosition> {
        self.state.current_player().filter(|seat| self.is_ai(*seat))
    }

    pub fn submit_human_bid(&mut self, seat: PlayerPosition, tricks: u8) -> Result<GameEvent, GameError> {
        let transition = self.state.submit_bid(seat, tricks)?;
        Ok(self.apply(transition))
    }

    pub fn play_human_card(&mut self, seat: PlayerPosition, card: Card) -> Result<GameEvent, GameError> {
        let transition = self.state.play_card(seat, card)?;
        Ok(self.apply(transition))
    }

    pub fn start_next_round(&mut self) -> Result<GameEvent, GameError> {
        let transition = self.state.start_next_round()?;
        Ok(self.apply(transition))
    }

    /// Takes one AI action. `Ok(None)` when no AI seat is to act.
    pub fn step_ai(&mut self) -> Result<Option<GameEvent>, GameError> {
        let Some(seat) = self.pending_ai() else {
            return Ok(None);
        };
        let transition = match self.state.phase() {
            Phase::Bidding { .. } => self.ai_bid(seat)?,
            Phase::Playing => self.ai_play(seat)?,
            Phase::RoundTransition { .. } | Phase::GameOver { .. } => return Ok(None),
        };
        Ok(Some(self.apply(transition)))
    }

    /// Runs AI seats until a human must act or the round or game ends.
    pub fn advance_ai(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        while let Some(event) = self.step_ai()? {
            events.push(event);
        }
        Ok(events)
    }

    /// Plays an all-AI game until a team wins or `max_rounds` rounds are scored.
    pub fn run_to_completion(&mut self, max_rounds: u32) -> Result<RunOutcome, GameError> {
        loop {
            self.advance_ai()?;
            match self.state.phase() {
                Phase::GameOver { winner } => return Ok(RunOutcome::Finished(winner)),
                Phase::RoundTransition { .. } => {
                    if self.state.round_number() >= max_rounds {
                        return Ok(RunOutcome::RoundLimit);
                    }
                    self.start_next_round()?;
                }
                Phase::Bidding { next } => return Ok(RunOutcome::AwaitingHuman(next)),
                Phase::Playing => {
                    return Ok(RunOutcome::AwaitingHuman(self.state.round().next_to_play()));
                }
            }
        }
    }

    fn ai_bid(&mut self, seat: PlayerPosition) -> Result<Transition, GameError> {
        let round = self.state.round();
        let tracker = UnseenTracker::observe(round.hand(seat), iter::empty::<&Trick>());
        let ctx = PolicyContext {
            seat,
            hand: round.hand(seat),
            trick: round.current_trick(),
            spades_broken: round.spades_broken(),
            // Bids are blind; the partner's bid is not visible yet.
            team_bid: 0,
            team_tricks: 0,
            tracker: &tracker,
        };
        let Some(policy) = self.policies[seat.index()].as_mut() else {
            return Err(InvariantViolation::NoAiPlay { seat }.into());
        };
        let bid = policy.choose_bid(&ctx);
        self.state.submit_bid(seat, bid.tricks()).map_err(|_| {
            GameError::from(InvariantViolation::IllegalAiBid {
                seat,
                bid: bid.tricks(),
            })
        })
    }

    fn ai_play(&mut self, seat: PlayerPosition) -> Result<Transition, GameError> {
        let round = self.state.round();
        let history = round.trick_history().iter();
        let tracker = UnseenTracker::observe(
            round.hand(seat),
            history.chain(iter::once(round.current_trick())),
        );
        let ctx = PolicyContext {
            seat,
            hand: round.hand(seat),
            trick: round.current_trick(),
            spades_broken: round.spades_broken(),
            team_bid: round.team_bid(seat.team()),
            team_tricks: round.team_tricks(seat.team()),
            tracker: &tracker,
        };
        let Some(policy) = self.policies[seat.index()].as_mut() else {
            return Err(InvariantViolation::NoAiPlay { seat }.into());
        };
        let card = policy
            .choose_play(&ctx)
            .ok_or(InvariantViolation::NoAiPlay { seat })?;
        if !self.state.valid_plays(seat).contains(&card) {
            return Err(InvariantViolation::IllegalAiPlay { seat, card }.into());
        }
        self.state
            .play_card(seat, card)
            .map_err(|_| GameError::from(InvariantViolation::IllegalAiPlay { seat, card }))
    }

    fn apply(&mut self, transition: Transition) -> GameEvent {
        let Transition { state, event } = transition;
        self.state = state;
        log_event(&self.state, event);
        event
    }
}

fn log_event(state: &GameState, game_event: GameEvent) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let scores = state.scores();
    event!(
        target: "spades_bot::controller",
        Level::DEBUG,
        round = state.round_number(),
        phase = state.phase().as_str(),
        kind = ?game_event,
        team_a = scores.score(Team::A),
        team_b = scores.score(Team::B),
    );
}
