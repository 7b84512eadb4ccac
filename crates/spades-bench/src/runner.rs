use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use spades_bot::{BotDifficulty, GameController, RunOutcome};
use spades_core::error::GameError;
use spades_core::game::config::GameConfig;
use spades_core::game::state::GameState;
use spades_core::model::player::{PlayerPosition, Team};
use spades_core::model::seat::Seat;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{ResolvedOutputs, SimulationConfig};

/// Plays the configured number of seeded all-AI games.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    difficulties: [BotDifficulty; 4],
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

/// One JSONL line per simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRow {
    pub run_id: String,
    pub game_index: usize,
    pub game_seed: u64,
    pub seats: Vec<String>,
    pub winner: Option<Team>,
    pub finished: bool,
    pub rounds: u32,
    pub final_scores: [i32; 2],
    pub final_bags: [u8; 2],
    pub bag_penalties: [u32; 2],
    pub contracts_made: [u32; 2],
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }
        let difficulties = config.difficulties();
        Ok(Self {
            config,
            outputs,
            difficulties,
        })
    }

    /// Execute every game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut analytics = AnalyticsCollector::new(&self.config.run_id, self.team_labels());
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            let row = self.play_game(game_index, game_seed)?;
            analytics.record_game(&row);
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }
        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn seats(&self) -> [Seat; 4] {
        PlayerPosition::LOOP.map(|position| {
            Seat::new(position, self.config.seats[position.index()].name.clone(), true)
        })
    }

    fn team_labels(&self) -> [String; 2] {
        Team::BOTH.map(|team| {
            let [a, b] = team.members();
            format!(
                "{team} ({} + {})",
                self.config.seats[a.index()].name,
                self.config.seats[b.index()].name
            )
        })
    }

    fn play_game(&self, game_index: usize, game_seed: u64) -> Result<GameRow, RunnerError> {
        let state = GameState::with_seed(
            self.seats(),
            GameConfig::with_target(self.config.games.target_score),
            game_seed,
        )?;
        let mut controller = GameController::with_difficulties(state, self.difficulties);
        let outcome = controller.run_to_completion(self.config.games.max_rounds)?;
        if let RunOutcome::AwaitingHuman(seat) = outcome {
            return Err(RunnerError::Stalled { game_index, seat });
        }

        let state = controller.state();
        let history = state.round_history();
        let mut bag_penalties = [0u32; 2];
        let mut contracts_made = [0u32; 2];
        for result in history {
            for team in Team::BOTH {
                bag_penalties[team.index()] += result.outcome(team).bag_penalties as u32;
                contracts_made[team.index()] += result.made_contract(team) as u32;
            }
        }

        let row = GameRow {
            run_id: self.config.run_id.clone(),
            game_index,
            game_seed,
            seats: self
                .config
                .seats
                .iter()
                .zip(self.difficulties)
                .map(|(seat, difficulty)| format!("{}:{difficulty}", seat.name))
                .collect(),
            winner: state.winner(),
            finished: state.is_over(),
            rounds: history.len() as u32,
            final_scores: *state.scores().standings(),
            final_bags: Team::BOTH.map(|team| state.scores().bags(team)),
            bag_penalties,
            contracts_made,
        };

        if tracing::enabled!(Level::INFO) {
            event!(
                target: "spades_bench::runner",
                Level::INFO,
                game_index,
                game_seed,
                rounds = row.rounds,
                winner = ?row.winner,
                team_a = row.final_scores[0],
                team_b = row.final_scores[1],
            );
        }
        Ok(row)
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize game row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
    #[error("game {game_index} stopped waiting for a human at {seat}")]
    Stalled {
        game_index: usize,
        seat: PlayerPosition,
    },
    #[error("configuration requires exactly 4 seats but found {found}")]
    SeatCount { found: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
