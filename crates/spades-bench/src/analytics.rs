use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::runner::GameRow;

const CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("no games were recorded")]
    Empty,
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-game rows into per-team and per-run statistics.
pub struct AnalyticsCollector {
    run_id: String,
    team_labels: [String; 2],
    final_scores: [Vec<f64>; 2],
    wins: [u32; 2],
    bag_penalties: [u32; 2],
    contracts_made: [u32; 2],
    rounds: Vec<f64>,
    unfinished: u32,
}

impl AnalyticsCollector {
    pub fn new(run_id: impl Into<String>, team_labels: [String; 2]) -> Self {
        Self {
            run_id: run_id.into(),
            team_labels,
            final_scores: [Vec::new(), Vec::new()],
            wins: [0; 2],
            bag_penalties: [0; 2],
            contracts_made: [0; 2],
            rounds: Vec::new(),
            unfinished: 0,
        }
    }

    pub fn record_game(&mut self, row: &GameRow) {
        for team in 0..2 {
            self.final_scores[team].push(row.final_scores[team] as f64);
            self.bag_penalties[team] += row.bag_penalties[team];
            self.contracts_made[team] += row.contracts_made[team];
        }
        match row.winner {
            Some(team) => self.wins[team.index()] += 1,
            None => self.unfinished += 1,
        }
        self.rounds.push(row.rounds as f64);
    }

    pub fn finalize(self) -> Result<SimulationSummary, AnalyticsError> {
        let games = self.rounds.len();
        if games == 0 {
            return Err(AnalyticsError::Empty);
        }
        let total_rounds: f64 = self.rounds.iter().sum();

        let mut teams = Vec::with_capacity(2);
        for (index, label) in self.team_labels.into_iter().enumerate() {
            let scores = &self.final_scores[index];
            teams.push(TeamReport {
                label,
                wins: self.wins[index],
                win_rate: self.wins[index] as f64 / games as f64,
                mean_score: scores.iter().mean(),
                score_ci95: confidence_interval(scores),
                bag_penalties: self.bag_penalties[index],
                contract_rate: if total_rounds > 0.0 {
                    self.contracts_made[index] as f64 / total_rounds
                } else {
                    0.0
                },
            });
        }

        Ok(SimulationSummary {
            run_id: self.run_id,
            games,
            unfinished: self.unfinished,
            mean_rounds: self.rounds.iter().mean(),
            std_dev_rounds: sample_std_dev(&self.rounds),
            teams,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationSummary {
    pub run_id: String,
    pub games: usize,
    pub unfinished: u32,
    pub mean_rounds: f64,
    pub std_dev_rounds: f64,
    pub teams: Vec<TeamReport>,
}

#[derive(Debug, Serialize)]
pub struct TeamReport {
    pub label: String,
    pub wins: u32,
    pub win_rate: f64,
    pub mean_score: f64,
    pub score_ci95: (f64, f64),
    pub bag_penalties: u32,
    pub contract_rate: f64,
}

impl SimulationSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str(&format!("# Simulation Summary: {}\n\n", self.run_id));
        rows.push_str(&format!(
            "Games: {} ({} hit the round limit)\n\n",
            self.games, self.unfinished
        ));
        rows.push_str(&format!(
            "Rounds per game: mean {:.2}, std dev {:.2}\n\n",
            self.mean_rounds, self.std_dev_rounds
        ));
        rows.push_str("| Team | Wins | Win % | Mean final score | 95% CI | Contracts made % | Bag penalties |\n");
        rows.push_str("|------|------|-------|------------------|--------|------------------|---------------|\n");

        for team in &self.teams {
            rows.push_str(&format!(
                "| {label} | {wins} | {win:.1}% | {mean:.1} | [{lo:.1}, {hi:.1}] | {made:.1}% | {bags} |\n",
                label = team.label,
                wins = team.wins,
                win = team.win_rate * 100.0,
                mean = team.mean_score,
                lo = team.score_ci95.0,
                hi = team.score_ci95.1,
                made = team.contract_rate * 100.0,
                bags = team.bag_penalties,
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

/// Sample standard deviation; zero for fewer than two points.
fn sample_std_dev(points: &[f64]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points.iter().std_dev()
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().mean();
    if points.len() == 1 {
        return (mean, mean);
    }
    let z = Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(0.5 + CONFIDENCE_LEVEL / 2.0))
        .unwrap_or(1.96);
    let std_error = sample_std_dev(points) / (points.len() as f64).sqrt();
    let margin = z * std_error;
    (mean - margin, mean + margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spades_core::model::player::Team;
    use tempfile::tempdir;

    fn row(winner: Option<Team>, scores: [i32; 2], rounds: u32) -> GameRow {
        GameRow {
            run_id: "t".to_string(),
            game_index: 0,
            game_seed: 1,
            seats: Vec::new(),
            winner,
            finished: winner.is_some(),
            rounds,
            final_scores: scores,
            final_bags: [0, 0],
            bag_penalties: [1, 0],
            contracts_made: [rounds, 0],
        }
    }

    fn labels() -> [String; 2] {
        ["A".to_string(), "B".to_string()]
    }

    #[test]
    fn summarises_wins_and_rounds() {
        let mut collector = AnalyticsCollector::new("t", labels());
        collector.record_game(&row(Some(Team::A), [510, 300], 10));
        collector.record_game(&row(Some(Team::B), [420, 505], 12));
        collector.record_game(&row(None, [100, 90], 14));

        let summary = collector.finalize().unwrap();
        assert_eq!(summary.games, 3);
        assert_eq!(summary.unfinished, 1);
        assert!((summary.mean_rounds - 12.0).abs() < 1e-9);
        assert!((summary.std_dev_rounds - 2.0).abs() < 1e-9);
        assert_eq!(summary.teams[0].wins, 1);
        assert_eq!(summary.teams[1].wins, 1);
        assert_eq!(summary.teams[0].bag_penalties, 3);
        assert!((summary.teams[0].contract_rate - 1.0).abs() < 1e-9);
        let (lo, hi) = summary.teams[0].score_ci95;
        assert!(lo < summary.teams[0].mean_score && summary.teams[0].mean_score < hi);
    }

    #[test]
    fn empty_collector_is_an_error() {
        let collector = AnalyticsCollector::new("t", labels());
        assert!(matches!(collector.finalize(), Err(AnalyticsError::Empty)));
    }

    #[test]
    fn markdown_lists_both_teams() {
        let mut collector = AnalyticsCollector::new("t", labels());
        collector.record_game(&row(Some(Team::A), [510, 300], 10));
        let summary = collector.finalize().unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.md");
        summary.write_markdown(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("# Simulation Summary: t"));
        assert!(text.contains("| A | 1 | 100.0% |"));
        assert!(text.contains("| B | 0 | 0.0% |"));
    }
}
