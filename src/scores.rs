use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::GameMode;
use crate::error::Result;
use crate::game::RoundResult;
use crate::settings::Settings;

/// Summary of one completed round, handed to the score store
#[derive(Debug, Clone, Copy)]
pub struct RoundReport {
    pub mode: GameMode,
    pub result: RoundResult,
    pub human_won: bool,
    pub elapsed: Duration,
}

/// Lifetime totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreData {
    pub total_wins: u32,
    pub best_streak: u32,
    pub current_streak: u32,
    pub rounds_played: u32,
    pub best_round_time: f64,
    pub best_endless_time: f64,
}

impl ScoreData {
    /// Fold one completed round into the totals
    pub fn record(&mut self, report: &RoundReport) {
        let secs = report.elapsed.as_secs_f64();
        match report.mode {
            GameMode::Auto => {}
            GameMode::Endless => {
                self.rounds_played += 1;
                self.best_endless_time = self.best_endless_time.max(secs);
            }
            GameMode::Duel | GameMode::FreeForAll | GameMode::Teams => {
                self.rounds_played += 1;
                if report.human_won {
                    self.total_wins += 1;
                    self.current_streak += 1;
                    self.best_streak = self.best_streak.max(self.current_streak);
                } else {
                    self.current_streak = 0;
                }
                self.best_round_time = self.best_round_time.max(secs);
            }
        }
    }

    /// Whole-percent win rate, if any rounds were played
    pub fn win_rate(&self) -> Option<f64> {
        (self.rounds_played > 0).then(|| 100.0 * self.total_wins as f64 / self.rounds_played as f64)
    }
}

/// Where completed rounds are reported
pub trait ScoreStore {
    fn record_round(&mut self, report: &RoundReport) -> Result<()>;
}

impl ScoreStore for ScoreData {
    fn record_round(&mut self, report: &RoundReport) -> Result<()> {
        self.record(report);
        Ok(())
    }
}

/// Score totals backed by a TOML file
pub struct ScoreFile {
    pub data: ScoreData,
    path: PathBuf,
}

impl ScoreFile {
    pub fn load() -> Self {
        Self::load_from(Self::path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let data = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable scores at {}: {}", path.display(), e);
                ScoreData::default()
            }),
            Err(_) => ScoreData::default(),
        };
        Self { data, path }
    }

    pub fn path() -> PathBuf {
        Settings::config_dir().join("scores.toml")
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, toml::to_string(&self.data)?)?;
        Ok(())
    }
}

impl ScoreStore for ScoreFile {
    fn record_round(&mut self, report: &RoundReport) -> Result<()> {
        self.data.record(report);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel(human_won: bool, secs: u64) -> RoundReport {
        RoundReport {
            mode: GameMode::Duel,
            result: if human_won { RoundResult::Winner(0) } else { RoundResult::Winner(1) },
            human_won,
            elapsed: Duration::from_secs(secs),
        }
    }

    #[test]
    fn three_wins_then_a_loss() {
        let mut s = ScoreData::default();
        for secs in [10, 30, 20] {
            s.record(&duel(true, secs));
        }
        s.record(&duel(false, 5));
        assert_eq!(s.best_streak, 3);
        assert_eq!(s.current_streak, 0);
        assert_eq!(s.total_wins, 3);
        assert_eq!(s.rounds_played, 4);
        assert_eq!(s.best_round_time, 30.0);
        assert_eq!(s.win_rate(), Some(75.0));
    }

    #[test]
    fn endless_tracks_survival_only() {
        let mut s = ScoreData { current_streak: 2, ..Default::default() };
        s.record(&RoundReport {
            mode: GameMode::Endless,
            result: RoundResult::NoResult,
            human_won: false,
            elapsed: Duration::from_millis(42_500),
        });
        assert_eq!(s.rounds_played, 1);
        assert_eq!(s.best_endless_time, 42.5);
        assert_eq!(s.current_streak, 2);
        assert_eq!(s.best_round_time, 0.0);
    }

    #[test]
    fn auto_rounds_are_not_counted() {
        let mut s = ScoreData::default();
        s.record(&RoundReport {
            mode: GameMode::Auto,
            result: RoundResult::NoResult,
            human_won: false,
            elapsed: Duration::from_secs(99),
        });
        assert_eq!(s, ScoreData::default());
        assert_eq!(s.win_rate(), None);
    }

    #[test]
    fn score_file_round_trips_through_toml() {
        let dir = std::env::temp_dir().join(format!("lightcycle-scores-{}", std::process::id()));
        let path = dir.join("scores.toml");
        let mut file = ScoreFile::load_from(path.clone());
        assert_eq!(file.data, ScoreData::default());
        file.record_round(&duel(true, 12)).expect("save scores");

        let reloaded = ScoreFile::load_from(path);
        assert_eq!(reloaded.data.total_wins, 1);
        assert_eq!(reloaded.data.best_round_time, 12.0);
        let _ = fs::remove_dir_all(dir);
    }
}
