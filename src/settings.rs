use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Difficulty, GameMode, PlayerColor, Slot, MAX_ACTORS};
use crate::error::Result;

pub const DEFAULT_TICK_MS: u64 = 55;
pub const MIN_TICK_MS: u64 = 20;
pub const MAX_TICK_MS: u64 = 150;

/// Persisted preferences: speed and the last lobby setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_mode: GameMode,
    pub tick_ms: u64,
    pub slots: Vec<Slot>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut slots: Vec<Slot> = (0..MAX_ACTORS)
            .map(|i| Slot::ai(PlayerColor::for_index(i), Difficulty::Medium))
            .collect();
        slots[0] = Slot::human(PlayerColor::Cyan, 0);
        slots[1].team = 1;
        slots[1].keyset = 1;
        slots[2].keyset = 2;
        slots[3] = Slot { team: 1, keyset: 3, ..Slot::ai(PlayerColor::Yellow, Difficulty::Hard) };
        Self {
            last_mode: GameMode::Duel,
            tick_ms: DEFAULT_TICK_MS,
            slots,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let mut settings: Settings = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        settings.normalize();
        settings
    }

    /// Pad short slot lists and pull the tick length back into range
    fn normalize(&mut self) {
        let defaults = Self::default().slots;
        while self.slots.len() < MAX_ACTORS {
            self.slots.push(defaults[self.slots.len()]);
        }
        self.slots.truncate(MAX_ACTORS);
        self.tick_ms = self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    /// Step the tick length by 5 ms within 20..=150
    pub fn adjust_tick(&mut self, faster: bool) {
        self.tick_ms = if faster {
            self.tick_ms.saturating_sub(5).max(MIN_TICK_MS)
        } else {
            (self.tick_ms + 5).min(MAX_TICK_MS)
        };
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lightcycle")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_one_human_and_eight_slots() {
        let s = Settings::default();
        assert_eq!(s.slots.len(), MAX_ACTORS);
        assert_eq!(s.slots.iter().filter(|s| s.human).count(), 1);
        assert_eq!(s.tick_ms, 55);
        assert_eq!(s.slots[3].difficulty, Difficulty::Hard);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = std::env::temp_dir().join(format!("lightcycle-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("settings.toml");
        fs::write(&path, "tick_ms = 500\nlast_mode = \"teams\"\n").expect("write");
        let s = Settings::load_from(&path);
        assert_eq!(s.tick_ms, MAX_TICK_MS);
        assert_eq!(s.last_mode, GameMode::Teams);
        assert_eq!(s.slots.len(), MAX_ACTORS);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("lightcycle-settings-rt-{}", std::process::id()));
        let path = dir.join("settings.toml");
        let mut s = Settings::default();
        s.last_mode = GameMode::Endless;
        s.slots[1].human = true;
        s.save_to(&path).expect("save");
        assert_eq!(Settings::load_from(&path), s);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn tick_adjust_stays_in_range() {
        let mut s = Settings { tick_ms: 25, ..Default::default() };
        s.adjust_tick(true);
        s.adjust_tick(true);
        assert_eq!(s.tick_ms, MIN_TICK_MS);
        s.tick_ms = 148;
        s.adjust_tick(false);
        assert_eq!(s.tick_ms, MAX_TICK_MS);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("lightcycle-does-not-exist").join("settings.toml");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
