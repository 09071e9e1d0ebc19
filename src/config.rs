use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// Most actors any mode puts on the grid
pub const MAX_ACTORS: usize = 8;

/// Game modes available from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Duel,       // 1v1, last one standing
    FreeForAll, // 4 players, last one standing
    Teams,      // 2v2, teammates pass through each other's trails
    Endless,    // 1 human vs 7 respawning AIs
    Auto,       // AI-only screensaver
}

impl GameMode {
    pub fn actor_count(self) -> usize {
        match self {
            GameMode::Duel => 2,
            GameMode::FreeForAll => 4,
            GameMode::Teams => 4,
            GameMode::Endless => 8,
            GameMode::Auto => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameMode::Duel => "1v1",
            GameMode::FreeForAll => "FFA (4p)",
            GameMode::Teams => "2v2 Teams",
            GameMode::Endless => "Endless",
            GameMode::Auto => "AutoTron",
        }
    }

    /// Dead actors come back after a delay in these modes
    pub fn respawns(self) -> bool {
        matches!(self, GameMode::Endless | GameMode::Auto)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "duel" | "1v1" => Some(GameMode::Duel),
            "ffa" | "free-for-all" | "freeforall" => Some(GameMode::FreeForAll),
            "teams" | "team" | "2v2" => Some(GameMode::Teams),
            "endless" | "survival" => Some(GameMode::Endless),
            "auto" | "autotron" | "a" => Some(GameMode::Auto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "med" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Trail palette, one per participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    #[default]
    Cyan,
    Magenta,
    Green,
    Yellow,
    Red,
    Blue,
    White,
    Orange,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 8] = [
        PlayerColor::Cyan,
        PlayerColor::Magenta,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::White,
        PlayerColor::Orange,
    ];

    /// Palette slot for a player index, wrapping after 8
    pub fn for_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Cyan => "Cyan",
            PlayerColor::Magenta => "Magenta",
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::White => "White",
            PlayerColor::Orange => "Orange",
        }
    }
}

/// Directional bindings for a human slot
pub struct KeySet {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub name: &'static str,
}

pub static KEYSETS: [KeySet; 4] = [
    KeySet { up: KeyCode::Char('w'), down: KeyCode::Char('s'), left: KeyCode::Char('a'), right: KeyCode::Char('d'), name: "WASD" },
    KeySet { up: KeyCode::Char('i'), down: KeyCode::Char('k'), left: KeyCode::Char('j'), right: KeyCode::Char('l'), name: "IJKL" },
    KeySet { up: KeyCode::Up, down: KeyCode::Down, left: KeyCode::Left, right: KeyCode::Right, name: "Arrows" },
    KeySet { up: KeyCode::Char('8'), down: KeyCode::Char('5'), left: KeyCode::Char('4'), right: KeyCode::Char('6'), name: "Numpad" },
];

pub fn keyset(id: usize) -> &'static KeySet {
    &KEYSETS[id % KEYSETS.len()]
}

/// Lobby configuration for one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Slot {
    pub human: bool,
    pub color: PlayerColor,
    pub keyset: usize,
    pub difficulty: Difficulty,
    pub team: u8,
}

impl Slot {
    pub fn ai(color: PlayerColor, difficulty: Difficulty) -> Self {
        Self { human: false, color, keyset: 0, difficulty, team: 0 }
    }

    pub fn human(color: PlayerColor, keyset: usize) -> Self {
        Self { human: true, color, keyset, difficulty: Difficulty::Medium, team: 0 }
    }
}
