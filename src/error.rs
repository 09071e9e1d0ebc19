use thiserror::Error;

use crate::lobby::LobbyError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("could not write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("terminal too small: {width}x{height} usable, need at least 30x16")]
    ViewportTooSmall { width: u16, height: u16 },

    #[error("lobby: {0}")]
    Lobby(#[from] LobbyError),
}

pub type Result<T> = std::result::Result<T, GameError>;
