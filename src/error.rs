use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
    #[error("Could not parse config file: {source}")]
    ConfigParse {
        #[from]
        source: serde_yaml_ng::Error,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Malformed score record on line {line}: {content:?}")]
    MalformedScore { line: usize, content: String },
    #[error("Player name {0:?} cannot be stored in the score file")]
    InvalidName(String),
    #[error("Terminal is {actual_cols}x{actual_rows}, the board needs at least {needed_cols}x{needed_rows}")]
    TerminalTooSmall {
        needed_cols: u16,
        needed_rows: u16,
        actual_cols: u16,
        actual_rows: u16,
    },
}
