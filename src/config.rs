use std::{fs, io::ErrorKind, path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::state::Board;

pub const CONFIG_FILE: &str = "snake.yaml";

#[derive(Debug, PartialEq, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
    pub tick_interval_ms: u64,
    pub starting_lives: u32,
    pub high_score_count: usize,
    pub game_over_pause_ms: u64,
    pub score_file: PathBuf,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: 800,
            board_height: 600,
            cell_size: 20,
            tick_interval_ms: 100,
            starting_lives: 3,
            high_score_count: 5,
            game_over_pause_ms: 2000,
            score_file: PathBuf::from("scores.txt"),
            log_file: PathBuf::from("snake.log"),
        }
    }
}

impl Config {
    /// Reads the YAML config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml_ng::from_str(content)?;
        config.validate().map_err(GameError::InvalidConfig)?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.cell_size <= 0 {
            return Err("cell_size must be greater than 0".to_string());
        }
        if self.board_width <= 0 || self.board_height <= 0 {
            return Err("board dimensions must be greater than 0".to_string());
        }
        if self.board_width % self.cell_size != 0 || self.board_height % self.cell_size != 0 {
            return Err("board dimensions must be multiples of cell_size".to_string());
        }
        if self.board().screen_size().is_none() {
            return Err("board has too many cells to fit on a terminal".to_string());
        }
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }
        if self.starting_lives == 0 {
            return Err("starting_lives must be at least 1".to_string());
        }
        if self.high_score_count == 0 {
            return Err("high_score_count must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn board(&self) -> Board {
        Board::new(self.board_width, self.board_height, self.cell_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }
}
