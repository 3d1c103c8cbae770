pub mod logger;
pub mod error;
pub mod config;
pub mod snake;
pub mod state;
pub mod scores;
pub mod surface;
pub mod menu;
pub mod term;
pub mod game;

/// Terminal cell coordinates (column, row).
pub type Coords = (u16, u16);
