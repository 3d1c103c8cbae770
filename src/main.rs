use std::{path::Path, process::exit};

use rand::{rngs::StdRng, SeedableRng};

use snake_arcade::config::{Config, CONFIG_FILE};
use snake_arcade::error::Result;
use snake_arcade::game::SnakeGame;
use snake_arcade::logger::init_logger;
use snake_arcade::log;
use snake_arcade::term::TermManager;

fn main() {
    if let Err(e) = run() {
        eprintln!("snake: {}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load(Path::new(CONFIG_FILE))?;
    init_logger(&config.log_file)?;
    log!("Starting with {:?}", config);

    let mut term = TermManager::new()?;
    term.setup()?;

    let mut game = SnakeGame::new(term, config, StdRng::from_entropy());
    let result = game.run();

    // The terminal has to be usable again before any error is printed
    let mut term = game.into_surface();
    let restored = term.restore();

    if let Err(e) = &result {
        log!("Exiting on error: {}", e);
    }
    first_error(result, restored)
}

/// The game's own error wins over a failure to restore the terminal.
fn first_error(game: Result<()>, restore: Result<()>) -> Result<()> {
    game.and(restore)
}
