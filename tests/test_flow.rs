use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;

use snake_arcade::Coords;
use snake_arcade::config::Config;
use snake_arcade::error::{GameError, Result};
use snake_arcade::game::{direction_for, SnakeGame};
use snake_arcade::menu::Screen;
use snake_arcade::snake::{Direction, Position, Snake};
use snake_arcade::state::GameState;
use snake_arcade::surface::{InputEvent, Key, Surface};

/// In-memory surface that replays one batch of events per poll and records
/// what was drawn. Once the script runs out every poll yields `Quit`.
struct ScriptedSurface {
    size: Coords,
    script: VecDeque<Vec<InputEvent>>,
    texts: Vec<String>,
    cells: Vec<(Coords, Color)>,
    frames: usize,
}

impl ScriptedSurface {
    fn new(script: Vec<Vec<InputEvent>>) -> Self {
        ScriptedSurface { size: (80, 40), script: script.into(), texts: vec![], cells: vec![], frames: 0 }
    }

    fn drew(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }
}

impl Surface for ScriptedSurface {
    fn size(&self) -> Coords {
        self.size
    }

    fn clear(&mut self) -> Result<()> {
        self.cells.clear();
        Ok(())
    }

    fn fill_cell(&mut self, pos: Coords, color: Color) -> Result<()> {
        self.cells.push((pos, color));
        Ok(())
    }

    fn draw_text(&mut self, _center: Coords, text: &str, _color: Color) -> Result<()> {
        self.texts.push(text.to_string());
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        Ok(self.script.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]))
    }
}

fn key(k: Key) -> InputEvent {
    InputEvent::KeyDown(k)
}

fn typed(text: &str) -> Vec<InputEvent> {
    text.chars().map(|c| key(Key::Char(c))).collect()
}

fn test_config(name: &str) -> (Config, PathBuf) {
    let score_file = std::env::temp_dir().join(format!("snake_arcade_flow_{}_{}.txt", name, std::process::id()));
    let _ = fs::remove_file(&score_file);
    let config = Config {
        tick_interval_ms: 1,
        game_over_pause_ms: 0,
        score_file: score_file.clone(),
        ..Config::default()
    };
    (config, score_file)
}

fn new_game(config: Config, script: Vec<Vec<InputEvent>>) -> SnakeGame<ScriptedSurface, StdRng> {
    SnakeGame::new(ScriptedSurface::new(script), config, StdRng::seed_from_u64(3))
}

// ── Menus ─────────────────────────────────────────────────────────────────────

#[test]
fn exit_through_confirmation() {
    let (config, _) = test_config("exit");
    let mut game = new_game(config, vec![
        vec![key(Key::Up)],     // wraps to "Exit Game"
        vec![key(Key::Return)],
        vec![key(Key::Return)], // "Yes"
    ]);

    game.run().unwrap();

    let surface = game.surface();
    assert!(surface.drew("SNAKE GAME"));
    assert!(surface.drew("Exit Game?"));
    assert!(surface.script.is_empty());
}

#[test]
fn declining_exit_returns_to_menu() {
    let (config, _) = test_config("decline");
    let mut game = new_game(config, vec![
        vec![key(Key::Down), key(Key::Down), key(Key::Return)],
        vec![key(Key::Down), key(Key::Return)], // "No"
        vec![],
    ]);

    game.run().unwrap();

    let surface = game.surface();
    let menus = surface.texts.iter().filter(|t| *t == "SNAKE GAME").count();
    assert_eq!(menus, 2);
}

#[test]
fn empty_high_scores() {
    let (config, _) = test_config("no_scores");
    let mut game = new_game(config, vec![
        vec![key(Key::Down), key(Key::Return)],
        vec![key(Key::Char('x'))],
    ]);

    game.run().unwrap();

    let surface = game.surface();
    assert!(surface.drew("High Scores"));
    assert!(surface.drew("No scores yet!"));
    assert!(surface.drew("Press any key to return"));
}

#[test]
fn high_scores_are_listed_best_first() {
    let (config, score_file) = test_config("listed");
    fs::write(&score_file, "alice:5\nbob:9\ncarol:9\n").unwrap();
    let mut game = new_game(config, vec![
        vec![key(Key::Down), key(Key::Return)],
    ]);

    game.run().unwrap();

    let surface = game.surface();
    assert!(surface.drew("1. bob: 9"));
    assert!(surface.drew("2. carol: 9"));
    assert!(surface.drew("3. alice: 5"));
    let _ = fs::remove_file(score_file);
}

#[test]
fn quit_in_menu_stops_immediately() {
    let (config, _) = test_config("quit_menu");
    let mut game = new_game(config, vec![vec![InputEvent::Quit, key(Key::Return)]]);

    game.run().unwrap();
    assert!(!game.surface().drew("Enter Your Name:"));
}

// ── Sessions ──────────────────────────────────────────────────────────────────

#[test]
fn quit_during_game_saves_nothing() {
    let (config, score_file) = test_config("quit_game");
    let mut script = vec![vec![key(Key::Return)]];
    let mut name = typed("anx");
    name.push(key(Key::Backspace));
    name.push(key(Key::Char('n')));
    script.push(name);
    script.push(vec![key(Key::Return)]);
    script.push(vec![key(Key::Up)]);
    script.push(vec![]);

    let mut game = new_game(config, script);
    game.run().unwrap();

    let surface = game.surface();
    assert!(surface.drew("Enter Your Name:"));
    assert!(surface.drew("ann"));
    assert!(surface.drew("Score: 0"));
    assert!(surface.drew("Lives: 3"));
    assert!(!score_file.exists());
}

#[test]
fn finished_session_is_saved() {
    let (config, score_file) = test_config("saved");
    let board = config.board();
    let snake = Snake::from_body(
        vec![
            Position::new(100, 100),
            Position::new(120, 100),
            Position::new(120, 120),
            Position::new(100, 120),
            Position::new(80, 120),
        ],
        Direction::Down,
    );
    let state = GameState::with_parts(board, snake, Position::new(0, 0), 1, 4);

    // one poll for the fatal tick, one for the game over pause
    let mut game = new_game(config, vec![vec![], vec![]]);
    let next = game.play_session("ann", state).unwrap();

    assert_eq!(next, Some(Screen::MainMenu));
    assert_eq!(fs::read_to_string(&score_file).unwrap(), "ann:4\n");
    let surface = game.surface();
    assert!(surface.drew("Lives: 0"));
    assert!(surface.drew("Final Score: 4"));
    assert!(surface.drew("Returning to main menu..."));
    let _ = fs::remove_file(score_file);
}

#[test]
fn game_frame_draws_snake_and_food() {
    let (config, _) = test_config("frame");
    let board = config.board();
    let snake = Snake::new(Position::new(0, 0), Direction::Right);
    let state = GameState::with_parts(board, snake, Position::new(780, 580), 3, 0);

    let mut game = new_game(config, vec![vec![]]);
    let next = game.play_session("ann", state).unwrap();
    assert_eq!(next, None);

    // 40x30 board plus border is 42 columns wide, centered on 80 columns
    let surface = game.surface();
    assert!(surface.cells.contains(&((19 + 1 + 1, 2), Color::Green)));
    assert!(surface.cells.contains(&((19 + 1 + 39, 2 + 29), Color::Red)));
}

#[test]
fn too_small_surface_is_fatal() {
    let (config, _) = test_config("small");
    let mut surface = ScriptedSurface::new(vec![]);
    surface.size = (30, 20);
    let mut game = SnakeGame::new(surface, config, StdRng::seed_from_u64(3));

    match game.run() {
        Err(GameError::TerminalTooSmall { needed_cols, needed_rows, .. }) => {
            assert_eq!((needed_cols, needed_rows), (42, 33));
        }
        other => panic!("expected the terminal to be too small, got {:?}", other),
    }
    assert_eq!(game.surface().frames, 0);
}

fn oversized_config(name: &str) -> Config {
    Config { board_width: 65534, board_height: 65533, cell_size: 1, ..test_config(name).0 }
}

#[test]
fn oversized_board_is_rejected_at_startup() {
    let mut game = new_game(oversized_config("oversized_run"), vec![]);

    assert!(matches!(game.required_size(), Err(GameError::InvalidConfig(_))));
    assert!(matches!(game.run(), Err(GameError::InvalidConfig(_))));
    assert_eq!(game.surface().frames, 0);
}

#[test]
fn oversized_board_fails_to_draw_without_panicking() {
    let config = oversized_config("oversized_play");
    let board = config.board();
    let state = GameState::with_parts(board, Snake::new(Position::new(0, 0), Direction::Right), Position::new(5, 5), 3, 0);

    let mut game = new_game(config, vec![vec![]]);
    assert!(matches!(game.play_session("ann", state), Err(GameError::InvalidConfig(_))));
}

#[test]
fn largest_board_draws_on_a_small_surface() {
    let config = Config { board_width: 65533, board_height: 65532, cell_size: 1, ..test_config("largest").0 };
    let board = config.board();
    let snake = Snake::new(Position::new(65532, 65531), Direction::Right);
    let state = GameState::with_parts(board, snake, Position::new(65532, 0), 3, 0);

    let mut game = new_game(config, vec![vec![]]);
    assert_eq!(game.required_size().unwrap(), (65535, 65535));
    assert_eq!(game.play_session("ann", state).unwrap(), None);

    // the head wrapped to column 0 of the last board row
    let cells = &game.surface().cells;
    assert!(cells.contains(&((1, 2 + 65531), Color::Green)));
    assert!(cells.contains(&((1 + 65532, 2), Color::Red)));
}

// ── Key mapping ───────────────────────────────────────────────────────────────

#[test]
fn arrows_and_wasd_steer() {
    assert_eq!(direction_for(Key::Up), Some(Direction::Up));
    assert_eq!(direction_for(Key::Char('a')), Some(Direction::Left));
    assert_eq!(direction_for(Key::Char('S')), Some(Direction::Down));
    assert_eq!(direction_for(Key::Right), Some(Direction::Right));
    assert_eq!(direction_for(Key::Return), None);
    assert_eq!(direction_for(Key::Char('q')), None);
}
