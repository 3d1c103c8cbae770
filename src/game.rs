use std::{thread::sleep, time::Duration};

use crate::{Coords, log};
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::menu::{Menu, NameInput, Screen, MainOption, ExitOption, MAIN_OPTIONS, EXIT_OPTIONS};
use crate::scores::ScoreStore;
use crate::snake::{Direction, Position};
use crate::state::{Board, Frame, GameState, TickOutcome};
use crate::surface::{InputEvent, Key, Surface};

use crossterm::style::Color;
use rand::Rng;

const MENU_FRAME_MS: u64 = 33;

const TITLE_COLOR: Color = Color::Green;
const TEXT_COLOR: Color = Color::White;
const DIM_COLOR: Color = Color::DarkGrey;
const WARN_COLOR: Color = Color::Red;
const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const BORDER_COLOR: Color = Color::DarkGrey;

/// Drives the screens: main menu, name entry, game, high scores and exit
/// confirmation. Owns the surface, the score store and the food RNG.
pub struct SnakeGame<S: Surface, R: Rng> {
    surface: S,
    config: Config,
    board: Board,
    scores: ScoreStore,
    rng: R,
    player_name: String,
}

impl<S: Surface, R: Rng> SnakeGame<S, R> {
    pub fn new(surface: S, config: Config, rng: R) -> Self {
        let board = config.board();
        let scores = ScoreStore::new(&config.score_file);
        SnakeGame { surface, config, board, scores, rng, player_name: String::new() }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Smallest surface (cols, rows) that fits the board, its border and the HUD row.
    pub fn required_size(&self) -> Result<Coords> {
        self.board.screen_size().ok_or_else(|| {
            GameError::InvalidConfig(format!(
                "a {}x{} cell board does not fit on a terminal",
                self.board.cols(),
                self.board.rows()
            ))
        })
    }

    pub fn check_surface(&self) -> Result<()> {
        let (needed_cols, needed_rows) = self.required_size()?;
        let (actual_cols, actual_rows) = self.surface.size();
        if actual_cols < needed_cols || actual_rows < needed_rows {
            return Err(GameError::TerminalTooSmall { needed_cols, needed_rows, actual_cols, actual_rows });
        }
        Ok(())
    }

    /// Runs screens until the player confirms exit or sends Quit.
    pub fn run(&mut self) -> Result<()> {
        self.check_surface()?;

        let mut screen = Screen::MainMenu;
        loop {
            let next = match screen {
                Screen::MainMenu => self.main_menu()?,
                Screen::NameEntry => self.name_entry()?,
                Screen::Game => self.play()?,
                Screen::HighScores => self.show_high_scores()?,
                Screen::ConfirmExit => self.confirm_exit()?,
            };

            match next {
                Some(s) => screen = s,
                None => break,
            }
        }

        log!("Leaving the game");
        Ok(())
    }

    /// Plays one session from a fresh state with the current player name.
    pub fn play(&mut self) -> Result<Option<Screen>> {
        let state = GameState::new(self.board, self.config.starting_lives, &mut self.rng);
        let name = self.player_name.clone();
        self.play_session(&name, state)
    }

    /// Ticks `state` until lives run out, then saves the score. Returns `None`
    /// if the player quit, which leaves the score unsaved.
    pub fn play_session(&mut self, player_name: &str, mut state: GameState) -> Result<Option<Screen>> {
        log!("Session started for {:?}", player_name);

        loop {
            for ev in self.surface.poll_events()? {
                match ev {
                    InputEvent::Quit => {
                        log!("Quit during session, score {} discarded", state.score);
                        return Ok(None);
                    }
                    InputEvent::KeyDown(key) => {
                        if let Some(dir) = direction_for(key) {
                            state.request_direction(dir);
                        }
                    }
                }
            }

            let outcome = state.tick(&mut self.rng);
            if outcome == TickOutcome::LifeLost {
                log!("Life lost, {} left", state.lives);
            }

            self.draw_game(&state.frame())?;

            if outcome == TickOutcome::GameOver {
                break;
            }
            sleep(self.config.tick_interval());
        }

        self.game_over(player_name, state.score)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn main_menu(&mut self) -> Result<Option<Screen>> {
        let mut menu = Menu::new(MAIN_OPTIONS);
        let mut dirty = true;

        loop {
            if dirty {
                let (w, h) = self.surface.size();
                self.surface.clear()?;
                self.surface.draw_text((w / 2, h / 4), "SNAKE GAME", TITLE_COLOR)?;
                self.draw_options(menu.options(), menu.selected())?;
                self.surface.present()?;
                dirty = false;
            }

            for ev in self.surface.poll_events()? {
                let key = match ev {
                    InputEvent::Quit => return Ok(None),
                    InputEvent::KeyDown(key) => key,
                };
                dirty = true;

                match menu.handle_key(key) {
                    Some(MainOption::StartGame) => return Ok(Some(Screen::NameEntry)),
                    Some(MainOption::Score) => return Ok(Some(Screen::HighScores)),
                    Some(MainOption::ExitGame) => return Ok(Some(Screen::ConfirmExit)),
                    None => {}
                }
            }

            sleep(Duration::from_millis(MENU_FRAME_MS));
        }
    }

    fn name_entry(&mut self) -> Result<Option<Screen>> {
        let mut input = NameInput::new();
        let mut dirty = true;

        loop {
            if dirty {
                let (w, h) = self.surface.size();
                self.surface.clear()?;
                self.surface.draw_text((w / 2, (h / 2).saturating_sub(2)), "Enter Your Name:", TEXT_COLOR)?;
                self.surface.draw_text((w / 2, h / 2 + 2), input.text(), TEXT_COLOR)?;
                self.surface.present()?;
                dirty = false;
            }

            for ev in self.surface.poll_events()? {
                let key = match ev {
                    InputEvent::Quit => return Ok(None),
                    InputEvent::KeyDown(key) => key,
                };
                dirty = true;

                if input.handle_key(key) {
                    self.player_name = input.into_name();
                    return Ok(Some(Screen::Game));
                }
            }

            sleep(Duration::from_millis(MENU_FRAME_MS));
        }
    }

    fn show_high_scores(&mut self) -> Result<Option<Screen>> {
        let entries = self.scores.top_n(self.config.high_score_count)?;

        let (w, h) = self.surface.size();
        self.surface.clear()?;
        self.surface.draw_text((w / 2, h / 4), "High Scores", TITLE_COLOR)?;

        if entries.is_empty() {
            self.surface.draw_text((w / 2, h / 2), "No scores yet!", TEXT_COLOR)?;
        } else {
            for (i, entry) in entries.iter().enumerate() {
                let line = format!("{}. {}: {}", i + 1, entry.name, entry.score);
                self.surface.draw_text((w / 2, h / 2 + i as u16), &line, TEXT_COLOR)?;
            }
        }

        self.surface.draw_text((w / 2, h.saturating_sub(2)), "Press any key to return", DIM_COLOR)?;
        self.surface.present()?;

        loop {
            for ev in self.surface.poll_events()? {
                match ev {
                    InputEvent::Quit => return Ok(None),
                    InputEvent::KeyDown(_) => return Ok(Some(Screen::MainMenu)),
                }
            }

            sleep(Duration::from_millis(MENU_FRAME_MS));
        }
    }

    fn confirm_exit(&mut self) -> Result<Option<Screen>> {
        let mut menu = Menu::new(EXIT_OPTIONS);
        let mut dirty = true;

        loop {
            if dirty {
                let (w, h) = self.surface.size();
                self.surface.clear()?;
                self.surface.draw_text((w / 2, h / 3), "Exit Game?", WARN_COLOR)?;
                self.draw_options(menu.options(), menu.selected())?;
                self.surface.present()?;
                dirty = false;
            }

            for ev in self.surface.poll_events()? {
                let key = match ev {
                    InputEvent::Quit => return Ok(None),
                    InputEvent::KeyDown(key) => key,
                };
                dirty = true;

                match menu.handle_key(key) {
                    Some(ExitOption::Yes) => return Ok(None),
                    Some(ExitOption::No) => return Ok(Some(Screen::MainMenu)),
                    None => {}
                }
            }

            sleep(Duration::from_millis(MENU_FRAME_MS));
        }
    }

    fn game_over(&mut self, player_name: &str, score: u32) -> Result<Option<Screen>> {
        self.scores.save(player_name, score)?;
        log!("Session over for {:?} with score {}, saved to {}", player_name, score, self.scores.path().display());

        let (w, h) = self.surface.size();
        self.surface.clear()?;
        self.surface.draw_text((w / 2, h / 2), &format!("Final Score: {}", score), TEXT_COLOR)?;
        self.surface.draw_text((w / 2, h.saturating_sub(2)), "Returning to main menu...", DIM_COLOR)?;
        self.surface.present()?;

        sleep(self.config.game_over_pause());

        // Keys pressed during the pause are dropped, a quit is still honored
        if self.surface.poll_events()?.contains(&InputEvent::Quit) {
            return Ok(None);
        }
        Ok(Some(Screen::MainMenu))
    }

    fn draw_options(&mut self, options: &[(impl Copy, &str)], selected: usize) -> Result<()> {
        let (w, h) = self.surface.size();
        for (i, (_, label)) in options.iter().enumerate() {
            let color = if i == selected { TEXT_COLOR } else { DIM_COLOR };
            self.surface.draw_text((w / 2, h / 2 + 2 * i as u16), label, color)?;
        }
        Ok(())
    }

    fn draw_game(&mut self, frame: &Frame) -> Result<()> {
        let (cols, rows) = self.required_size()?;
        let left = self.surface.size().0.saturating_sub(cols) / 2;

        self.surface.clear()?;

        let score = format!("Score: {}", frame.score);
        let lives = format!("Lives: {}", frame.lives);
        self.surface.draw_text((left + cols / 4, 0), &score, TEXT_COLOR)?;
        self.surface.draw_text((left + (cols - cols / 4), 0), &lives, TEXT_COLOR)?;

        for x in 0..cols {
            self.surface.fill_cell((left + x, 1), BORDER_COLOR)?;
            self.surface.fill_cell((left + x, rows - 1), BORDER_COLOR)?;
        }
        for y in 2..rows - 1 {
            self.surface.fill_cell((left, y), BORDER_COLOR)?;
            self.surface.fill_cell((left + cols - 1, y), BORDER_COLOR)?;
        }

        for pos in &frame.body {
            let cell = self.board_to_screen(*pos, left);
            self.surface.fill_cell(cell, SNAKE_COLOR)?;
        }
        let food = self.board_to_screen(frame.food, left);
        self.surface.fill_cell(food, FOOD_COLOR)?;

        self.surface.present()
    }

    fn board_to_screen(&self, pos: Position, left: u16) -> Coords {
        let col = pos.x.rem_euclid(self.board.width) / self.board.cell_size;
        let row = pos.y.rem_euclid(self.board.height) / self.board.cell_size;
        (left.saturating_add(1 + col as u16), 2 + row as u16)
    }
}

/// Arrow keys and WASD steer the snake.
pub fn direction_for(key: Key) -> Option<Direction> {
    match key {
        Key::Up | Key::Char('w') | Key::Char('W') => Some(Direction::Up),
        Key::Down | Key::Char('s') | Key::Char('S') => Some(Direction::Down),
        Key::Left | Key::Char('a') | Key::Char('A') => Some(Direction::Left),
        Key::Right | Key::Char('d') | Key::Char('D') => Some(Direction::Right),
        _ => None,
    }
}
