//! The game state machine: one session of snake, advanced one tick at a time.

use std::convert::TryFrom;

use rand::Rng;

use crate::Coords;
use crate::snake::{Direction, Position, Snake};

pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Toroidal board measured in board units; positions are aligned to `cell_size`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Board { width, height, cell_size }
    }

    pub fn cols(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Terminal cells needed for the board plus its border and the HUD row,
    /// or `None` when that does not fit in terminal coordinates.
    pub fn screen_size(&self) -> Option<Coords> {
        if self.cols() < 1 || self.rows() < 1 {
            return None;
        }
        let cols = u16::try_from(i64::from(self.cols()) + 2).ok()?;
        let rows = u16::try_from(i64::from(self.rows()) + 3).ok()?;
        Some((cols, rows))
    }

    pub fn center(&self) -> Position {
        Position::new(
            self.width / 2 / self.cell_size * self.cell_size,
            self.height / 2 / self.cell_size * self.cell_size,
        )
    }

    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta(self.cell_size);
        Position::new(
            (pos.x + dx).rem_euclid(self.width),
            (pos.y + dy).rem_euclid(self.height),
        )
    }

    /// Uniform over all cells, snake occupancy is not considered.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(0..self.cols()) * self.cell_size,
            rng.gen_range(0..self.rows()) * self.cell_size,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    LifeLost,
    GameOver,
}

/// Everything the renderer needs to draw one game frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub body: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub lives: u32,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    pub food: Position,
    pub lives: u32,
    pub score: u32,
    pending_direction: Option<Direction>,
}

impl GameState {
    pub fn new<R: Rng>(board: Board, lives: u32, rng: &mut R) -> Self {
        let food = board.random_cell(rng);
        GameState {
            board,
            snake: Snake::new(board.center(), INITIAL_DIRECTION),
            food,
            lives,
            score: 0,
            pending_direction: None,
        }
    }

    /// Builds a state from explicit parts, mainly for replaying fixed scenarios.
    pub fn with_parts(board: Board, snake: Snake, food: Position, lives: u32, score: u32) -> Self {
        GameState { board, snake, food, lives, score, pending_direction: None }
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Queues a turn for the next tick. Reversals of the current heading are
    /// dropped silently; otherwise the latest request replaces any earlier one.
    pub fn request_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.snake.direction()) {
            self.pending_direction = Some(direction);
        }
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::GameOver;
        }

        if let Some(dir) = self.pending_direction.take() {
            self.snake.set_direction(dir);
        }

        let new_head = self.board.step(self.snake.head(), self.snake.direction());
        self.snake.push_head(new_head);

        let mut outcome = TickOutcome::Moved;
        if new_head == self.food {
            self.score += 1;
            self.food = self.board.random_cell(rng);
            outcome = TickOutcome::Ate;
        } else {
            self.snake.drop_tail();
        }

        if self.snake.head_hits_body() {
            self.lives -= 1;
            if self.lives > 0 {
                self.reset_snake();
                outcome = TickOutcome::LifeLost;
            } else {
                outcome = TickOutcome::GameOver;
            }
        }

        outcome
    }

    pub fn frame(&self) -> Frame {
        Frame {
            body: self.snake.body().iter().copied().collect(),
            food: self.food,
            score: self.score,
            lives: self.lives,
        }
    }

    fn reset_snake(&mut self) {
        self.snake = Snake::new(self.board.center(), INITIAL_DIRECTION);
        self.pending_direction = None;
    }
}
