use std::collections::VecDeque;

use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Displacement of one step, scaled by the cell size.
    pub fn delta(self, cell_size: i32) -> (i32, i32) {
        match self {
            Up => (0, -cell_size),
            Down => (0, cell_size),
            Left => (-cell_size, 0),
            Right => (cell_size, 0),
        }
    }
}

/// Head-first body plus the current heading. Duplicate positions are allowed;
/// self-collision is detected by the caller.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    pub fn new(pos: Position, direction: Direction) -> Self {
        Snake { body: VecDeque::from(vec![pos]), direction }
    }

    /// Builds a snake from a head-first list of segments.
    ///
    /// # Panics
    ///
    /// Panics if `body` yields no positions.
    pub fn from_body<I: IntoIterator<Item = Position>>(body: I, direction: Direction) -> Self {
        let body: VecDeque<Position> = body.into_iter().collect();
        assert!(!body.is_empty(), "snake body cannot be empty");
        Snake { body, direction }
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turns unless `new_direction` reverses the current heading.
    /// Returns whether the heading was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) {
            return false;
        }
        self.direction = new_direction;
        true
    }

    pub fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub fn drop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// True if the head overlaps any other segment.
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }
}
