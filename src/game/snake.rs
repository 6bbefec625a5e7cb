use std::collections::VecDeque;

use super::action::Direction;
use super::grid::Position;

/// Cells of a freshly spawned snake, head first
pub const INITIAL_BODY: [(i32, i32); 3] = [(6, 9), (5, 9), (4, 9)];

/// Heading of a freshly spawned snake
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// A snake on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Keep the tail on the next advance
    pending_growth: bool,
    /// A turn was already accepted since the last tick boundary
    direction_locked: bool,
}

impl Snake {
    /// Create a snake at the starting cells, heading right
    pub fn new() -> Self {
        Self::with_body(INITIAL_BODY.map(Position::from), INITIAL_DIRECTION)
    }

    /// Create a snake from explicit cells, head first.
    ///
    /// Panics if `body` is empty.
    pub fn with_body(body: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: VecDeque<Position> = body.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");

        Self {
            body,
            direction,
            pending_growth: false,
            direction_locked: false,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// All segments, head first
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn pending_growth(&self) -> bool {
        self.pending_growth
    }

    pub fn is_direction_locked(&self) -> bool {
        self.direction_locked
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Check if the head overlaps any other segment
    pub fn bites_itself(&self) -> bool {
        self.collides_with_body(self.head())
    }

    /// Move one cell in the current direction. The tail is kept if growth is
    /// pending, so the snake ends up one cell longer.
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Schedule one cell of growth for the next advance
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Request a turn. Ignored when it reverses the snake or a turn was
    /// already taken this tick. Returns whether the turn was accepted.
    pub fn set_direction(&mut self, candidate: Direction) -> bool {
        if self.direction_locked || self.direction.is_opposite(candidate) {
            return false;
        }

        self.direction = candidate;
        self.direction_locked = true;
        true
    }

    /// Tick boundary: allow the next turn
    pub fn end_tick(&mut self) {
        self.direction_locked = false;
    }

    /// Put the snake back at the starting cells
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}
