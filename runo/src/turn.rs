use strum_macros::Display;

use crate::rules::Resolution;

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// What a player's turn came down to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Played,
    Passed,
}

/// Whose turn it is and which way play goes around the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnController {
    current: usize,
    seats: usize,
    direction: Direction,
}

impl TurnController {
    pub fn new(seats: usize, current: usize) -> Self {
        debug_assert!(seats > 0 && current < seats);
        Self {
            current,
            seats,
            direction: Direction::default(),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn advance(&mut self) {
        self.current = self.peek_next();
    }

    /// The seat one step ahead in the current direction.
    pub fn peek_next(&self) -> usize {
        match self.direction {
            Direction::Clockwise => (self.current + 1) % self.seats,
            Direction::CounterClockwise => (self.current + self.seats - 1) % self.seats,
        }
    }

    /// Adopts the direction a resolved top card asks for. Returns whether it changed.
    pub(crate) fn apply_direction(&mut self, resolution: &Resolution) -> bool {
        let changed = self.direction != resolution.direction;
        self.direction = resolution.direction;
        changed
    }
}
