//! Player-controlled snake
//!
//! Adds direction-reversal rejection, self-collision and a temporary speed
//! boost on top of the shared wrap-around step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::body::{GridMover, MovableBody, Step};
use super::grid::{Cell, Direction, GridDimensions};

/// Snake lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeState {
    Alive,
    /// Terminal until the session is rebuilt
    GameOver,
}

/// Result of a snake tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeTick {
    Moved(Step),
    /// The candidate head hit the body; nothing moved
    Collided { head: Cell },
    /// Already dead
    Idle,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    body: MovableBody,
    /// Direction each segment was travelling when it became the head
    headings: VecDeque<Direction>,
    state: SnakeState,
    base_interval: f32,
    boost_multiplier: f32,
    boost_duration: f32,
    /// Seconds left on the active boost
    boost_remaining: Option<f32>,
}

impl Snake {
    pub fn new(seed: Cell, base_interval: f32, boost_multiplier: f32, boost_duration: f32) -> Self {
        Self {
            body: MovableBody::new(seed, Direction::Right),
            headings: VecDeque::from([Direction::Right]),
            state: SnakeState::Alive,
            base_interval,
            boost_multiplier,
            boost_duration,
            boost_remaining: None,
        }
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == SnakeState::Alive
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_remaining.is_some()
    }

    pub fn cells(&self) -> &VecDeque<Cell> {
        self.body.cells()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments paired with the direction they were moving when created
    pub fn segments(&self) -> impl Iterator<Item = (Cell, Direction)> + '_ {
        self.body.cells().iter().copied().zip(self.headings.iter().copied())
    }

    /// Current movement interval, shortened while boosted
    pub fn tick_interval(&self) -> f32 {
        if self.is_boosted() {
            self.base_interval * self.boost_multiplier
        } else {
            self.base_interval
        }
    }

    /// Steer the snake. Reversals are silently ignored.
    ///
    /// Returns whether the request was accepted. An accepted request starts a
    /// boost unless one is already running; a running boost is not extended.
    pub fn request_direction(&mut self, dir: Direction) -> bool {
        if !self.is_alive() || dir == self.body.direction.opposite() {
            return false;
        }
        self.body.direction = dir;
        if self.boost_remaining.is_none() && self.boost_duration > 0.0 {
            self.boost_remaining = Some(self.boost_duration);
        }
        true
    }

    /// Count down the boost timer
    pub fn update_boost(&mut self, dt: f32) {
        if let Some(remaining) = self.boost_remaining {
            let remaining = remaining - dt;
            self.boost_remaining = (remaining > 0.0).then_some(remaining);
        }
    }

    /// One movement step with self-collision
    ///
    /// The candidate head is checked against the current body before
    /// insertion, so a pending growth does not change the outcome.
    pub fn tick(&mut self, dims: &GridDimensions) -> SnakeTick {
        if !self.is_alive() {
            return SnakeTick::Idle;
        }
        let head = self.body.next_head(dims);
        if self.body.occupies(head, 1) {
            self.kill();
            return SnakeTick::Collided { head };
        }

        let step = self.body.advance(head);
        self.headings.push_front(self.body.direction);
        if !step.grew {
            self.headings.pop_back();
        }
        SnakeTick::Moved(step)
    }

    /// Stop for good
    pub fn kill(&mut self) {
        self.state = SnakeState::GameOver;
        self.boost_remaining = None;
    }

    pub fn refit(&mut self, dims: &GridDimensions) {
        self.body.refit(dims);
    }
}

impl GridMover for Snake {
    fn body(&self) -> &MovableBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovableBody {
        &mut self.body
    }
}
