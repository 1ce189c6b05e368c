//! Autonomous enemies
//!
//! An enemy walks in a fixed random direction, fades over its lifetime and is
//! periodically relocated away from the snake.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Fade, GridMover, MovableBody};
use super::grid::{Cell, Direction, GridDimensions, grid_distance};
use crate::settings::Settings;

/// Where a respawn search ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// First candidate that satisfied the constraint
    Found { cell: Cell, attempts: u32 },
    /// Every attempt failed; a fallback cell was used
    Fallback { cell: Cell },
}

impl Placement {
    pub fn cell(&self) -> Cell {
        match *self {
            Placement::Found { cell, .. } | Placement::Fallback { cell } => cell,
        }
    }
}

/// Cell used when no candidate is far enough from the avoid point
pub const ENEMY_FALLBACK_CELL: Cell = IVec2::ZERO;

/// Respawn tuning for enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RespawnRule {
    /// Minimum grid distance from the avoid point
    pub min_distance: f32,
    pub max_attempts: u32,
}

impl RespawnRule {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            min_distance: settings.safe_distance,
            max_attempts: settings.respawn_attempts,
        }
    }
}

/// An autonomous segmented entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    body: MovableBody,
    fade: Fade,
    rule: RespawnRule,
}

impl Enemy {
    /// Create an enemy at `cell` heading in a random direction
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        cell: Cell,
        fade: Fade,
        rule: RespawnRule,
        rng: &mut R,
    ) -> Self {
        Self {
            id,
            body: MovableBody::new(cell, Direction::random(rng)),
            fade,
            rule,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.cells().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Whether any segment sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.occupies(cell, 0)
    }

    /// Advance the fade clock
    pub fn age(&mut self, dt: f32) {
        self.fade.advance(dt);
    }

    pub fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    pub fn lifetime(&self) -> f32 {
        self.fade.lifetime()
    }

    /// Relocate at least `min_distance` grid units from `avoid_world`
    ///
    /// Samples up to `max_attempts` random cells and falls back to
    /// [`ENEMY_FALLBACK_CELL`] when none qualifies. Either way the body shrinks
    /// to one segment, the fade restarts and the direction is re-rolled.
    pub fn respawn_safe<R: Rng + ?Sized>(
        &mut self,
        avoid_world: Vec2,
        dims: &GridDimensions,
        rng: &mut R,
    ) -> Placement {
        let avoid = dims.to_grid(avoid_world);
        let placement = (1..=self.rule.max_attempts)
            .find_map(|attempt| {
                let cell = dims.random_cell(rng);
                (grid_distance(cell, avoid) >= self.rule.min_distance)
                    .then_some(Placement::Found { cell, attempts: attempt })
            })
            .unwrap_or(Placement::Fallback {
                cell: ENEMY_FALLBACK_CELL,
            });

        if let Placement::Fallback { cell } = placement {
            log::warn!(
                "Enemy {} found no safe cell in {} attempts, using {:?}",
                self.id,
                self.rule.max_attempts,
                cell
            );
        }

        self.body.reset(placement.cell(), Direction::random(rng));
        self.fade.reset();
        placement
    }

    pub fn refit(&mut self, dims: &GridDimensions) {
        self.body.refit(dims);
    }
}

impl GridMover for Enemy {
    fn body(&self) -> &MovableBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovableBody {
        &mut self.body
    }
}
