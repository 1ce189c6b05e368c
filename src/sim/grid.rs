//! Grid coordinate system
//!
//! Converts between discrete grid cells and world (pixel) space. The play field
//! is centered inside the viewport and wraps around at every edge.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_GRID_CELLS;

/// A grid cell, `(0, 0)` is the top-left corner
pub type Cell = IVec2;

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid space (y grows downward)
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Uniformly random cardinal direction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Derived play-field geometry for one viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Cells along x
    pub width: i32,
    /// Cells along y
    pub height: i32,
    pub cell_size_px: f32,
    /// Top-left corner of the play field in world space
    pub offset_px: Vec2,
    pub viewport: Vec2,
}

impl GridDimensions {
    /// Fit a grid into `viewport`
    ///
    /// Each axis holds as many whole cells as fit, but never fewer than
    /// [`MIN_GRID_CELLS`]. The minimum wins over the viewport fit: a viewport
    /// too small for it gets a field larger than the viewport, centered with a
    /// negative offset, instead of being clamped back down.
    pub fn recompute(viewport: Vec2, cell_size_px: f32) -> Self {
        let fit = |extent: f32| -> i32 {
            if cell_size_px > 0.0 && extent.is_finite() {
                ((extent / cell_size_px).floor() as i32).max(MIN_GRID_CELLS)
            } else {
                MIN_GRID_CELLS
            }
        };
        let width = fit(viewport.x);
        let height = fit(viewport.y);
        let grid_px = Vec2::new(width as f32, height as f32) * cell_size_px;

        Self {
            width,
            height,
            cell_size_px,
            offset_px: (viewport - grid_px) / 2.0,
            viewport,
        }
    }

    /// True when either axis is unusable
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Top-left corner of `cell` in world space
    pub fn to_world(&self, cell: Cell) -> Vec2 {
        self.offset_px + cell.as_vec2() * self.cell_size_px
    }

    /// Center of `cell` in world space
    pub fn to_world_center(&self, cell: Cell) -> Vec2 {
        self.to_world(cell) + Vec2::splat(self.cell_size_px / 2.0)
    }

    /// Cell containing the world position
    pub fn to_grid(&self, world: Vec2) -> Cell {
        ((world - self.offset_px) / self.cell_size_px).floor().as_ivec2()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Single-step wrap: one past an edge re-enters at the opposite edge
    pub fn wrap(&self, mut cell: Cell) -> Cell {
        if cell.x >= self.width {
            cell.x = 0;
        } else if cell.x < 0 {
            cell.x = self.width - 1;
        }
        if cell.y >= self.height {
            cell.y = 0;
        } else if cell.y < 0 {
            cell.y = self.height - 1;
        }
        cell
    }

    /// Fold an arbitrary cell into bounds (used after a resize shrinks the grid)
    pub fn fold(&self, cell: Cell) -> Cell {
        IVec2::new(
            cell.x.rem_euclid(self.width.max(1)),
            cell.y.rem_euclid(self.height.max(1)),
        )
    }

    /// Uniformly random cell, using a minimum-size grid if these dimensions are unusable
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let (w, h) = if self.is_degenerate() {
            (MIN_GRID_CELLS, MIN_GRID_CELLS)
        } else {
            (self.width, self.height)
        };
        IVec2::new(rng.random_range(0..w), rng.random_range(0..h))
    }
}

/// Euclidean distance between two cells in grid units
pub fn grid_distance(a: Cell, b: Cell) -> f32 {
    (a - b).as_vec2().length()
}
