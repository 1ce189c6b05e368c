//! Single-cell consumable

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Fade;
use super::grid::{Cell, GridDimensions};

/// The food pellet. Never moves on its own, only respawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    cell: Cell,
    fade: Fade,
    max_attempts: u32,
}

impl Food {
    pub fn new(cell: Cell, fade: Fade, max_attempts: u32) -> Self {
        Self {
            cell,
            fade,
            max_attempts,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// World position (cell center)
    pub fn world_pos(&self, dims: &GridDimensions) -> Vec2 {
        dims.to_world_center(self.cell)
    }

    pub fn age(&mut self, dt: f32) {
        self.fade.advance(dt);
    }

    pub fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    pub fn lifetime(&self) -> f32 {
        self.fade.lifetime()
    }

    /// Jump to a random cell; always succeeds
    ///
    /// The world position is clamped into the viewport before being mapped
    /// back to a cell.
    pub fn respawn<R: Rng + ?Sized>(&mut self, dims: &GridDimensions, rng: &mut R) -> Cell {
        let sampled = dims.random_cell(rng);
        self.place(dims, sampled);
        self.cell
    }

    /// Jump to a random cell whose world position differs from `avoid_world`
    ///
    /// After `max_attempts` misses one last unchecked sample is used.
    pub fn respawn_safe<R: Rng + ?Sized>(
        &mut self,
        avoid_world: Vec2,
        dims: &GridDimensions,
        rng: &mut R,
    ) -> Cell {
        let found = (0..self.max_attempts).find_map(|_| {
            let cell = dims.random_cell(rng);
            (dims.to_world_center(cell) != avoid_world).then_some(cell)
        });
        let cell = match found {
            Some(cell) => cell,
            None => {
                log::warn!(
                    "Food found no free cell in {} attempts, placing unchecked",
                    self.max_attempts
                );
                dims.random_cell(rng)
            }
        };
        self.place(dims, cell);
        self.cell
    }

    pub fn refit(&mut self, dims: &GridDimensions) {
        self.cell = dims.fold(self.cell);
    }

    fn place(&mut self, dims: &GridDimensions, cell: Cell) {
        let world = dims.to_world_center(cell);
        let clamped = if dims.viewport.cmpgt(Vec2::ZERO).all() {
            world.clamp(Vec2::ZERO, dims.viewport)
        } else {
            world
        };
        self.cell = if dims.is_degenerate() {
            cell
        } else {
            dims.fold(dims.to_grid(clamped))
        };
        self.fade.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn food() -> Food {
        Food::new(IVec2::new(1, 1), Fade::new(4.0, 4.0, 0.1), 100)
    }

    #[test]
    fn test_respawn_stays_in_grid() {
        let mut rng = Pcg32::seed_from_u64(7);
        let dims = GridDimensions::recompute(Vec2::new(800.0, 600.0), 32.0);
        let mut food = food();
        for _ in 0..500 {
            let cell = food.respawn(&dims, &mut rng);
            assert!(dims.contains(cell));
        }
    }

    #[test]
    fn test_respawn_degenerate_dims_uses_default_grid() {
        let mut rng = Pcg32::seed_from_u64(7);
        let dims = GridDimensions {
            width: 0,
            height: -4,
            cell_size_px: 16.0,
            offset_px: Vec2::ZERO,
            viewport: Vec2::ZERO,
        };
        let mut food = food();
        for _ in 0..100 {
            let cell = food.respawn(&dims, &mut rng);
            assert!((0..10).contains(&cell.x) && (0..10).contains(&cell.y));
        }
    }

    #[test]
    fn test_respawn_clamps_into_small_viewport() {
        let mut rng = Pcg32::seed_from_u64(13);
        // 10x10 minimum grid overflows a 100x50 viewport on both axes
        let dims = GridDimensions::recompute(Vec2::new(100.0, 50.0), 32.0);
        assert!(dims.offset_px.x < 0.0 && dims.offset_px.y < 0.0);
        let mut food = food();
        for _ in 0..500 {
            let cell = food.respawn(&dims, &mut rng);
            let center = dims.to_world_center(cell);
            assert!(dims.contains(cell));
            assert!((0.0..=100.0).contains(&center.x), "{center:?}");
            assert!((0.0..=50.0).contains(&center.y), "{center:?}");
        }
    }

    #[test]
    fn test_respawn_safe_avoids_point() {
        let mut rng = Pcg32::seed_from_u64(21);
        // Smallest grid, so hitting the avoided cell by chance is common
        let dims = GridDimensions::recompute(Vec2::new(320.0, 320.0), 32.0);
        let avoid_cell = IVec2::new(4, 4);
        let avoid = dims.to_world_center(avoid_cell);
        let mut food = food();
        for _ in 0..1000 {
            assert_ne!(food.respawn_safe(avoid, &dims, &mut rng), avoid_cell);
        }
    }

    #[test]
    fn test_respawn_safe_single_cell_grid_falls_back() {
        let mut rng = Pcg32::seed_from_u64(2);
        let dims = GridDimensions {
            width: 1,
            height: 1,
            cell_size_px: 10.0,
            offset_px: Vec2::ZERO,
            viewport: Vec2::splat(10.0),
        };
        let mut food = food();
        let cell = food.respawn_safe(dims.to_world_center(IVec2::ZERO), &dims, &mut rng);
        assert_eq!(cell, IVec2::ZERO);
    }

    #[test]
    fn test_fade_thresholds() {
        let mut food = food();
        food.age(3.9);
        assert_eq!(food.alpha(), 1.0);
        food.age(2.1);
        assert!((food.alpha() - 0.55).abs() < 1e-4);
        food.age(100.0);
        assert_eq!(food.alpha(), 0.1);

        let mut rng = Pcg32::seed_from_u64(3);
        let dims = GridDimensions::recompute(Vec2::new(320.0, 320.0), 32.0);
        food.respawn(&dims, &mut rng);
        assert_eq!(food.alpha(), 1.0);
        assert_eq!(food.lifetime(), 0.0);
    }
}
