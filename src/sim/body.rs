//! Shared movement capability for segmented grid entities
//!
//! Every moving entity owns a [`MovableBody`] and exposes it through
//! [`GridMover`], so the wrap-around step lives in exactly one place.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, GridDimensions};

/// Outcome of one movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub head: Cell,
    /// Tail was kept because growth was pending
    pub grew: bool,
}

/// Ordered body of cells, head first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovableBody {
    cells: VecDeque<Cell>,
    pub direction: Direction,
    pending_growth: bool,
}

impl MovableBody {
    pub fn new(seed: Cell, direction: Direction) -> Self {
        Self {
            cells: VecDeque::from([seed]),
            direction,
            pending_growth: false,
        }
    }

    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    pub fn tail(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn cells(&self) -> &VecDeque<Cell> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Bodies always hold at least one segment
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// Keep the tail on the next step. Idempotent while pending.
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Candidate head for the next step, wrapped into `dims`
    pub fn next_head(&self, dims: &GridDimensions) -> Cell {
        dims.wrap(self.head() + self.direction.vector())
    }

    /// Insert `head` and either consume pending growth or drop the tail
    pub fn advance(&mut self, head: Cell) -> Step {
        self.cells.push_front(head);
        let grew = std::mem::take(&mut self.pending_growth);
        if !grew {
            self.cells.pop_back();
        }
        Step { head, grew }
    }

    /// Whether `cell` lies on the body, ignoring the first `skip` segments
    pub fn occupies(&self, cell: Cell, skip: usize) -> bool {
        self.cells.iter().skip(skip).any(|&c| c == cell)
    }

    /// Replace the whole body with a single segment
    pub fn reset(&mut self, cell: Cell, direction: Direction) {
        self.cells.clear();
        self.cells.push_back(cell);
        self.direction = direction;
        self.pending_growth = false;
    }

    /// Fold every segment into new bounds after a resize
    pub fn refit(&mut self, dims: &GridDimensions) {
        for cell in self.cells.iter_mut() {
            *cell = dims.fold(*cell);
        }
    }
}

/// Movement capability shared by the snake and enemies
pub trait GridMover {
    fn body(&self) -> &MovableBody;
    fn body_mut(&mut self) -> &mut MovableBody;

    fn head(&self) -> Cell {
        self.body().head()
    }

    fn direction(&self) -> Direction {
        self.body().direction
    }

    fn grow(&mut self) {
        self.body_mut().grow();
    }

    /// Plain wrap-around step with no collision check
    fn step(&mut self, dims: &GridDimensions) -> Step {
        let head = self.body().next_head(dims);
        self.body_mut().advance(head)
    }
}

/// Visibility over an entity's lifetime
///
/// Fully opaque for `visible_secs`, then a linear ramp down to `floor` over
/// `fade_secs`, clamped at `floor` afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    pub visible_secs: f32,
    pub fade_secs: f32,
    pub floor: f32,
    lifetime: f32,
}

impl Fade {
    pub fn new(visible_secs: f32, fade_secs: f32, floor: f32) -> Self {
        Self {
            visible_secs,
            fade_secs,
            floor,
            lifetime: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.lifetime += dt.max(0.0);
    }

    pub fn reset(&mut self) {
        self.lifetime = 0.0;
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Render intensity in `[floor, 1]`
    pub fn alpha(&self) -> f32 {
        let fading = self.lifetime - self.visible_secs;
        if fading <= 0.0 {
            return 1.0;
        }
        if fading >= self.fade_secs {
            return self.floor;
        }
        let t = fading / self.fade_secs;
        (1.0 - t * (1.0 - self.floor)).max(self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, Vec2};
    use proptest::prelude::*;

    fn dims(width: i32, height: i32) -> GridDimensions {
        GridDimensions {
            width,
            height,
            cell_size_px: 10.0,
            offset_px: Vec2::ZERO,
            viewport: Vec2::new(width as f32, height as f32) * 10.0,
        }
    }

    struct Walker(MovableBody);

    impl GridMover for Walker {
        fn body(&self) -> &MovableBody {
            &self.0
        }
        fn body_mut(&mut self) -> &mut MovableBody {
            &mut self.0
        }
    }

    #[test]
    fn test_step_moves_head_and_drops_tail() {
        let mut walker = Walker(MovableBody::new(IVec2::new(2, 2), Direction::Right));
        let step = walker.step(&dims(10, 10));
        assert_eq!(step, Step { head: IVec2::new(3, 2), grew: false });
        assert_eq!(walker.body().len(), 1);
        assert_eq!(walker.head(), IVec2::new(3, 2));
    }

    #[test]
    fn test_growth_consumed_once() {
        let grid = dims(10, 10);
        let mut walker = Walker(MovableBody::new(IVec2::new(0, 0), Direction::Down));
        walker.grow();
        walker.grow();
        assert!(walker.step(&grid).grew);
        assert_eq!(walker.body().len(), 2);
        assert!(!walker.body().pending_growth());

        assert!(!walker.step(&grid).grew);
        assert_eq!(walker.body().len(), 2);
        assert_eq!(walker.body().tail(), IVec2::new(0, 1));
    }

    #[test]
    fn test_step_wraps_left_edge() {
        let mut walker = Walker(MovableBody::new(IVec2::new(0, 5), Direction::Left));
        assert_eq!(walker.step(&dims(12, 10)).head, IVec2::new(11, 5));
    }

    #[test]
    fn test_refit_folds_cells() {
        let mut body = MovableBody::new(IVec2::new(14, 3), Direction::Up);
        body.refit(&dims(10, 10));
        assert_eq!(body.head(), IVec2::new(4, 3));
    }

    #[test]
    fn test_fade_shape() {
        let mut fade = Fade::new(2.0, 2.0, 0.1);
        assert_eq!(fade.alpha(), 1.0);
        fade.advance(2.0);
        assert_eq!(fade.alpha(), 1.0);
        fade.advance(1.0);
        assert!((fade.alpha() - 0.55).abs() < 1e-5);
        fade.advance(10.0);
        assert_eq!(fade.alpha(), 0.1);
        fade.reset();
        assert_eq!(fade.alpha(), 1.0);
    }

    proptest! {
        #[test]
        fn step_length_tracks_pending_growth(
            grows in proptest::collection::vec(any::<bool>(), 1..40),
            dir in 0usize..4,
        ) {
            let grid = dims(11, 13);
            let mut walker = Walker(MovableBody::new(IVec2::new(5, 5), Direction::ALL[dir]));
            for grow in grows {
                if grow {
                    walker.grow();
                }
                let before = walker.body().len();
                walker.step(&grid);
                let expected = if grow { before + 1 } else { before };
                prop_assert_eq!(walker.body().len(), expected);
                prop_assert!(grid.contains(walker.head()));
            }
        }

        #[test]
        fn fade_never_increases(steps in proptest::collection::vec(0.0f32..1.5, 1..30)) {
            let mut fade = Fade::new(4.0, 4.0, 0.1);
            let mut last = fade.alpha();
            for dt in steps {
                fade.advance(dt);
                let alpha = fade.alpha();
                prop_assert!(alpha <= last);
                prop_assert!(alpha >= 0.1);
                last = alpha;
            }
        }
    }
}
