//! Idle/demo mode - picks snake directions on behalf of the player
//!
//! Greedy: head for the food along the shorter wrapped path while refusing
//! cells that would end the run on the next step.

use super::body::GridMover;
use super::grid::{Cell, Direction, GridDimensions};
use super::session::{GameSession, SessionPhase};

/// Per-axis distance on a wrap-around grid
fn wrapped_distance(a: Cell, b: Cell, dims: &GridDimensions) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.min(dims.width - dx) + dy.min(dims.height - dy)
}

/// Direction to request this frame, or `None` to keep going straight
pub fn choose_direction(session: &GameSession) -> Option<Direction> {
    if session.phase() != SessionPhase::Running {
        return None;
    }
    let dims = session.dims();
    let snake = session.snake();
    let current = snake.direction();
    let target = session.food().cell();

    let blocked = |cell: Cell| {
        snake.body().occupies(cell, 1) || session.enemies().iter().any(|e| e.occupies(cell))
    };

    // Current direction first so ties keep going straight
    let candidates = std::iter::once(current).chain(
        Direction::ALL
            .into_iter()
            .filter(|&d| d != current && d != current.opposite()),
    );

    let best = candidates
        .map(|dir| (dir, dims.wrap(snake.head() + dir.vector())))
        .filter(|&(_, cell)| !blocked(cell))
        .min_by_key(|&(_, cell)| wrapped_distance(cell, target, dims))
        .map(|(dir, _)| dir)?;

    (best != current).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::events::NullSink;
    use glam::{IVec2, Vec2};

    fn settings() -> Settings {
        Settings {
            viewport_width: 640.0,
            viewport_height: 640.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_wrapped_distance_prefers_short_way_round() {
        let dims = GridDimensions::recompute(Vec2::new(640.0, 640.0), 32.0);
        assert_eq!(wrapped_distance(IVec2::new(0, 0), IVec2::new(19, 0), &dims), 1);
        assert_eq!(wrapped_distance(IVec2::new(2, 3), IVec2::new(5, 7), &dims), 7);
    }

    #[test]
    fn test_never_reverses() {
        let session = GameSession::new(settings(), 5);
        let current = session.snake().direction();
        if let Some(dir) = choose_direction(&session) {
            assert_ne!(dir, current.opposite());
        }
    }

    #[test]
    fn test_idle_when_paused() {
        let mut session = GameSession::new(settings(), 5);
        session.toggle_pause(&mut NullSink);
        assert_eq!(choose_direction(&session), None);
    }

    #[test]
    fn test_autopilot_eats() {
        let mut session = GameSession::new(settings(), 17);
        for _ in 0..(60 * 30) {
            if let Some(dir) = choose_direction(&session) {
                session.request_direction(dir);
            }
            session.update(1.0 / 60.0, &mut NullSink);
            if session.state().game_over {
                break;
            }
        }
        assert!(session.score() > 0);
    }
}
