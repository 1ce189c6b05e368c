//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through explicit `dt`
//! - Seeded RNG only
//! - Stable iteration order (enemies by id)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod enemy;
pub mod events;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;
pub mod timer;

pub use autopilot::choose_direction;
pub use body::{Fade, GridMover, MovableBody, Step};
pub use enemy::{ENEMY_FALLBACK_CELL, Enemy, Placement, RespawnRule};
pub use events::{EntityId, EventSink, GameEvent, InputEvent, NullSink};
pub use food::Food;
pub use grid::{Cell, Direction, GridDimensions, grid_distance};
pub use session::{GameSession, SessionPhase, SessionState};
pub use snake::{Snake, SnakeState, SnakeTick};
pub use timer::{FrameStepper, RepeatingTimer};
