//! Wrap Snake - deterministic grid simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, respawns, scoring)
//! - `settings`: Tuning values and their validation
//!
//! Rendering, audio and menus live outside this crate and only consume the
//! events emitted by [`sim::GameSession`].

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings};
pub use sim::{GameEvent, GameSession, InputEvent};

/// Default tuning constants
pub mod consts {
    /// Fixed frame timestep used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum timer firings per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Smallest playable grid along either axis
    pub const MIN_GRID_CELLS: i32 = 10;

    /// Default viewport (pixels)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    pub const CELL_SIZE_PX: f32 = 32.0;

    /// Seconds between snake steps
    pub const SNAKE_TICK_SECS: f32 = 0.15;
    /// Seconds between enemy steps
    pub const ENEMY_TICK_SECS: f32 = 0.3;
    /// Seconds between enemy relocations
    pub const ENEMY_RESPAWN_SECS: f32 = 6.0;
    /// Seconds between food relocations (independent of eating)
    pub const FOOD_RESPAWN_SECS: f32 = 8.0;

    /// Tick interval multiplier while boosted
    pub const BOOST_MULTIPLIER: f32 = 0.5;
    pub const BOOST_DURATION_SECS: f32 = 0.5;

    /// A new enemy joins every N points
    pub const ENEMY_MILESTONE: u32 = 5;
    /// Minimum distance (grid units) between a respawned enemy and the avoid point
    pub const SAFE_DISTANCE: f32 = 3.0;
    pub const RESPAWN_ATTEMPTS: u32 = 100;

    pub const ENEMY_VISIBLE_SECS: f32 = 2.0;
    pub const ENEMY_FADE_SECS: f32 = 2.0;
    pub const FOOD_VISIBLE_SECS: f32 = 4.0;
    pub const FOOD_FADE_SECS: f32 = 4.0;
    /// Faded entities never drop below this alpha
    pub const ALPHA_FLOOR: f32 = 0.1;
}
