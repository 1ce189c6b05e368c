//! Session orchestration
//!
//! Owns every entity plus score/pause/game-over state, runs the four logical
//! timers and resolves collisions after every snake step and again at the end
//! of each frame.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Fade, GridMover};
use super::enemy::{Enemy, Placement, RespawnRule};
use super::events::{EntityId, EventSink, GameEvent, InputEvent};
use super::food::Food;
use super::grid::{Direction, GridDimensions};
use super::snake::{Snake, SnakeTick};
use super::timer::RepeatingTimer;
use crate::settings::Settings;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    /// Snake frozen; enemy and food timers keep running
    Paused,
    /// Terminal until restart
    GameOver,
}

/// Snapshot of the externally visible session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// The four independent timers
#[derive(Debug, Clone, Copy)]
struct Timers {
    snake: RepeatingTimer,
    enemy_move: RepeatingTimer,
    enemy_respawn: RepeatingTimer,
    food_respawn: RepeatingTimer,
}

impl Timers {
    fn new(settings: &Settings) -> Self {
        Self {
            snake: RepeatingTimer::new(settings.snake_tick_secs),
            enemy_move: RepeatingTimer::new(settings.enemy_tick_secs),
            enemy_respawn: RepeatingTimer::new(settings.enemy_respawn_secs),
            food_respawn: RepeatingTimer::new(settings.food_respawn_secs),
        }
    }
}

/// One game from start to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    dims: GridDimensions,
    snake: Snake,
    food: Food,
    /// Sorted by id
    enemies: Vec<Enemy>,
    phase: SessionPhase,
    score: u32,
    timers: Timers,
    next_enemy_id: u32,
    elapsed: f32,
    exit_requested: bool,
}

impl GameSession {
    /// Start a session; `settings` are expected to be validated already
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let dims = GridDimensions::recompute(settings.viewport(), settings.cell_size_px);

        let start = IVec2::new(dims.width / 2, dims.height / 2);
        let snake = Snake::new(
            start,
            settings.snake_tick_secs,
            settings.boost_multiplier,
            settings.boost_duration_secs,
        );

        let mut food = Food::new(
            start,
            Fade::new(
                settings.food_visible_secs,
                settings.food_fade_secs,
                settings.alpha_floor,
            ),
            settings.respawn_attempts,
        );
        food.respawn_safe(dims.to_world_center(start), &dims, &mut rng);

        let mut session = Self {
            timers: Timers::new(&settings),
            settings,
            seed,
            rng,
            dims,
            snake,
            food,
            enemies: Vec::new(),
            phase: SessionPhase::Running,
            score: 0,
            next_enemy_id: 1,
            elapsed: 0.0,
            exit_requested: false,
        };
        for _ in 0..session.settings.initial_enemies {
            session.spawn_enemy();
        }

        log::info!(
            "Session started: seed={} grid={}x{} enemies={}",
            seed,
            dims.width,
            dims.height,
            session.enemies.len()
        );
        session
    }

    // === Accessors ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn dims(&self) -> &GridDimensions {
        &self.dims
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            score: self.score,
            paused: self.phase == SessionPhase::Paused,
            game_over: self.phase == SessionPhase::GameOver,
        }
    }

    /// Simulated seconds since the session started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    // === Input ===

    pub fn handle_input<S: EventSink + ?Sized>(&mut self, input: InputEvent, sink: &mut S) {
        match input {
            InputEvent::Direction(dir) => self.request_direction(dir),
            InputEvent::TogglePause => self.toggle_pause(sink),
            InputEvent::Restart => self.restart(sink),
            InputEvent::Exit => self.exit_requested = true,
        }
    }

    /// Steer the snake; ignored unless running
    pub fn request_direction(&mut self, dir: Direction) {
        if self.phase != SessionPhase::Running {
            return;
        }
        if !self.snake.request_direction(dir) {
            log::debug!("Rejected reversal to {:?}", dir);
        }
    }

    /// Flip between running and paused; no effect after game over
    pub fn toggle_pause<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            SessionPhase::GameOver => return,
        };
        let paused = self.phase == SessionPhase::Paused;
        log::debug!("Paused: {}", paused);
        sink.emit(GameEvent::Paused(paused));
    }

    /// Replace the whole session with a fresh one on the current viewport
    pub fn restart<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        let seed = self.rng.random::<u64>();
        log::info!("Restarting (final score {})", self.score);
        *self = Self::new(self.settings.clone(), seed);
        sink.emit(GameEvent::Restarted);
        sink.emit(GameEvent::ScoreChanged { score: 0 });
    }

    /// Refit the play field to a new viewport size
    pub fn resize(&mut self, viewport: Vec2) {
        self.settings.viewport_width = viewport.x;
        self.settings.viewport_height = viewport.y;
        self.dims = GridDimensions::recompute(viewport, self.settings.cell_size_px);

        self.snake.refit(&self.dims);
        self.food.refit(&self.dims);
        for enemy in &mut self.enemies {
            enemy.refit(&self.dims);
        }
        log::debug!("Grid resized to {}x{}", self.dims.width, self.dims.height);
    }

    // === Frame update ===

    /// Advance every timer by `dt` seconds, then resolve collisions
    pub fn update<S: EventSink + ?Sized>(&mut self, dt: f32, sink: &mut S) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        self.elapsed += dt;

        self.food.age(dt);
        for enemy in &mut self.enemies {
            enemy.age(dt);
        }

        // Boost countdown runs on its own clock, paused or not
        self.snake.update_boost(dt);

        if self.phase == SessionPhase::Running {
            self.timers.snake.set_interval(self.snake.tick_interval());
            let steps = self.timers.snake.advance(dt);
            for _ in 0..steps {
                self.step_snake(sink);
                if self.phase == SessionPhase::GameOver {
                    return;
                }
                self.resolve_collisions(sink);
                if self.phase == SessionPhase::GameOver {
                    return;
                }
            }
        }

        let enemy_steps = self.timers.enemy_move.advance(dt);
        for _ in 0..enemy_steps {
            self.step_enemies(sink);
        }

        if self.timers.enemy_respawn.advance(dt) > 0 {
            self.respawn_enemies(sink);
        }

        if self.timers.food_respawn.advance(dt) > 0 {
            let avoid = self.dims.to_world_center(self.snake.head());
            let cell = self.food.respawn_safe(avoid, &self.dims, &mut self.rng);
            sink.emit(GameEvent::Respawned {
                entity: EntityId::Food,
                cell,
            });
        }

        // Enemies may have stepped onto a head that did not move this frame
        if self.phase == SessionPhase::Running {
            self.check_enemy_hit(sink);
        }
    }

    fn step_snake<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        match self.snake.tick(&self.dims) {
            SnakeTick::Moved(step) => {
                sink.emit(GameEvent::Moved {
                    entity: EntityId::Snake,
                    head: step.head,
                });
                if step.grew {
                    sink.emit(GameEvent::Grew {
                        entity: EntityId::Snake,
                    });
                }
            }
            SnakeTick::Collided { head } => {
                log::info!("Snake ran into itself at {:?}", head);
                self.end_game(sink);
            }
            SnakeTick::Idle => {}
        }
    }

    fn step_enemies<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        for enemy in &mut self.enemies {
            let step = enemy.step(&self.dims);
            let entity = EntityId::Enemy(enemy.id);
            sink.emit(GameEvent::Moved {
                entity,
                head: step.head,
            });
            if step.grew {
                sink.emit(GameEvent::Grew { entity });
            }
        }
    }

    fn respawn_enemies<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        let avoid = self.dims.to_world_center(self.snake.head());
        for enemy in &mut self.enemies {
            let placement = enemy.respawn_safe(avoid, &self.dims, &mut self.rng);
            log::debug!("Enemy {} respawned: {:?}", enemy.id, placement);
            sink.emit(GameEvent::Respawned {
                entity: EntityId::Enemy(enemy.id),
                cell: placement.cell(),
            });
        }
    }

    /// Food pickup, milestone spawns and enemy hits against the snake head
    fn resolve_collisions<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        let head_world = self.dims.to_world_center(self.snake.head());
        if head_world.distance(self.food.world_pos(&self.dims)) < self.dims.cell_size_px / 2.0 {
            self.eat_food(sink);
        }
        self.check_enemy_hit(sink);
    }

    fn check_enemy_hit<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        let head = self.snake.head();
        let hit = self
            .enemies
            .iter()
            .find(|enemy| enemy.occupies(head))
            .map(|enemy| enemy.id);
        if let Some(id) = hit {
            log::info!("Snake hit enemy {} at {:?}", id, head);
            self.end_game(sink);
        }
    }

    fn eat_food<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        self.snake.grow();
        let cell = self.food.respawn(&self.dims, &mut self.rng);
        sink.emit(GameEvent::Respawned {
            entity: EntityId::Food,
            cell,
        });

        self.score += 1;
        sink.emit(GameEvent::ScoreChanged { score: self.score });

        if self.score.checked_rem(self.settings.enemy_milestone) == Some(0) {
            for enemy in &mut self.enemies {
                enemy.grow();
            }
            let id = self.spawn_enemy();
            log::info!(
                "Score {} reached, enemy {} joins ({} total)",
                self.score,
                id,
                self.enemies.len()
            );
            sink.emit(GameEvent::EnemySpawned { id });
        }
    }

    /// Add an enemy placed away from the snake head, returning its id
    fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;

        let fade = Fade::new(
            self.settings.enemy_visible_secs,
            self.settings.enemy_fade_secs,
            self.settings.alpha_floor,
        );
        let rule = RespawnRule::from_settings(&self.settings);
        let mut enemy = Enemy::new(id, IVec2::ZERO, fade, rule, &mut self.rng);
        let avoid = self.dims.to_world_center(self.snake.head());
        if let Placement::Fallback { .. } = enemy.respawn_safe(avoid, &self.dims, &mut self.rng) {
            log::warn!("Enemy {} spawned at fallback cell", id);
        }
        self.enemies.push(enemy);
        id
    }

    fn end_game<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        self.snake.kill();
        self.phase = SessionPhase::GameOver;
        log::info!("Game over: score={} elapsed={:.1}s", self.score, self.elapsed);
        sink.emit(GameEvent::GameOver { score: self.score });
    }
}
