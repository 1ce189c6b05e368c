//! Wrap Snake headless runner
//!
//! Plays one seeded session in idle/demo mode and logs a summary. Useful for
//! soak-testing tuning files: `wrap-snake [settings.json]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::sync::mpsc;

    use wrap_snake::Settings;
    use wrap_snake::consts::FRAME_DT;
    use wrap_snake::sim::{EntityId, FrameStepper, GameEvent, GameSession, choose_direction};

    /// Simulated seconds before the demo gives up
    const DEMO_SECS: f32 = 120.0;

    env_logger::init();
    log::info!("Wrap Snake (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::error!("Invalid settings {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut session = GameSession::new(settings, seed);
    let (mut tx, rx) = mpsc::channel::<GameEvent>();
    let mut stepper = FrameStepper::new();

    while session.elapsed() < DEMO_SECS && !session.state().game_over {
        stepper.run(FRAME_DT, |dt| {
            if let Some(dir) = choose_direction(&session) {
                session.request_direction(dir);
            }
            session.update(dt, &mut tx);
        });
    }

    let mut snake_steps = 0;
    let mut enemy_steps = 0;
    let mut respawns = 0;
    for event in rx.try_iter() {
        match event {
            GameEvent::Moved {
                entity: EntityId::Snake,
                ..
            } => snake_steps += 1,
            GameEvent::Moved { .. } => enemy_steps += 1,
            GameEvent::Respawned { .. } => respawns += 1,
            GameEvent::ScoreChanged { score } => log::debug!("Score: {}", score),
            GameEvent::GameOver { score } => log::info!("Game over with {} points", score),
            _ => {}
        }
    }

    log::info!(
        "Seed {}: score={} length={} enemies={} elapsed={:.1}s",
        seed,
        session.score(),
        session.snake().len(),
        session.enemies().len(),
        session.elapsed()
    );
    log::info!(
        "Events: {} snake steps, {} enemy steps, {} respawns",
        snake_steps,
        enemy_steps,
        respawns
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on the web; the host page drives it
}
