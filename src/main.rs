//! Roll Runner headless runner
//!
//! Plays one run against the headless physics stand-in with a simple autopilot
//! and logs what happens. Set `RUST_LOG=debug` for per-event output.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec3;
    use roll_runner::Settings;
    use roll_runner::commentary::commentary_or_fallback;
    use roll_runner::consts::*;
    use roll_runner::sim::{CollisionOracle, Game, GameEvent, GamePhase, HeadlessBody, HeadlessColliders};

    env_logger::init();
    log::info!("Roll Runner (headless) starting...");

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(now_ms);

    let mut game = Game::new(
        seed,
        HeadlessBody::new(Vec3::ZERO),
        HeadlessColliders::default(),
        Settings::default(),
    );
    game.set_timestamp(now_ms as f64);
    game.start();

    // Two minutes of simulated play at most
    let max_ticks = (120.0 / SIM_DT) as u32;
    let mut ticks = 0;
    while ticks < max_ticks && game.run().phase == GamePhase::Playing {
        let input = autopilot(&game);
        for event in game.tick(&input, SIM_DT) {
            match event {
                GameEvent::GameOver { .. } | GameEvent::PatternChanged(_) => {
                    log::info!("{:?}", event)
                }
                _ => log::debug!("{:?}", event),
            }
        }
        ticks += 1;

        // Host side of the physics step: ground under the ball, then integrate
        let position = game.body().position;
        let floor = CollisionOracle::nearest_segment(game.track().window(), position)
            .filter(|s| s.footprint_contains(position))
            .map(|s| (s.surface_height_at(position.x, position.z), s.id));
        let body = game.body_mut();
        body.floor = floor;
        if let Some(contact) = body.step(SIM_DT, PLAYER_RADIUS) {
            game.push_contact(contact);
        }
    }

    let run = game.run();
    log::info!(
        "Finished after {:.1}s: score {}, {} platforms, {} coins, phase {:?}",
        ticks as f32 * SIM_DT,
        run.score,
        run.platforms_cleared,
        run.total_coins_collected,
        run.phase
    );

    if let Some(request) = game.take_commentary_request() {
        log::info!("{}", commentary_or_fallback(None, &request));
    }
}

/// Keep to the middle of the track and hop over whatever is in the way
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(
    game: &roll_runner::sim::Game<roll_runner::sim::HeadlessBody, roll_runner::sim::HeadlessColliders>,
) -> roll_runner::sim::TickInput {
    use roll_runner::sim::{CollisionOracle, TickInput};
    use roll_runner::travel_progress;

    let position = game.body().position;
    let Some(segment) = CollisionOracle::nearest_segment(game.track().window(), position) else {
        return TickInput::default();
    };
    let local = segment.world_to_local(position);

    let time = game.time();
    let blocked = game
        .track()
        .window()
        .iter()
        .flat_map(|s| &s.obstacles)
        .any(|o| {
            let at = o.world_position(time);
            let ahead = travel_progress(at) - travel_progress(position);
            (0.0..10.0).contains(&ahead) && (at.x - position.x).abs() < 2.5
        });

    TickInput {
        left: local.x > 1.0,
        right: local.x < -1.0,
        jump: blocked,
        pause: false,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host embeds the library directly on the web
}
