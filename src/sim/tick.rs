//! Fixed timestep simulation tick
//!
//! `Game` owns every component and advances them in a fixed order:
//! read the body once, apply forces, grow/prune the track, sync colliders,
//! query collisions, then apply the resulting events to the run state.

use glam::Vec3;

use super::collision::{self, CollisionOracle, OracleEvent};
use super::physics::{ColliderWorld, ContactEvent, PlayerBody};
use super::player::{MoveInput, PlayerLocomotion, PlayerVisual};
use super::segment::{CoinId, HeartId, ObstacleId, Pattern};
use super::state::{GamePhase, RunState};
use super::track::{TrackChanges, TrackStream};
use crate::commentary::{CommentaryQueue, CommentaryRequest};
use crate::consts::*;
use crate::persistence::SaveData;
use crate::settings::Settings;
use crate::shop::BallSkin;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn movement(&self) -> MoveInput {
        MoveInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// What happened during a tick, for audio/UI/renderer hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted { run: u32 },
    PlatformCleared { index: u32, score: u64 },
    PatternChanged(Pattern),
    CoinCollected(CoinId),
    HeartCollected { id: HeartId, lives: u8 },
    ObstacleHit(ObstacleId),
    Fell,
    LifeLost { lives: u8 },
    Respawned { position: Vec3 },
    GameOver { score: u64, high_score: u64, rank: Option<usize> },
}

/// Track seed for a given run, so every retry gets a fresh but reproducible track
pub fn run_seed(seed: u64, run: u32) -> u64 {
    seed.wrapping_add((run as u64).wrapping_mul(2654435761))
}

/// The whole simulation
pub struct Game<B: PlayerBody, W: ColliderWorld> {
    seed: u64,
    run: RunState,
    track: TrackStream,
    oracle: CollisionOracle,
    player: PlayerLocomotion<B>,
    colliders: W,
    settings: Settings,
    /// Phase seen at the end of the previous lifecycle sync
    last_phase: GamePhase,
    /// Collision-begin events waiting for the next tick
    contacts: Vec<ContactEvent>,
    /// Simulation time this run (seconds)
    time: f32,
    /// Obstacle immunity left (seconds)
    invulnerable: f32,
    commentary: CommentaryQueue,
    events: Vec<GameEvent>,
    /// Host wall clock for leaderboard entries (ms)
    timestamp_ms: f64,
}

impl<B: PlayerBody, W: ColliderWorld> Game<B, W> {
    pub fn new(seed: u64, body: B, colliders: W, settings: Settings) -> Self {
        log::info!("Game created with seed {}", seed);
        Self {
            seed,
            run: RunState::new(),
            track: TrackStream::new(seed),
            oracle: CollisionOracle::new(),
            player: PlayerLocomotion::new(body),
            colliders,
            settings,
            last_phase: GamePhase::Menu,
            contacts: Vec::new(),
            time: 0.0,
            invulnerable: 0.0,
            commentary: CommentaryQueue::default(),
            events: Vec::new(),
            timestamp_ms: 0.0,
        }
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn track(&self) -> &TrackStream {
        &self.track
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
    }

    pub fn colliders(&self) -> &W {
        &self.colliders
    }

    /// The physics body, for the host to step
    pub fn body(&self) -> &B {
        self.player.body()
    }

    pub fn body_mut(&mut self) -> &mut B {
        self.player.body_mut()
    }

    pub fn player_visual(&self) -> PlayerVisual {
        self.player.visual()
    }

    pub fn camera(&self) -> Vec3 {
        self.player.camera()
    }

    /// Simulation time of the current run
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_timestamp(&mut self, timestamp_ms: f64) {
        self.timestamp_ms = timestamp_ms;
    }

    /// Collision-begin callback. Consumed at the start of the next tick.
    pub fn push_contact(&mut self, contact: ContactEvent) {
        self.contacts.push(contact);
    }

    /// The commentary request for the last game over, handed out once
    pub fn take_commentary_request(&mut self) -> Option<CommentaryRequest> {
        self.commentary.take()
    }

    pub fn start(&mut self) -> bool {
        let ok = self.run.start_run();
        self.sync_lifecycle();
        ok
    }

    pub fn retry(&mut self) -> bool {
        let ok = self.run.retry();
        self.sync_lifecycle();
        ok
    }

    pub fn toggle_pause(&mut self) -> bool {
        let ok = self.run.toggle_pause();
        self.sync_lifecycle();
        ok
    }

    pub fn return_to_menu(&mut self) -> bool {
        let ok = self.run.return_to_menu();
        self.sync_lifecycle();
        ok
    }

    pub fn open_screen(&mut self, screen: GamePhase) -> bool {
        let ok = self.run.open_screen(screen);
        self.sync_lifecycle();
        ok
    }

    /// Window lost focus
    pub fn on_focus_lost(&mut self) {
        if self.settings.pause_on_focus_loss && self.run.phase == GamePhase::Playing {
            self.toggle_pause();
        }
    }

    pub fn purchase(&mut self, skin: BallSkin) -> bool {
        self.run.purchase(skin)
    }

    pub fn equip(&mut self, skin: BallSkin) -> bool {
        self.run.equip(skin)
    }

    pub fn save_data(&self) -> SaveData {
        SaveData::capture(&self.run, &self.settings)
    }

    pub fn load_save(&mut self, data: &SaveData) {
        data.apply_to(&mut self.run);
        self.set_settings(data.settings.clone());
    }

    /// Reseed on entering PLAYING from MENU or GAME_OVER, once per edge
    fn sync_lifecycle(&mut self) {
        let phase = self.run.phase;
        let previous = std::mem::replace(&mut self.last_phase, phase);
        if phase == GamePhase::Playing
            && matches!(previous, GamePhase::Menu | GamePhase::GameOver)
        {
            self.begin_run();
        }
    }

    fn begin_run(&mut self) {
        let run = self.run.runs_started;
        let changes = self.track.reseed(run_seed(self.seed, run), self.run.pattern);
        self.apply_track_changes(&changes);
        self.oracle.reset();

        let spawn = self
            .track
            .window()
            .first()
            .map(|s| s.spawn_point(PLAYER_RADIUS))
            .unwrap_or(Vec3::Y * PLAYER_RADIUS);
        self.player.reset(spawn, &self.settings);

        self.contacts.clear();
        self.time = 0.0;
        self.invulnerable = 0.0;
        self.events.push(GameEvent::RunStarted { run });
    }

    fn apply_track_changes(&mut self, changes: &TrackChanges) {
        for segment in &changes.evicted {
            collision::unregister_segment(&mut self.colliders, segment);
        }
        for id in &changes.spawned {
            if let Some(segment) = self.track.segment(*id) {
                collision::register_segment(&mut self.colliders, segment);
            }
        }
    }

    /// Advance the game by one timestep. Returns the events it produced.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        if input.pause {
            self.toggle_pause();
        }
        self.sync_lifecycle();

        if !self.run.phase.is_simulating() {
            // Anything the engine reported while stopped is stale
            self.contacts.clear();
            return std::mem::take(&mut self.events);
        }

        self.time += dt;
        self.invulnerable = (self.invulnerable - dt).max(0.0);

        let snapshot = self.player.read_body();
        let contacts = std::mem::take(&mut self.contacts);
        let summary = CollisionOracle::resolve_contacts(&contacts);
        if summary.grounded {
            self.player.set_grounded();
        }

        self.run.sync_speed();
        self.player
            .tick(input.movement(), dt, self.run.speed, &self.settings);

        let changes = self.track.advance(snapshot.position, self.run.pattern);
        self.apply_track_changes(&changes);
        collision::sync_moving_obstacles(&mut self.colliders, self.track.window(), self.time);

        self.run.raise_distance_score(self.player.distance_score());

        let probe = CollisionOracle::probe_position(snapshot.position);
        let obstacle = summary.obstacle.filter(|_| self.invulnerable <= 0.0);
        let observed = self.oracle.evaluate(&self.track, probe, obstacle);
        for event in observed {
            if !self.apply(event, probe) {
                break;
            }
        }

        self.last_phase = self.run.phase;
        std::mem::take(&mut self.events)
    }

    /// Returns false once the run is over
    fn apply(&mut self, event: OracleEvent, probe: Vec3) -> bool {
        match event {
            OracleEvent::PlatformCleared { index } => {
                let switched = self.run.credit_platform();
                self.events.push(GameEvent::PlatformCleared {
                    index,
                    score: self.run.score,
                });
                if let Some(pattern) = switched {
                    self.events.push(GameEvent::PatternChanged(pattern));
                }
            }
            OracleEvent::CoinTouched(id) => {
                if self.track.mark_coin_collected(id) {
                    self.run.collect_coin();
                    log::debug!("Coin collected ({} this run)", self.run.total_coins_collected);
                    self.events.push(GameEvent::CoinCollected(id));
                }
            }
            OracleEvent::HeartTouched(id) => {
                if self.track.mark_heart_collected(id) {
                    self.run.collect_heart();
                    self.events.push(GameEvent::HeartCollected {
                        id,
                        lives: self.run.lives,
                    });
                }
            }
            OracleEvent::ObstacleHit(id) => {
                log::debug!("Hit obstacle {:?}", id);
                self.events.push(GameEvent::ObstacleHit(id));
                return self.lose_life(None);
            }
            OracleEvent::Fell { depth } => {
                log::debug!("Fell {:.1} below the track", depth);
                self.events.push(GameEvent::Fell);
                let respawn = CollisionOracle::nearest_segment(self.track.window(), probe)
                    .map(|s| s.spawn_point(PLAYER_RADIUS));
                return self.lose_life(respawn);
            }
        }
        true
    }

    fn lose_life(&mut self, respawn: Option<Vec3>) -> bool {
        let terminal = self.run.lose_life();
        self.invulnerable = INVULNERABLE_SECS;
        self.events.push(GameEvent::LifeLost {
            lives: self.run.lives,
        });

        if terminal {
            if let Some(rank) = self.run.end_run(self.timestamp_ms) {
                self.events.push(GameEvent::GameOver {
                    score: self.run.score,
                    high_score: self.run.high_score,
                    rank,
                });
                self.commentary.request(CommentaryRequest {
                    run: self.run.runs_started,
                    score: self.run.score,
                    high_score: self.run.high_score,
                });
            }
            return false;
        }

        if let Some(position) = respawn {
            self.player.respawn(position);
            self.events.push(GameEvent::Respawned { position });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::{BodyTag, HeadlessBody, HeadlessColliders};
    use crate::sim::segment::{SegmentId, SegmentVariant};

    type TestGame = Game<HeadlessBody, HeadlessColliders>;

    fn new_game(seed: u64) -> TestGame {
        Game::new(
            seed,
            HeadlessBody::new(Vec3::ZERO),
            HeadlessColliders::default(),
            Settings::default(),
        )
    }

    fn started(seed: u64) -> TestGame {
        let mut game = new_game(seed);
        assert!(game.start());
        game
    }

    /// Move the body so the collision probe lands exactly on `point`
    fn put_probe_at(game: &mut TestGame, point: Vec3) {
        game.body_mut().teleport(point - PLAYER_PROBE_OFFSET);
    }

    fn idle(game: &mut TestGame) -> Vec<GameEvent> {
        game.tick(&TickInput::default(), SIM_DT)
    }

    fn assert_safe_opening(game: &TestGame) {
        let window = game.track().window();
        assert_eq!(window.len(), OPENING_SEGMENTS as usize);
        assert!(window[0].start().abs_diff_eq(Vec3::ZERO, 1e-5));
        for (i, seg) in window.iter().enumerate() {
            assert_eq!(seg.index, i as u32);
        }
        for seg in &window[..SAFE_START_SEGMENTS as usize] {
            assert_eq!(seg.variant, SegmentVariant::Normal);
            assert!(seg.obstacles.is_empty());
        }
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut game = new_game(1);
        assert!(idle(&mut game).is_empty());
        assert!(game.track().window().is_empty());
        assert_eq!(game.time(), 0.0);
    }

    #[test]
    fn test_start_seeds_track_and_colliders() {
        let mut game = started(1);
        assert_safe_opening(&game);
        let expected: usize = game
            .track()
            .window()
            .iter()
            .map(|s| 1 + s.obstacles.len())
            .sum();
        assert_eq!(game.colliders().len(), expected);

        let events = idle(&mut game);
        assert!(events.contains(&GameEvent::RunStarted { run: 1 }));
        // Player sits on the first segment
        let first = &game.track().window()[0];
        assert!(first.footprint_contains(game.body().position));
    }

    #[test]
    fn test_reseed_is_edge_triggered() {
        let mut game = started(2);
        let first_id = game.track().window()[0].id;
        for _ in 0..5 {
            idle(&mut game);
        }
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        game.tick(&pause, SIM_DT);
        assert_eq!(game.run().phase, GamePhase::Paused);
        for _ in 0..5 {
            idle(&mut game);
        }
        game.tick(&pause, SIM_DT);
        assert_eq!(game.run().phase, GamePhase::Playing);
        idle(&mut game);
        assert_eq!(game.track().window()[0].id, first_id);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = started(3);
        idle(&mut game);
        assert!(game.toggle_pause());
        let time = game.time();
        let position = game.body().position;
        game.push_contact(ContactEvent::with_player(BodyTag::Track(SegmentId(1))));
        for _ in 0..10 {
            assert!(idle(&mut game).is_empty());
        }
        assert_eq!(game.time(), time);
        assert_eq!(game.body().position, position);

        // Contacts reported while paused are dropped
        assert!(game.toggle_pause());
        assert!(game.contacts.is_empty());
    }

    #[test]
    fn test_focus_loss_pauses() {
        let mut game = started(3);
        game.on_focus_lost();
        assert_eq!(game.run().phase, GamePhase::Paused);
        game.on_focus_lost();
        assert_eq!(game.run().phase, GamePhase::Paused);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut game = started(4);
        idle(&mut game);
        let coin_pos = game.track().window()[1].coin_world_position().unwrap();

        put_probe_at(&mut game, coin_pos);
        let first = idle(&mut game);
        put_probe_at(&mut game, coin_pos);
        let second = idle(&mut game);

        let count = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::CoinCollected(_)))
                .count()
        };
        assert!(count(&first) >= 1);
        assert_eq!(count(&second), 0);
        assert_eq!(game.run().coins as usize, count(&first));
        assert_eq!(game.run().total_coins_collected as usize, count(&first));
    }

    /// Hop the player to the frontier until `found` holds for the window
    fn walk_until(game: &mut TestGame, found: impl Fn(&TestGame) -> bool) {
        let mut guard = 0;
        while !found(game) {
            let last = game.track().last().unwrap().center;
            put_probe_at(game, last);
            idle(game);
            // Stay on the obstacle pattern
            game.run.pattern_progress = 0;
            guard += 1;
            assert!(guard < 200, "walked too far");
        }
        assert_eq!(game.run().phase, GamePhase::Playing);
    }

    fn walk_to_heart(game: &mut TestGame) -> Vec3 {
        let index = HEART_INTERVAL;
        walk_until(game, |g| g.track().by_index(index).is_some());
        game.track()
            .by_index(index)
            .and_then(|s| s.heart_world_position())
            .unwrap()
    }

    #[test]
    fn test_heart_adds_life_once() {
        let mut game = started(4);
        let heart_pos = walk_to_heart(&mut game);
        assert_eq!(game.run().lives, START_LIVES);

        put_probe_at(&mut game, heart_pos);
        let first = idle(&mut game);
        put_probe_at(&mut game, heart_pos);
        let second = idle(&mut game);

        let hearts = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::HeartCollected { .. }))
                .count()
        };
        assert_eq!(hearts(&first), 1);
        assert_eq!(hearts(&second), 0);
        assert_eq!(game.run().lives, START_LIVES + 1);
    }

    #[test]
    fn test_heart_at_max_lives_is_consumed() {
        let mut game = started(4);
        let heart_pos = walk_to_heart(&mut game);
        game.run.lives = MAX_LIVES;

        put_probe_at(&mut game, heart_pos);
        let events = idle(&mut game);
        let collected = events
            .iter()
            .any(|e| matches!(e, GameEvent::HeartCollected { lives, .. } if *lives == MAX_LIVES));
        assert!(collected);
        assert_eq!(game.run().lives, MAX_LIVES);

        put_probe_at(&mut game, heart_pos);
        let events = idle(&mut game);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::HeartCollected { .. })));
    }

    #[test]
    fn test_tick_moves_obstacle_colliders() {
        let mut game = started(4);
        let has_moving = |g: &TestGame| {
            g.track()
                .window()
                .iter()
                .any(|s| s.obstacles.iter().any(|o| o.is_moving()))
        };
        walk_until(&mut game, has_moving);

        let obstacle = game
            .track()
            .window()
            .iter()
            .flat_map(|s| &s.obstacles)
            .find(|o| o.is_moving())
            .unwrap()
            .clone();
        let tag = BodyTag::Obstacle(obstacle.id);

        let mut positions = Vec::new();
        for _ in 0..3 {
            idle(&mut game);
            let collider = game.colliders().get(tag).unwrap();
            assert!(collider.kinematic);
            assert!(collider.position.abs_diff_eq(obstacle.world_position(game.time()), 1e-4));
            positions.push(collider.position);
        }
        assert_ne!(positions[0], positions[2]);
    }

    #[test]
    fn test_obstacle_hit_with_spare_life() {
        let mut game = started(5);
        game.run.lives = 2;
        let obstacle = ObstacleId {
            segment: SegmentId(999),
            slot: 0,
        };
        game.push_contact(ContactEvent::with_player(BodyTag::Obstacle(obstacle)));
        let events = idle(&mut game);
        assert!(events.contains(&GameEvent::ObstacleHit(obstacle)));
        assert!(events.contains(&GameEvent::LifeLost { lives: 1 }));
        assert_eq!(game.run().phase, GamePhase::Playing);

        // Immune right after the hit
        game.push_contact(ContactEvent::with_player(BodyTag::Obstacle(obstacle)));
        let events = idle(&mut game);
        assert!(!events.contains(&GameEvent::ObstacleHit(obstacle)));
        assert_eq!(game.run().lives, 1);
    }

    #[test]
    fn test_track_contact_grounds_player() {
        let mut game = started(5);
        game.push_contact(ContactEvent::with_player(BodyTag::Track(SegmentId(1))));
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        game.tick(&jump, SIM_DT);
        assert_eq!(game.body().velocity.y, JUMP_IMPULSE);
        // Second jump without a new contact does nothing
        game.body_mut().velocity = Vec3::ZERO;
        game.tick(&jump, SIM_DT);
        assert_eq!(game.body().velocity.y, 0.0);
    }

    #[test]
    fn test_fall_with_spare_life_respawns() {
        let mut game = started(6);
        game.run.lives = 2;
        let seg = game.track().window()[2].clone();
        put_probe_at(&mut game, seg.center - Vec3::Y * (FALL_MARGIN + 5.0));
        let events = idle(&mut game);
        assert!(events.contains(&GameEvent::Fell));
        assert!(events.contains(&GameEvent::LifeLost { lives: 1 }));
        let respawned = events.iter().any(|e| matches!(e, GameEvent::Respawned { .. }));
        assert!(respawned);
        assert!(seg.footprint_contains(game.body().position));
        assert_eq!(game.run().phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_run_and_requests_commentary_once() {
        let mut game = started(7);
        idle(&mut game);
        let seg = game.track().window()[0].clone();
        put_probe_at(&mut game, seg.center - Vec3::Y * (FALL_MARGIN + 5.0));
        let events = idle(&mut game);
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert_eq!(game.run().phase, GamePhase::GameOver);
        assert_eq!(game.run().lives, 0);

        let request = game.take_commentary_request().unwrap();
        assert_eq!(request.run, 1);
        assert!(game.take_commentary_request().is_none());
        // Ticks in game over neither simulate nor re-request
        assert!(idle(&mut game).is_empty());
        assert!(game.take_commentary_request().is_none());
    }

    #[test]
    fn test_commentary_request_survives_quick_retry() {
        let mut game = started(7);
        idle(&mut game);
        let seg = game.track().window()[0].clone();
        put_probe_at(&mut game, seg.center - Vec3::Y * (FALL_MARGIN + 5.0));
        idle(&mut game);
        assert_eq!(game.run().phase, GamePhase::GameOver);

        // Host restarts before fetching commentary
        assert!(game.retry());
        idle(&mut game);
        let request = game.take_commentary_request().unwrap();
        assert_eq!(request.run, 1);
        assert!(game.take_commentary_request().is_none());
    }

    #[test]
    fn test_save_round_trip_through_game() {
        let mut game = started(8);
        game.run.coins = 60;
        assert!(game.purchase(BallSkin::Marble));
        let json = game.save_data().to_json().unwrap();

        let mut other = new_game(9);
        other.load_save(&SaveData::from_json_or_default(&json));
        assert_eq!(other.run().coins, 10);
        assert!(other.equip(BallSkin::Marble));
    }

    #[test]
    fn test_end_to_end_clear_die_retry() {
        let mut game = started(2024);
        idle(&mut game);

        for index in 1..=12 {
            let center = game.track().by_index(index).unwrap().center;
            put_probe_at(&mut game, center);
            let events = idle(&mut game);
            let credited = events
                .iter()
                .any(|e| matches!(e, GameEvent::PlatformCleared { index: i, .. } if *i == index));
            assert!(credited, "platform {} not credited", index);
        }
        assert_eq!(game.run().platforms_cleared, 12);
        assert!((game.run().speed - 1.05).abs() < 1e-6);
        assert_eq!(game.run().pattern, Pattern::FlatWithObstacles);
        assert!(game.run().score >= 12);

        let last = game.track().by_index(12).unwrap().center;
        put_probe_at(&mut game, last - Vec3::Y * (FALL_MARGIN + 5.0));
        idle(&mut game);
        assert_eq!(game.run().phase, GamePhase::GameOver);

        let coins = game.run().coins;
        let high_score = game.run().high_score;
        assert!(high_score >= 12);

        assert!(game.retry());
        // Reseeded in the same call, before any tick
        assert_safe_opening(&game);
        let run = game.run();
        assert_eq!(run.phase, GamePhase::Playing);
        assert_eq!(run.score, 0);
        assert_eq!(run.lives, 1);
        assert_eq!(run.total_coins_collected, 0);
        assert_eq!(run.pattern, Pattern::FlatWithObstacles);
        assert_eq!(run.speed, 1.0);
        assert_eq!(run.coins, coins);
        assert_eq!(run.high_score, high_score);

        // Old colliders are gone, new ones registered
        let expected: usize = game
            .track()
            .window()
            .iter()
            .map(|s| 1 + s.obstacles.len())
            .sum();
        assert_eq!(game.colliders().len(), expected);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = started(77);
        let mut b = started(77);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            a.tick(&input, SIM_DT);
            b.tick(&input, SIM_DT);
            a.body_mut().step(SIM_DT, PLAYER_RADIUS);
            b.body_mut().step(SIM_DT, PLAYER_RADIUS);
        }
        assert_eq!(a.body().position, b.body().position);
        assert_eq!(a.track().window()[3].center, b.track().window()[3].center);
    }
}
