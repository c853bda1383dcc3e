//! Roll Runner - simulation core for an endless downhill runner
//!
//! Core modules:
//! - `sim`: Track generation, collision queries, player locomotion and run state
//! - `highscores`: Leaderboard entries
//! - `settings`: Player preferences
//! - `shop`: Ball skins bought with coins
//! - `persistence`: Versioned save envelope for an external key-value store
//! - `commentary`: Post-game commentary collaborator

pub mod commentary;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod shop;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::{Quat, Vec3};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Track geometry
    pub const SEGMENT_THICKNESS: f32 = 1.0;
    /// Opening segments that are always NORMAL with no obstacles
    pub const SAFE_START_SEGMENTS: u32 = 6;
    /// Segments generated on reseed (safe opening + continuation)
    pub const OPENING_SEGMENTS: u32 = 12;
    /// Generate a new segment when the last one is closer than this
    pub const SPAWN_DISTANCE: f32 = 260.0;
    /// Cap on segments generated in a single tick
    pub const MAX_SPAWNS_PER_TICK: usize = 4;
    /// Segments further than this behind the player are evicted
    pub const EVICT_MARGIN: f32 = 90.0;
    /// Hard bound on the live window
    pub const MAX_WINDOW_SEGMENTS: usize = 48;
    /// A heart spawns on every segment whose index is a multiple of this
    pub const HEART_INTERVAL: u32 = 20;

    /// Collision
    pub const COIN_HIT_RADIUS: f32 = 3.5;
    pub const HEART_HIT_RADIUS: f32 = 3.0;
    /// Falling this far below the nearest segment center is death
    pub const FALL_MARGIN: f32 = 40.0;
    /// Physics body position to visual ball position
    pub const PLAYER_PROBE_OFFSET: Vec3 = Vec3::new(0.0, 0.5, -0.5);
    /// Obstacle contacts are ignored this long after losing a life
    pub const INVULNERABLE_SECS: f32 = 1.5;

    /// Player
    pub const PLAYER_RADIUS: f32 = 1.0;
    /// Constant slope gravity + forward thrust (forward is -Z)
    pub const THRUST_FORCE: Vec3 = Vec3::new(0.0, -6.0, -14.0);
    pub const STEER_FORCE: f32 = 32.0;
    pub const STEER_TORQUE: f32 = 6.0;
    pub const JUMP_IMPULSE: f32 = 9.0;
    /// Hard cap on lateral (X) speed
    pub const MAX_LATERAL_SPEED: f32 = 14.0;
    pub const LEAN_PER_LATERAL_SPEED: f32 = 0.035;
    pub const MAX_LEAN: f32 = 0.45;
    pub const LEAN_SMOOTHING: f32 = 0.12;
    pub const STRETCH_PER_SPEED: f32 = 0.004;
    pub const MAX_STRETCH: f32 = 0.25;
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 6.0, 14.0);
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    /// Smoothing factors are tuned per tick at this rate
    pub const SMOOTHING_REFERENCE_HZ: f32 = 60.0;

    /// Run
    pub const START_LIVES: u8 = 1;
    pub const MAX_LIVES: u8 = 3;
    pub const PATTERN_SWITCH_PLATFORMS: u32 = 20;
    pub const SPEED_STEP_PLATFORMS: u32 = 10;
    pub const SPEED_STEP: f32 = 0.05;
    pub const MAX_SPEED_BONUS: f32 = 1.0;
}

/// Direction of travel down the track
pub const TRAVEL_AXIS: Vec3 = Vec3::NEG_Z;

/// Canonical forward vector before a segment's rotation is applied
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Distance travelled along the primary travel axis
#[inline]
pub fn travel_progress(pos: Vec3) -> f32 {
    pos.dot(TRAVEL_AXIS)
}

/// Segment orientation: pitch (slope) about X, then yaw about Y, then bank about Z
#[inline]
pub fn orientation(slope: f32, yaw: f32, bank: f32) -> Quat {
    Quat::from_rotation_x(slope) * Quat::from_rotation_y(yaw) * Quat::from_rotation_z(bank)
}

/// Per-tick exponential smoothing factor, optionally rescaled by tick length
#[inline]
pub fn smoothing_factor(per_tick: f32, dt: f32, time_scaled: bool) -> f32 {
    if time_scaled {
        1.0 - (1.0 - per_tick).powf(dt * consts::SMOOTHING_REFERENCE_HZ)
    } else {
        per_tick
    }
}
