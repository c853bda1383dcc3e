//! Player locomotion
//!
//! Turns steering input into forces on the physics body, then derives the
//! purely visual roll/lean/squash and the smoothed camera position from the
//! body state read at the start of the tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::physics::{BodySnapshot, PlayerBody};
use crate::consts::*;
use crate::settings::Settings;
use crate::{smoothing_factor, travel_progress};

/// Steering intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveInput {
    /// -1 for left, +1 for right, 0 for neither or both
    pub fn steer(&self, inverted: bool) -> f32 {
        let dir = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        if inverted { -dir } else { dir }
    }
}

/// Visual transform for the renderer. Never fed back into physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVisual {
    pub position: Vec3,
    /// Accumulated roll about X (radians, wrapped to [0, τ))
    pub roll: f32,
    /// Sideways lean about Z (radians)
    pub lean: f32,
    /// Non-uniform squash/stretch
    pub scale: Vec3,
}

impl Default for PlayerVisual {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            roll: 0.0,
            lean: 0.0,
            scale: Vec3::ONE,
        }
    }
}

/// Owns the player's physics body
#[derive(Debug)]
pub struct PlayerLocomotion<B: PlayerBody> {
    body: B,
    /// The one body read per tick
    snapshot: BodySnapshot,
    /// Set by a track contact, cleared by jumping
    grounded: bool,
    start_position: Vec3,
    visual: PlayerVisual,
    camera: Vec3,
    /// Best whole-unit displacement along the travel axis this run
    distance_score: u64,
}

impl<B: PlayerBody> PlayerLocomotion<B> {
    pub fn new(body: B) -> Self {
        let snapshot = body.read_state();
        Self {
            body,
            snapshot,
            grounded: false,
            start_position: snapshot.position,
            visual: PlayerVisual {
                position: snapshot.position,
                ..Default::default()
            },
            camera: snapshot.position + CAMERA_OFFSET,
            distance_score: 0,
        }
    }

    /// Put the ball at the start of a new run
    pub fn reset(&mut self, spawn: Vec3, settings: &Settings) {
        self.body.teleport(spawn);
        self.snapshot = self.body.read_state();
        self.grounded = false;
        self.start_position = spawn;
        self.visual = PlayerVisual {
            position: spawn,
            ..Default::default()
        };
        self.camera = spawn + settings.camera_offset;
        self.distance_score = 0;
    }

    /// Put the ball back on the track mid-run (keeps distance score)
    pub fn respawn(&mut self, position: Vec3) {
        self.body.teleport(position);
        self.snapshot = self.body.read_state();
        self.grounded = false;
        self.visual.position = position;
    }

    /// Read the body once. Everything else this tick uses the returned copy.
    pub fn read_body(&mut self) -> BodySnapshot {
        self.snapshot = self.body.read_state();
        self.snapshot
    }

    pub fn snapshot(&self) -> BodySnapshot {
        self.snapshot
    }

    pub fn set_grounded(&mut self) {
        self.grounded = true;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn visual(&self) -> PlayerVisual {
        self.visual
    }

    pub fn camera(&self) -> Vec3 {
        self.camera
    }

    pub fn distance_score(&self) -> u64 {
        self.distance_score
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// Apply this tick's forces and refresh visual/camera state.
    ///
    /// `speed` is the run's speed multiplier and scales the constant thrust.
    pub fn tick(&mut self, input: MoveInput, dt: f32, speed: f32, settings: &Settings) {
        self.body.apply_force(THRUST_FORCE * speed);

        let steer = input.steer(settings.invert_controls);
        if steer != 0.0 {
            self.body.apply_force(Vec3::X * STEER_FORCE * steer);
            self.body.apply_torque(Vec3::NEG_Z * STEER_TORQUE * steer);
        }

        if input.jump && self.grounded {
            self.grounded = false;
            self.body.apply_impulse(Vec3::Y * JUMP_IMPULSE);
            // The engine divides by its own mass
            self.snapshot.velocity = self.body.read_state().velocity;
        }

        let vx = self.snapshot.velocity.x;
        if vx.abs() > MAX_LATERAL_SPEED {
            let mut velocity = self.body.read_state().velocity;
            velocity.x = vx.clamp(-MAX_LATERAL_SPEED, MAX_LATERAL_SPEED);
            self.body.set_velocity(velocity);
            self.snapshot.velocity.x = velocity.x;
        }

        self.update_visual(dt, settings);

        let target = self.snapshot.position + settings.camera_offset;
        let k = smoothing_factor(CAMERA_SMOOTHING, dt, settings.time_scaled_smoothing);
        self.camera = self.camera.lerp(target, k);

        let displacement = travel_progress(self.snapshot.position - self.start_position).abs();
        self.distance_score = self.distance_score.max(displacement.floor() as u64);
    }

    fn update_visual(&mut self, dt: f32, settings: &Settings) {
        let velocity = self.snapshot.velocity;
        let speed = velocity.length();

        self.visual.position = self.snapshot.position;
        self.visual.roll =
            (self.visual.roll + speed * dt / PLAYER_RADIUS).rem_euclid(std::f32::consts::TAU);

        let target_lean = (-velocity.x * LEAN_PER_LATERAL_SPEED).clamp(-MAX_LEAN, MAX_LEAN);
        let k = smoothing_factor(LEAN_SMOOTHING, dt, settings.time_scaled_smoothing);
        self.visual.lean += (target_lean - self.visual.lean) * k;

        self.visual.scale = if settings.reduced_motion {
            Vec3::ONE
        } else {
            let stretch = (speed * STRETCH_PER_SPEED).min(MAX_STRETCH);
            Vec3::new(1.0 - stretch * 0.5, 1.0 - stretch * 0.5, 1.0 + stretch)
        };
    }
}
