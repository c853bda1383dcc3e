//! Physics engine capability
//!
//! The rigid-body engine is external. The core only needs to push forces at the
//! player body, read its state back once per tick, and keep obstacle colliders
//! where the track says they are. Collision-begin events come back as
//! `ContactEvent`s tagged with `BodyTag`.
//!
//! `HeadlessBody` and `HeadlessColliders` are a minimal stand-in used by the
//! native demo and tests. They integrate forces but do not solve contacts.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::segment::{ObstacleId, SegmentId};

/// Identity the engine reports in collision callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyTag {
    Player,
    Track(SegmentId),
    Obstacle(ObstacleId),
}

/// Collision-begin between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: BodyTag,
    pub b: BodyTag,
}

impl ContactEvent {
    pub fn with_player(other: BodyTag) -> Self {
        Self {
            a: BodyTag::Player,
            b: other,
        }
    }

    /// The non-player body, if the player is involved at all
    pub fn player_contact(&self) -> Option<BodyTag> {
        match (self.a, self.b) {
            (BodyTag::Player, other) | (other, BodyTag::Player) if other != BodyTag::Player => {
                Some(other)
            }
            _ => None,
        }
    }
}

/// Player body state read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// The player's rigid body as exposed by the engine
pub trait PlayerBody {
    /// Continuous force, applied over the next physics step
    fn apply_force(&mut self, force: Vec3);
    /// Instantaneous change of momentum
    fn apply_impulse(&mut self, impulse: Vec3);
    fn apply_torque(&mut self, torque: Vec3);
    fn read_state(&self) -> BodySnapshot;
    fn set_velocity(&mut self, velocity: Vec3);
    /// Move the body and zero its velocity
    fn teleport(&mut self, position: Vec3);
}

/// Box collider registration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    pub tag: BodyTag,
    pub position: Vec3,
    pub rotation: Quat,
    /// Full extents
    pub size: Vec3,
    /// Moved by the simulation every tick
    pub kinematic: bool,
}

/// Static and kinematic colliders owned by the engine
pub trait ColliderWorld {
    fn spawn_collider(&mut self, desc: ColliderDesc);
    fn move_collider(&mut self, tag: BodyTag, position: Vec3);
    fn despawn_collider(&mut self, tag: BodyTag);
}

/// Gravity used by the headless body
pub const HEADLESS_GRAVITY: Vec3 = Vec3::new(0.0, -19.6, 0.0);

/// Point-mass body with optional ground plane, for tests and the native demo
#[derive(Debug, Clone)]
pub struct HeadlessBody {
    pub mass: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Ground height and owning segment under the body, set by the host each step
    pub floor: Option<(f32, SegmentId)>,
    force: Vec3,
    torque: Vec3,
    resting: bool,
}

impl HeadlessBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            mass: 1.0,
            position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            floor: None,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            resting: false,
        }
    }

    /// Integrate accumulated forces. Returns a ground contact on landing.
    pub fn step(&mut self, dt: f32, radius: f32) -> Option<ContactEvent> {
        let accel = self.force / self.mass + HEADLESS_GRAVITY;
        self.velocity += accel * dt;
        self.angular_velocity += self.torque / self.mass * dt;
        self.position += self.velocity * dt;
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;

        let Some((floor, segment)) = self.floor else {
            self.resting = false;
            return None;
        };
        if self.position.y - radius > floor {
            self.resting = false;
            return None;
        }
        self.position.y = floor + radius;
        self.velocity.y = self.velocity.y.max(0.0);
        let landed = !self.resting;
        self.resting = true;
        landed.then(|| ContactEvent::with_player(BodyTag::Track(segment)))
    }
}

impl PlayerBody for HeadlessBody {
    fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
        self.resting = false;
    }

    fn apply_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    fn read_state(&self) -> BodySnapshot {
        BodySnapshot {
            position: self.position,
            velocity: self.velocity,
        }
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.resting = false;
    }
}

/// Collider registry without any contact solving
#[derive(Debug, Clone, Default)]
pub struct HeadlessColliders {
    pub colliders: HashMap<BodyTag, ColliderDesc>,
}

impl HeadlessColliders {
    pub fn get(&self, tag: BodyTag) -> Option<&ColliderDesc> {
        self.colliders.get(&tag)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl ColliderWorld for HeadlessColliders {
    fn spawn_collider(&mut self, desc: ColliderDesc) {
        self.colliders.insert(desc.tag, desc);
    }

    fn move_collider(&mut self, tag: BodyTag, position: Vec3) {
        if let Some(desc) = self.colliders.get_mut(&tag) {
            desc.position = position;
        }
    }

    fn despawn_collider(&mut self, tag: BodyTag) {
        self.colliders.remove(&tag);
    }
}
