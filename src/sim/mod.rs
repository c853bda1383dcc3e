//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders or does I/O:
//! - One tick per frame, physics state read once per tick
//! - Seeded RNG only
//! - Window order (by segment index) is the iteration order everywhere
//! - The physics engine is reached only through `physics` traits

pub mod collision;
pub mod generator;
pub mod physics;
pub mod player;
pub mod segment;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{CollisionOracle, ContactSummary, OracleEvent};
pub use generator::{generate_segment, has_heart};
pub use physics::{
    BodySnapshot, BodyTag, ColliderDesc, ColliderWorld, ContactEvent, HeadlessBody,
    HeadlessColliders, PlayerBody,
};
pub use player::{MoveInput, PlayerLocomotion, PlayerVisual};
pub use segment::{
    Coin, CoinId, Heart, HeartId, Obstacle, ObstacleId, ObstacleMotion, Pattern, Segment,
    SegmentId, SegmentVariant,
};
pub use state::{GamePhase, RunState, speed_for_platforms};
pub use tick::{Game, GameEvent, TickInput, run_seed};
pub use track::{TrackChanges, TrackStream};
