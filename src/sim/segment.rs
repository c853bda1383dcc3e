//! Track segment geometry and contents
//!
//! Everything placed on a segment (obstacles, coins, hearts) is stored in the
//! segment's local frame. `Segment::local_to_world` is the one conversion every
//! consumer (collision queries, collider sync, renderer) goes through.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{FORWARD, orientation};

/// Unique segment identity (never reused, not even across runs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u64);

/// Obstacle identity: owning segment plus slot on that segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId {
    pub segment: SegmentId,
    pub slot: u8,
}

/// A segment carries at most one coin, so the segment id identifies it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinId(pub SegmentId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeartId(pub SegmentId);

/// Generation mode controlling eligible variants and obstacle spawning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pattern {
    /// Shallow NORMAL/NARROW segments, obstacles allowed
    #[default]
    FlatWithObstacles,
    /// STEEP/TURN/BANKED segments, never any obstacles
    VariedTerrain,
}

impl Pattern {
    pub fn toggled(self) -> Self {
        match self {
            Pattern::FlatWithObstacles => Pattern::VariedTerrain,
            Pattern::VariedTerrain => Pattern::FlatWithObstacles,
        }
    }
}

/// Segment shape variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentVariant {
    #[default]
    Normal,
    Steep,
    Narrow,
    Banked,
    Turn,
}

/// How an obstacle moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleMotion {
    Static,
    /// Oscillates along a world-space unit `direction` around its anchor
    Moving { direction: Vec3, speed: f32, range: f32 },
}

/// An obstacle box sitting on a segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Position in the owning segment's local frame
    pub local_pos: Vec3,
    /// Full box extents
    pub size: Vec3,
    pub motion: ObstacleMotion,
    /// World position at creation time. Oscillation is always relative to this.
    pub anchor: Vec3,
}

impl Obstacle {
    pub fn is_moving(&self) -> bool {
        matches!(self.motion, ObstacleMotion::Moving { .. })
    }

    /// World position at simulation time `time` (seconds)
    pub fn world_position(&self, time: f32) -> Vec3 {
        match self.motion {
            ObstacleMotion::Static => self.anchor,
            ObstacleMotion::Moving {
                direction,
                speed,
                range,
            } => self.anchor + direction * range * (time * speed).sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub local_pos: Vec3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Heart {
    pub id: HeartId,
    pub local_pos: Vec3,
}

/// One fixed stretch of track. Immutable once generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    /// Position in the run (0-based, monotonic)
    pub index: u32,
    /// World-space center
    pub center: Vec3,
    pub width: f32,
    pub length: f32,
    pub thickness: f32,
    /// Pitch about X (negative = downhill)
    pub slope: f32,
    pub yaw: f32,
    /// Roll about the travel direction
    pub bank: f32,
    pub variant: SegmentVariant,
    pub obstacles: Vec<Obstacle>,
    pub coin: Option<Coin>,
    pub heart: Option<Heart>,
}

impl Segment {
    #[inline]
    pub fn rotation(&self) -> Quat {
        orientation(self.slope, self.yaw, self.bank)
    }

    /// Unit vector pointing down the track through this segment
    pub fn forward(&self) -> Vec3 {
        self.rotation() * FORWARD
    }

    /// Surface normal (local +Y)
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Where the track enters this segment
    pub fn start(&self) -> Vec3 {
        self.center - self.forward() * (self.length / 2.0)
    }

    /// Where the next segment begins
    pub fn end(&self) -> Vec3 {
        self.center + self.forward() * (self.length / 2.0)
    }

    /// Rotate by the segment orientation, then translate by its center
    #[inline]
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.center + self.rotation() * local
    }

    #[inline]
    pub fn world_to_local(&self, world: Vec3) -> Vec3 {
        self.rotation().inverse() * (world - self.center)
    }

    /// Whether a world point projects inside the segment's top face
    pub fn footprint_contains(&self, world: Vec3) -> bool {
        let local = self.world_to_local(world);
        local.x.abs() <= self.width / 2.0 && local.z.abs() <= self.length / 2.0
    }

    /// Height of the top face directly above/below the world (x, z)
    pub fn surface_height_at(&self, x: f32, z: f32) -> f32 {
        let n = self.up();
        let top = self.center + n * (self.thickness / 2.0);
        if n.y.abs() < f32::EPSILON {
            return top.y;
        }
        top.y - (n.x * (x - top.x) + n.z * (z - top.z)) / n.y
    }

    /// Point resting on the top face at the segment center
    pub fn spawn_point(&self, clearance: f32) -> Vec3 {
        self.local_to_world(Vec3::new(0.0, self.thickness / 2.0 + clearance, 0.0))
    }

    pub fn coin_world_position(&self) -> Option<Vec3> {
        self.coin.map(|c| self.local_to_world(c.local_pos))
    }

    pub fn heart_world_position(&self) -> Option<Vec3> {
        self.heart.map(|h| self.local_to_world(h.local_pos))
    }

    /// Full extents of the slab (width, thickness, length)
    pub fn extents(&self) -> Vec3 {
        Vec3::new(self.width, self.thickness, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_segment() -> Segment {
        Segment {
            id: SegmentId(1),
            index: 0,
            center: Vec3::new(0.0, 0.0, -30.0),
            width: 16.0,
            length: 60.0,
            thickness: 1.0,
            slope: 0.0,
            yaw: 0.0,
            bank: 0.0,
            variant: SegmentVariant::Normal,
            obstacles: Vec::new(),
            coin: None,
            heart: None,
        }
    }

    #[test]
    fn test_start_and_end_span_length() {
        let seg = flat_segment();
        assert!(seg.start().abs_diff_eq(Vec3::ZERO, 1e-5));
        assert!(seg.end().abs_diff_eq(Vec3::new(0.0, 0.0, -60.0), 1e-5));
    }

    #[test]
    fn test_local_world_round_trip_on_rotated_segment() {
        let mut seg = flat_segment();
        seg.slope = -0.4;
        seg.yaw = 0.3;
        seg.bank = 0.2;
        let local = Vec3::new(3.0, 1.5, -7.0);
        let back = seg.world_to_local(seg.local_to_world(local));
        assert!(back.abs_diff_eq(local, 1e-4));
    }

    #[test]
    fn test_footprint_and_surface_height() {
        let mut seg = flat_segment();
        assert!(seg.footprint_contains(Vec3::new(7.0, 5.0, -10.0)));
        assert!(!seg.footprint_contains(Vec3::new(9.0, 0.0, -10.0)));
        assert!((seg.surface_height_at(0.0, -30.0) - 0.5).abs() < 1e-5);

        // Downhill: surface drops further along -Z
        seg.slope = -0.2;
        assert!(seg.surface_height_at(0.0, -50.0) < seg.surface_height_at(0.0, -10.0));
    }

    #[test]
    fn test_moving_obstacle_oscillates_about_anchor() {
        let anchor = Vec3::new(1.0, 2.0, 3.0);
        let obstacle = Obstacle {
            id: ObstacleId {
                segment: SegmentId(1),
                slot: 0,
            },
            local_pos: Vec3::ZERO,
            size: Vec3::splat(2.0),
            motion: ObstacleMotion::Moving {
                direction: Vec3::X,
                speed: 2.0,
                range: 3.0,
            },
            anchor,
        };
        assert!(obstacle.world_position(0.0).abs_diff_eq(anchor, 1e-6));
        let quarter = std::f32::consts::FRAC_PI_2 / 2.0;
        assert!(
            obstacle
                .world_position(quarter)
                .abs_diff_eq(anchor + Vec3::X * 3.0, 1e-4)
        );
    }

    #[test]
    fn test_pattern_toggle() {
        assert_eq!(Pattern::default(), Pattern::FlatWithObstacles);
        assert_eq!(Pattern::FlatWithObstacles.toggled(), Pattern::VariedTerrain);
        assert_eq!(Pattern::VariedTerrain.toggled(), Pattern::FlatWithObstacles);
    }
}
