//! Procedural segment generation
//!
//! `generate_segment` is a pure function of its arguments and the RNG draws it
//! makes. The only thing carried from one segment to the next is the cursor.

use glam::Vec3;
use rand::Rng;

use super::segment::{
    Coin, CoinId, Heart, HeartId, Obstacle, ObstacleId, ObstacleMotion, Pattern, Segment,
    SegmentId, SegmentVariant,
};
use crate::consts::*;
use crate::{FORWARD, orientation};

/// Slope used by every segment in the flat pattern
pub const FLAT_SLOPE: f32 = -0.1;

pub const NORMAL_WIDTH: f32 = 16.0;
pub const NORMAL_LENGTH: f32 = 60.0;
pub const NARROW_WIDTH: f32 = 6.0;
pub const STEEP_LENGTH: f32 = 80.0;
pub const STEEP_SLOPE_MIN: f32 = -0.75;
pub const STEEP_SLOPE_MAX: f32 = -0.5;
pub const BANKED_WIDTH: f32 = 22.0;
pub const BANKED_ANGLE: f32 = 0.4;
pub const TURN_WIDTH: f32 = 20.0;
pub const TURN_LENGTH: f32 = 70.0;
pub const TURN_YAW: f32 = 0.3;

/// Chance a flat-pattern segment comes out NARROW
pub const NARROW_CHANCE: f64 = 0.2;
/// Varied-pattern cumulative weights: STEEP 25%, TURN 25%, BANKED 20%, rest NORMAL
const VARIED_WEIGHTS: [(f32, SegmentVariant); 3] = [
    (0.25, SegmentVariant::Steep),
    (0.50, SegmentVariant::Turn),
    (0.70, SegmentVariant::Banked),
];

/// Segments narrower than this never get obstacles
pub const MIN_OBSTACLE_WIDTH: f32 = 9.0;
/// From this index on, up to 3 obstacles per segment instead of 2
pub const DENSE_OBSTACLE_INDEX: u32 = 40;
/// Lane centers as fractions of segment width (left, center, right)
pub const LANES: [f32; 3] = [-0.3, 0.0, 0.3];
pub const LANE_JITTER: f32 = 0.6;
pub const CENTER_LANE_SKIP_CHANCE: f64 = 0.5;
pub const MOVING_OBSTACLE_CHANCE: f64 = 0.2;
pub const OBSTACLE_SIZE: Vec3 = Vec3::new(2.5, 2.5, 2.5);

/// Height of collectibles above the top face
pub const PICKUP_HOVER: f32 = 1.5;
/// Keep coins this far from the segment edges
pub const COIN_EDGE_MARGIN: f32 = 1.5;

struct Shape {
    width: f32,
    length: f32,
    slope: f32,
    yaw: f32,
    bank: f32,
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

fn pick_variant<R: Rng + ?Sized>(index: u32, pattern: Pattern, rng: &mut R) -> SegmentVariant {
    if index < SAFE_START_SEGMENTS {
        return SegmentVariant::Normal;
    }
    match pattern {
        Pattern::FlatWithObstacles => {
            if rng.random_bool(NARROW_CHANCE) {
                SegmentVariant::Narrow
            } else {
                SegmentVariant::Normal
            }
        }
        Pattern::VariedTerrain => {
            let roll: f32 = rng.random();
            VARIED_WEIGHTS
                .iter()
                .find(|(threshold, _)| roll < *threshold)
                .map(|(_, variant)| *variant)
                .unwrap_or(SegmentVariant::Normal)
        }
    }
}

fn shape_for<R: Rng + ?Sized>(
    variant: SegmentVariant,
    index: u32,
    pattern: Pattern,
    rng: &mut R,
) -> Shape {
    let flat = Shape {
        width: NORMAL_WIDTH,
        length: NORMAL_LENGTH,
        slope: FLAT_SLOPE,
        yaw: 0.0,
        bank: 0.0,
    };
    match variant {
        SegmentVariant::Normal => {
            if pattern == Pattern::VariedTerrain && index >= SAFE_START_SEGMENTS {
                Shape {
                    slope: rng.random_range(-0.3..=FLAT_SLOPE),
                    ..flat
                }
            } else {
                flat
            }
        }
        SegmentVariant::Narrow => Shape {
            width: NARROW_WIDTH,
            ..flat
        },
        SegmentVariant::Steep => Shape {
            length: STEEP_LENGTH,
            slope: rng.random_range(STEEP_SLOPE_MIN..=STEEP_SLOPE_MAX),
            ..flat
        },
        SegmentVariant::Banked => Shape {
            width: BANKED_WIDTH,
            slope: -0.2,
            bank: BANKED_ANGLE * random_sign(rng),
            ..flat
        },
        SegmentVariant::Turn => Shape {
            width: TURN_WIDTH,
            length: TURN_LENGTH,
            slope: -0.15,
            yaw: TURN_YAW * random_sign(rng),
            ..flat
        },
    }
}

/// Lay out up to 2 (or 3 once the run is deep) obstacles across three lanes,
/// never filling every lane.
fn place_obstacles<R: Rng + ?Sized>(segment: &Segment, pattern: Pattern, rng: &mut R) -> Vec<Obstacle> {
    if pattern != Pattern::FlatWithObstacles
        || segment.index < SAFE_START_SEGMENTS
        || segment.width < MIN_OBSTACLE_WIDTH
    {
        return Vec::new();
    }

    let max_count = if segment.index < DENSE_OBSTACLE_INDEX { 2 } else { 3 };
    let count = rng.random_range(0..=max_count);
    let rotation = segment.rotation();
    let mut occupied = [false; 3];
    let mut obstacles = Vec::with_capacity(count);

    for _ in 0..count {
        let lane = rng.random_range(0..LANES.len());
        if lane == 1 && rng.random_bool(CENTER_LANE_SKIP_CHANCE) {
            continue;
        }
        // Last free lane stays free
        if !occupied[lane] && occupied.iter().filter(|o| **o).count() == LANES.len() - 1 {
            continue;
        }
        occupied[lane] = true;

        let x = LANES[lane] * segment.width + rng.random_range(-LANE_JITTER..=LANE_JITTER);
        let z = rng.random_range(-segment.length * 0.35..=segment.length * 0.35);
        let local_pos = Vec3::new(x, segment.thickness / 2.0 + OBSTACLE_SIZE.y / 2.0, z);

        let motion = if rng.random_bool(MOVING_OBSTACLE_CHANCE) {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            ObstacleMotion::Moving {
                direction: rotation * Vec3::new(angle.cos(), 0.0, angle.sin()),
                speed: rng.random_range(1.0..=3.0),
                range: rng.random_range(2.0..=5.0),
            }
        } else {
            ObstacleMotion::Static
        };

        obstacles.push(Obstacle {
            id: ObstacleId {
                segment: segment.id,
                slot: obstacles.len() as u8,
            },
            local_pos,
            size: OBSTACLE_SIZE,
            motion,
            anchor: segment.local_to_world(local_pos),
        });
    }

    obstacles
}

/// Whether the segment at `index` carries a heart
#[inline]
pub fn has_heart(index: u32) -> bool {
    index > 0 && index.is_multiple_of(HEART_INTERVAL)
}

/// Generate one segment starting at `cursor`.
///
/// Returns the segment and the cursor for the next one (this segment's end).
pub fn generate_segment<R: Rng + ?Sized>(
    id: SegmentId,
    index: u32,
    pattern: Pattern,
    cursor: Vec3,
    rng: &mut R,
) -> (Segment, Vec3) {
    let variant = pick_variant(index, pattern, rng);
    let shape = shape_for(variant, index, pattern, rng);

    let forward = orientation(shape.slope, shape.yaw, 0.0) * FORWARD;
    let center = cursor + forward * (shape.length / 2.0);
    let next_cursor = cursor + forward * shape.length;

    let mut segment = Segment {
        id,
        index,
        center,
        width: shape.width,
        length: shape.length,
        thickness: SEGMENT_THICKNESS,
        slope: shape.slope,
        yaw: shape.yaw,
        bank: shape.bank,
        variant,
        obstacles: Vec::new(),
        coin: None,
        heart: None,
    };

    segment.obstacles = place_obstacles(&segment, pattern, rng);

    let half_w = segment.width / 2.0 - COIN_EDGE_MARGIN;
    let half_l = segment.length / 2.0 - COIN_EDGE_MARGIN;
    segment.coin = Some(Coin {
        id: CoinId(id),
        local_pos: Vec3::new(
            rng.random_range(-half_w..=half_w),
            segment.thickness / 2.0 + PICKUP_HOVER,
            rng.random_range(-half_l..=half_l),
        ),
    });

    if has_heart(index) {
        segment.heart = Some(Heart {
            id: HeartId(id),
            local_pos: Vec3::new(0.0, segment.thickness / 2.0 + PICKUP_HOVER, 0.0),
        });
    }

    log::debug!(
        "Generated segment {} ({:?}, {} obstacles) at {:?}",
        index,
        variant,
        segment.obstacles.len(),
        center
    );

    (segment, next_cursor)
}
