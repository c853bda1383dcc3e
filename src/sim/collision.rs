//! Per-tick spatial queries against the live window
//!
//! Nearest-segment lookup drives platform-clear scoring and fall detection.
//! Coins and hearts are tested by distance; obstacles come in through the
//! physics engine's collision-begin events.

use glam::Vec3;

use super::physics::{BodyTag, ColliderDesc, ColliderWorld, ContactEvent};
use super::segment::{CoinId, HeartId, ObstacleId, Segment};
use super::track::TrackStream;
use crate::consts::*;

/// Something the oracle observed this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OracleEvent {
    /// Nearest segment moved past the highest index credited so far
    PlatformCleared { index: u32 },
    CoinTouched(CoinId),
    HeartTouched(HeartId),
    ObstacleHit(ObstacleId),
    /// Probe dropped `depth` below the nearest segment center
    Fell { depth: f32 },
}

/// What this tick's collision-begin events mean for the player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactSummary {
    /// Touched any track segment
    pub grounded: bool,
    /// First obstacle touched
    pub obstacle: Option<ObstacleId>,
}

/// Spatial query layer. Only state is the platform-clear ratchet.
#[derive(Debug, Clone, Default)]
pub struct CollisionOracle {
    last_cleared: u32,
}

impl CollisionOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget credited platforms (new run)
    pub fn reset(&mut self) {
        self.last_cleared = 0;
    }

    /// Highest segment index credited so far
    pub fn last_cleared(&self) -> u32 {
        self.last_cleared
    }

    /// Physics body position adjusted to where the ball is drawn
    #[inline]
    pub fn probe_position(body_position: Vec3) -> Vec3 {
        body_position + PLAYER_PROBE_OFFSET
    }

    /// Closest segment center. Ties go to the earlier segment in the window.
    pub fn nearest_segment(window: &[Segment], probe: Vec3) -> Option<&Segment> {
        let mut best: Option<(&Segment, f32)> = None;
        for seg in window {
            let d = seg.center.distance(probe);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((seg, d));
            }
        }
        best.map(|(seg, _)| seg)
    }

    /// Credit one platform when the nearest index passes the ratchet.
    ///
    /// A jump of several indices in one tick still credits a single platform.
    pub fn credit_platform(&mut self, nearest_index: u32) -> Option<OracleEvent> {
        if nearest_index <= self.last_cleared {
            return None;
        }
        self.last_cleared = nearest_index;
        Some(OracleEvent::PlatformCleared {
            index: nearest_index,
        })
    }

    /// Coins and hearts within their hitbox that have not been collected yet
    pub fn touched_collectibles(track: &TrackStream, probe: Vec3) -> Vec<OracleEvent> {
        let mut events = Vec::new();
        for seg in track.window() {
            let coin = seg.coin.filter(|c| !track.is_coin_collected(c.id));
            if let Some(coin) = coin {
                if seg.local_to_world(coin.local_pos).distance(probe) < COIN_HIT_RADIUS {
                    events.push(OracleEvent::CoinTouched(coin.id));
                }
            }
            let heart = seg.heart.filter(|h| !track.is_heart_collected(h.id));
            if let Some(heart) = heart {
                if seg.local_to_world(heart.local_pos).distance(probe) < HEART_HIT_RADIUS {
                    events.push(OracleEvent::HeartTouched(heart.id));
                }
            }
        }
        events
    }

    /// How far the probe is below the death line of `nearest`, if past it
    pub fn fall_depth(nearest: &Segment, probe: Vec3) -> Option<f32> {
        let depth = nearest.center.y - probe.y;
        (depth > FALL_MARGIN).then_some(depth)
    }

    /// Fold this tick's collision-begin events
    pub fn resolve_contacts(contacts: &[ContactEvent]) -> ContactSummary {
        let mut summary = ContactSummary::default();
        for contact in contacts {
            match contact.player_contact() {
                Some(BodyTag::Track(_)) => summary.grounded = true,
                Some(BodyTag::Obstacle(id)) if summary.obstacle.is_none() => {
                    summary.obstacle = Some(id)
                }
                _ => {}
            }
        }
        summary
    }

    /// Everything the player ran into this tick, in a fixed order:
    /// obstacle hit, fall, platform clear, then collectibles.
    pub fn evaluate(
        &mut self,
        track: &TrackStream,
        probe: Vec3,
        obstacle_hit: Option<ObstacleId>,
    ) -> Vec<OracleEvent> {
        let mut events = Vec::new();
        if let Some(id) = obstacle_hit {
            events.push(OracleEvent::ObstacleHit(id));
        }

        let Some(nearest) = Self::nearest_segment(track.window(), probe) else {
            return events;
        };
        if let Some(depth) = Self::fall_depth(nearest, probe) {
            events.push(OracleEvent::Fell { depth });
        }
        if let Some(event) = self.credit_platform(nearest.index) {
            events.push(event);
        }
        events.extend(Self::touched_collectibles(track, probe));
        events
    }
}

/// Register a segment slab and its obstacles with the engine
pub fn register_segment<W: ColliderWorld>(world: &mut W, segment: &Segment) {
    let rotation = segment.rotation();
    world.spawn_collider(ColliderDesc {
        tag: BodyTag::Track(segment.id),
        position: segment.center,
        rotation,
        size: segment.extents(),
        kinematic: false,
    });
    for obstacle in &segment.obstacles {
        world.spawn_collider(ColliderDesc {
            tag: BodyTag::Obstacle(obstacle.id),
            position: obstacle.anchor,
            rotation,
            size: obstacle.size,
            kinematic: obstacle.is_moving(),
        });
    }
}

pub fn unregister_segment<W: ColliderWorld>(world: &mut W, segment: &Segment) {
    for obstacle in &segment.obstacles {
        world.despawn_collider(BodyTag::Obstacle(obstacle.id));
    }
    world.despawn_collider(BodyTag::Track(segment.id));
}

/// Move every moving obstacle collider to its oscillation position at `time`.
/// Must run before the physics step.
pub fn sync_moving_obstacles<W: ColliderWorld>(world: &mut W, window: &[Segment], time: f32) {
    for obstacle in window.iter().flat_map(|s| &s.obstacles) {
        if obstacle.is_moving() {
            world.move_collider(BodyTag::Obstacle(obstacle.id), obstacle.world_position(time));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::HeadlessColliders;
    use crate::sim::segment::{ObstacleMotion, Pattern, SegmentId};

    fn seeded_track() -> TrackStream {
        let mut track = TrackStream::new(0);
        track.reseed(77, Pattern::FlatWithObstacles);
        track
    }

    #[test]
    fn test_nearest_segment_empty_window() {
        assert!(CollisionOracle::nearest_segment(&[], Vec3::ZERO).is_none());
        let mut oracle = CollisionOracle::new();
        let track = TrackStream::new(0);
        assert!(oracle.evaluate(&track, Vec3::ZERO, None).is_empty());
    }

    #[test]
    fn test_nearest_segment_prefers_first_on_tie() {
        let track = seeded_track();
        let mut window = track.window()[..2].to_vec();
        window[1].center = window[0].center;
        let nearest = CollisionOracle::nearest_segment(&window, window[0].center).unwrap();
        assert_eq!(nearest.id, window[0].id);
    }

    #[test]
    fn test_nearest_segment_picks_closest() {
        let track = seeded_track();
        let target = &track.window()[4];
        let probe = target.center + Vec3::new(2.0, 1.0, 3.0);
        let nearest = CollisionOracle::nearest_segment(track.window(), probe).unwrap();
        assert_eq!(nearest.index, 4);
    }

    #[test]
    fn test_platform_credit_is_monotonic_single_step() {
        let mut oracle = CollisionOracle::new();
        assert_eq!(oracle.credit_platform(0), None);
        assert_eq!(
            oracle.credit_platform(1),
            Some(OracleEvent::PlatformCleared { index: 1 })
        );
        assert_eq!(oracle.credit_platform(1), None);
        // Skipping ahead credits once
        assert_eq!(
            oracle.credit_platform(5),
            Some(OracleEvent::PlatformCleared { index: 5 })
        );
        // Going back never credits
        assert_eq!(oracle.credit_platform(3), None);
        assert_eq!(oracle.last_cleared(), 5);
        oracle.reset();
        assert_eq!(oracle.last_cleared(), 0);
    }

    #[test]
    fn test_coin_hitbox_and_collected_skip() {
        let mut track = seeded_track();
        let seg = track.window()[3].clone();
        let coin = seg.coin.unwrap();
        let coin_pos = seg.coin_world_position().unwrap();

        let hits = CollisionOracle::touched_collectibles(&track, coin_pos + Vec3::X * 3.0);
        assert!(hits.contains(&OracleEvent::CoinTouched(coin.id)));

        let misses = CollisionOracle::touched_collectibles(&track, coin_pos + Vec3::X * 4.0);
        assert!(!misses.contains(&OracleEvent::CoinTouched(coin.id)));

        track.mark_coin_collected(coin.id);
        let after = CollisionOracle::touched_collectibles(&track, coin_pos);
        assert!(!after.contains(&OracleEvent::CoinTouched(coin.id)));
    }

    #[test]
    fn test_fall_depth_margin() {
        let track = seeded_track();
        let seg = &track.window()[0];
        let just_above = seg.center - Vec3::Y * (FALL_MARGIN - 0.5);
        assert_eq!(CollisionOracle::fall_depth(seg, just_above), None);
        let below = seg.center - Vec3::Y * (FALL_MARGIN + 1.0);
        let depth = CollisionOracle::fall_depth(seg, below).unwrap();
        assert!((depth - (FALL_MARGIN + 1.0)).abs() < 1e-3);
    }

    #[test]
    fn test_resolve_contacts() {
        let obstacle = ObstacleId {
            segment: SegmentId(9),
            slot: 1,
        };
        let contacts = [
            ContactEvent::with_player(BodyTag::Track(SegmentId(9))),
            ContactEvent::with_player(BodyTag::Obstacle(obstacle)),
            ContactEvent {
                a: BodyTag::Track(SegmentId(1)),
                b: BodyTag::Obstacle(obstacle),
            },
        ];
        let summary = CollisionOracle::resolve_contacts(&contacts);
        assert!(summary.grounded);
        assert_eq!(summary.obstacle, Some(obstacle));
        assert_eq!(
            CollisionOracle::resolve_contacts(&[]),
            ContactSummary::default()
        );
    }

    #[test]
    fn test_collider_registration_and_moving_sync() {
        let mut track = seeded_track();
        // Walk far enough for obstacles to show up
        let mut guard = 0;
        while !track
            .window()
            .iter()
            .any(|s| s.obstacles.iter().any(|o| o.is_moving()))
        {
            let last = track.last().unwrap().center;
            track.advance(last, Pattern::FlatWithObstacles);
            guard += 1;
            assert!(guard < 500, "no moving obstacle generated");
        }

        let mut world = HeadlessColliders::default();
        for seg in track.window() {
            register_segment(&mut world, seg);
        }
        let obstacle = track
            .window()
            .iter()
            .flat_map(|s| &s.obstacles)
            .find(|o| o.is_moving())
            .unwrap()
            .clone();
        let tag = BodyTag::Obstacle(obstacle.id);
        assert!(world.get(tag).unwrap().kinematic);

        let time = 0.7;
        sync_moving_obstacles(&mut world, track.window(), time);
        let synced = world.get(tag).unwrap().position;
        assert!(synced.abs_diff_eq(obstacle.world_position(time), 1e-5));
        if let ObstacleMotion::Moving { range, .. } = obstacle.motion {
            assert!(synced.distance(obstacle.anchor) <= range + 1e-4);
        }

        let owner = track.segment(obstacle.id.segment).unwrap().clone();
        unregister_segment(&mut world, &owner);
        assert!(world.get(tag).is_none());
        assert!(world.get(BodyTag::Track(owner.id)).is_none());
    }
}
