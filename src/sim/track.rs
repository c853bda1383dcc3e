//! Live segment window
//!
//! Generates ahead of the player, evicts behind, and remembers which coins and
//! hearts have been picked up.

use std::collections::HashSet;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::generator::generate_segment;
use super::segment::{CoinId, HeartId, Pattern, Segment, SegmentId};
use crate::consts::*;
use crate::travel_progress;

/// Segments added and removed by one `advance`/`reseed`
#[derive(Debug, Default)]
pub struct TrackChanges {
    pub spawned: Vec<SegmentId>,
    pub evicted: Vec<Segment>,
}

impl TrackChanges {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.evicted.is_empty()
    }
}

/// Ordered window of live segments
#[derive(Debug, Clone)]
pub struct TrackStream {
    /// Sorted by index
    segments: Vec<Segment>,
    /// Start of the next segment
    cursor: Vec3,
    next_index: u32,
    /// Never reset, so ids stay unique across runs
    next_id: u64,
    rng: Pcg32,
    collected_coins: HashSet<CoinId>,
    collected_hearts: HashSet<HeartId>,
}

impl TrackStream {
    /// Empty window. Call `reseed` before the first run.
    pub fn new(seed: u64) -> Self {
        Self {
            segments: Vec::new(),
            cursor: Vec3::ZERO,
            next_index: 0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
            collected_coins: HashSet::new(),
            collected_hearts: HashSet::new(),
        }
    }

    /// Live segments, ordered by index
    pub fn window(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn by_index(&self, index: u32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.index == index)
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn cursor(&self) -> Vec3 {
        self.cursor
    }

    /// Discard everything and lay down a fresh opening from the origin
    pub fn reseed(&mut self, seed: u64, pattern: Pattern) -> TrackChanges {
        let evicted = std::mem::take(&mut self.segments);
        self.cursor = Vec3::ZERO;
        self.next_index = 0;
        self.rng = Pcg32::seed_from_u64(seed);
        self.collected_coins.clear();
        self.collected_hearts.clear();

        let spawned = (0..OPENING_SEGMENTS)
            .map(|_| self.push_next(pattern))
            .collect();

        log::info!(
            "Track reseeded (seed {}, {} segments, {} discarded)",
            seed,
            self.segments.len(),
            evicted.len()
        );

        TrackChanges { spawned, evicted }
    }

    /// Grow the frontier toward the player and drop segments left behind
    pub fn advance(&mut self, player: Vec3, pattern: Pattern) -> TrackChanges {
        let mut changes = TrackChanges::default();

        while changes.spawned.len() < MAX_SPAWNS_PER_TICK {
            let near_frontier = self
                .frontier_distance(player)
                .is_none_or(|d| d < SPAWN_DISTANCE);
            if !near_frontier {
                break;
            }
            changes.spawned.push(self.push_next(pattern));
        }

        let limit = travel_progress(player) - EVICT_MARGIN;
        let (kept, behind): (Vec<_>, Vec<_>) = std::mem::take(&mut self.segments)
            .into_iter()
            .partition(|s| travel_progress(s.center) >= limit);
        self.segments = kept;
        changes.evicted = behind;

        if self.segments.len() > MAX_WINDOW_SEGMENTS {
            let excess = self.segments.len() - MAX_WINDOW_SEGMENTS;
            changes.evicted.extend(self.segments.drain(..excess));
        }

        for seg in &changes.evicted {
            self.collected_coins.remove(&CoinId(seg.id));
            self.collected_hearts.remove(&HeartId(seg.id));
        }

        changes
    }

    /// Distance from the player to the last segment's center
    pub fn frontier_distance(&self, player: Vec3) -> Option<f32> {
        self.segments.last().map(|s| s.center.distance(player))
    }

    pub fn is_coin_collected(&self, id: CoinId) -> bool {
        self.collected_coins.contains(&id)
    }

    pub fn is_heart_collected(&self, id: HeartId) -> bool {
        self.collected_hearts.contains(&id)
    }

    /// Returns true only the first time a coin is marked
    pub fn mark_coin_collected(&mut self, id: CoinId) -> bool {
        self.collected_coins.insert(id)
    }

    /// Returns true only the first time a heart is marked
    pub fn mark_heart_collected(&mut self, id: HeartId) -> bool {
        self.collected_hearts.insert(id)
    }

    fn push_next(&mut self, pattern: Pattern) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        let (segment, cursor) = generate_segment(id, self.next_index, pattern, self.cursor, &mut self.rng);
        self.next_index += 1;
        self.cursor = cursor;
        self.segments.push(segment);
        id
    }
}
