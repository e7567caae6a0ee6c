//! Round state and core simulation types
//!
//! A round owns one avatar and one obstacle set from its first tick until a
//! collision ends it. Nothing here outlives the round except the summary.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::{Tuning, TuningError};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ticks are being processed
    Running,
    /// A collision ended the round; further ticks are ignored
    Ended,
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Avatar sank below the playfield floor
    Ground,
    /// Avatar touched a bar of the given gate
    Gate { gate: u32 },
}

/// The player-controlled box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner; x never changes during a round
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive is down
    pub vel_y: f32,
}

impl Avatar {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel_y: 0.0,
        }
    }

    /// Avatar at the tuning's start point, at rest
    pub fn spawn(tuning: &Tuning) -> Self {
        Self::new(
            Vec2::new(tuning.avatar_start_x, tuning.avatar_start_y),
            Vec2::new(tuning.avatar_width, tuning.avatar_height),
        )
    }

    /// Replace vertical velocity with the jump impulse (jumps do not stack)
    pub fn jump(&mut self, impulse: f32) {
        self.vel_y = impulse;
    }

    /// Integrate one tick: gravity first, then position
    pub fn tick(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        // Soft bounce off the ceiling
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = -self.vel_y / 2.0;
        }
    }

    /// True once the avatar's vertical midpoint is past the floor
    pub fn has_hit_ground(&self, floor: f32) -> bool {
        self.pos.y + self.size.y / 2.0 > floor
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Closed-interval overlap with a bar
    pub fn overlaps(&self, segment: &Segment) -> bool {
        self.bounds().overlaps(&segment.bounds())
    }
}

/// Which half of a gate a bar is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Hangs from the ceiling
    Top,
    /// Stands on the floor
    Bottom,
}

/// One bar of a gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    /// Shared by the two bars spawned together
    pub gate: u32,
    pub kind: SegmentKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward distance per tick
    pub speed: f32,
}

impl Segment {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Slide left by one tick's worth
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    /// Right edge has passed the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// All bars currently on the playfield, in spawn order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSet {
    segments: Vec<Segment>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a top/bottom bar pair at the right edge of the playfield.
    ///
    /// `top_height` must leave room for the gap plus a non-negative bottom bar;
    /// the spawn draw guarantees this for any tuning that passes validation.
    pub fn spawn_pair(&mut self, ids: [u32; 2], gate: u32, top_height: f32, tuning: &Tuning) {
        let x = tuning.spawn_x();
        let bottom_y = top_height + tuning.gate_gap;
        let bottom_height = tuning.playfield_height - top_height - tuning.gate_gap;

        self.segments.push(Segment {
            id: ids[0],
            gate,
            kind: SegmentKind::Top,
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(tuning.bar_width, top_height),
            speed: tuning.bar_speed,
        });
        self.segments.push(Segment {
            id: ids[1],
            gate,
            kind: SegmentKind::Bottom,
            pos: Vec2::new(x, bottom_y),
            size: Vec2::new(tuning.bar_width, bottom_height),
            speed: tuning.bar_speed,
        });
    }

    /// Slide every bar left
    pub fn tick_all(&mut self) {
        for segment in &mut self.segments {
            segment.advance();
        }
    }

    /// Keep only bars still (partly) on the playfield. Returns how many were dropped.
    pub fn prune_offscreen(&mut self) -> usize {
        let before = self.segments.len();
        self.segments.retain(|s| !s.is_offscreen());
        before - self.segments.len()
    }

    /// First bar the avatar touches, if any
    pub fn first_overlap(&self, avatar: &Avatar) -> Option<&Segment> {
        self.segments.iter().find(|s| avatar.overlaps(s))
    }

    /// Nearest gate whose bars have not yet fully passed `x`.
    /// Returns the gap's top and bottom edges.
    pub fn next_gap(&self, x: f32) -> Option<(f32, f32)> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Top && s.pos.x + s.size.x >= x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|top| {
                let gap_bottom = self
                    .segments
                    .iter()
                    .find(|s| s.gate == top.gate && s.kind == SegmentKind::Bottom)
                    .map(|b| b.pos.y)
                    .unwrap_or(top.size.y);
                (top.size.y, gap_bottom)
            })
    }
}

/// Final record of a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub seed: u64,
    pub score: u32,
    /// Frame counter at the moment of collision
    pub frames: u64,
    pub cause: EndCause,
    /// Avatar as it was on the ending tick
    pub avatar: Avatar,
}

/// Complete round state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub avatar: Avatar,
    pub obstacles: ObstacleSet,
    /// Ticks completed while running
    pub frame: u64,
    pub score: u32,
    pub phase: RoundPhase,
    /// Set when the phase becomes `Ended`
    pub end: Option<EndCause>,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
    next_gate: u32,
}

impl RoundState {
    /// Create a fresh round with the given seed; rejects tuning that cannot spawn gates
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            seed,
            avatar: Avatar::spawn(&tuning),
            obstacles: ObstacleSet::new(),
            frame: 0,
            score: 0,
            phase: RoundPhase::Running,
            end: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            next_gate: 1,
            tuning,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Draw a top-bar height from the round's RNG
    pub fn draw_top_height(&mut self) -> i32 {
        let range = self.tuning.top_height_range();
        self.rng.random_range(range)
    }

    /// Spawn a gate pair with the given top-bar height. Returns the gate ID.
    pub fn spawn_gate(&mut self, top_height: i32) -> u32 {
        let ids = [self.next_entity_id(), self.next_entity_id()];
        let gate = self.next_gate;
        self.next_gate += 1;
        self.obstacles
            .spawn_pair(ids, gate, top_height as f32, &self.tuning);
        gate
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Summary of an ended round
    pub fn summary(&self) -> Option<RoundSummary> {
        self.end.map(|cause| RoundSummary {
            seed: self.seed,
            score: self.score,
            frames: self.frame,
            cause,
            avatar: self.avatar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_round() -> RoundState {
        RoundState::new(7, Tuning::default()).unwrap()
    }

    #[test]
    fn test_avatar_spawns_at_rest() {
        let avatar = Avatar::spawn(&Tuning::default());
        assert_eq!(avatar.pos, Vec2::new(375.0, 400.0));
        assert_eq!(avatar.size, Vec2::new(50.0, 30.0));
        assert_eq!(avatar.vel_y, 0.0);
    }

    #[test]
    fn test_jump_applies_gravity_before_moving() {
        let mut avatar = Avatar::spawn(&Tuning::default());
        avatar.jump(-9.0);
        assert_eq!(avatar.vel_y, -9.0);
        avatar.tick(0.5);
        assert_eq!(avatar.vel_y, -8.5);
        assert_eq!(avatar.pos.y, 391.5);
    }

    #[test]
    fn test_jumps_do_not_stack() {
        let mut avatar = Avatar::spawn(&Tuning::default());
        avatar.jump(-9.0);
        avatar.jump(-9.0);
        avatar.jump(-9.0);
        assert_eq!(avatar.vel_y, -9.0);
    }

    #[test]
    fn test_free_fall_matches_closed_form() {
        let mut avatar = Avatar::spawn(&Tuning::default());
        for _ in 0..40 {
            avatar.tick(0.5);
        }
        // y = 400 + 0.5 * (1 + 2 + ... + 40)
        assert_eq!(avatar.vel_y, 20.0);
        assert_eq!(avatar.pos.y, 810.0);
    }

    #[test]
    fn test_ground_contact_threshold() {
        let mut avatar = Avatar::spawn(&Tuning::default());
        for _ in 0..38 {
            avatar.tick(0.5);
        }
        // 400 + 0.25 * 38 * 39
        assert_eq!(avatar.pos.y, 770.5);
        assert!(!avatar.has_hit_ground(800.0));

        avatar.tick(0.5);
        assert_eq!(avatar.pos.y, 790.0);
        assert!(avatar.has_hit_ground(800.0));
    }

    #[test]
    fn test_ground_uses_midpoint() {
        let mut avatar = Avatar::spawn(&Tuning::default());
        avatar.pos.y = 785.0;
        assert!(!avatar.has_hit_ground(800.0));
        avatar.pos.y = 785.5;
        assert!(avatar.has_hit_ground(800.0));
    }

    #[test]
    fn test_ceiling_bounce_halves_and_inverts() {
        let mut avatar = Avatar::spawn(&Tuning::default());
        avatar.pos.y = 4.0;
        avatar.vel_y = -10.5;
        avatar.tick(0.5);
        // vel -10.0 carries y to -6.0, clamped
        assert_eq!(avatar.pos.y, 0.0);
        assert_eq!(avatar.vel_y, 5.0);
    }

    #[test]
    fn test_pair_fills_playfield_around_gap() {
        let tuning = Tuning::default();
        let mut set = ObstacleSet::new();
        set.spawn_pair([1, 2], 1, 300.0, &tuning);

        let top = &set.segments()[0];
        let bottom = &set.segments()[1];
        assert_eq!(top.kind, SegmentKind::Top);
        assert_eq!(top.pos, Vec2::new(1470.0, 0.0));
        assert_eq!(top.size, Vec2::new(30.0, 300.0));
        assert_eq!(bottom.kind, SegmentKind::Bottom);
        assert_eq!(bottom.pos, Vec2::new(1470.0, 450.0));
        assert_eq!(bottom.size.y, 350.0);
        assert_eq!(top.gate, bottom.gate);
    }

    #[test]
    fn test_pair_reaches_edge_after_250_ticks_then_prunes() {
        let tuning = Tuning::default();
        let mut set = ObstacleSet::new();
        set.spawn_pair([1, 2], 1, 300.0, &tuning);

        for _ in 0..250 {
            set.tick_all();
            assert_eq!(set.prune_offscreen(), 0);
        }
        // 1470 - 1500: right edge sits exactly on the left border
        assert_eq!(set.segments()[0].pos.x, -30.0);
        assert_eq!(set.len(), 2);

        set.tick_all();
        assert_eq!(set.prune_offscreen(), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn test_prune_leaves_survivors_untouched() {
        let tuning = Tuning::default();
        let mut set = ObstacleSet::new();
        set.spawn_pair([1, 2], 1, 100.0, &tuning);
        set.spawn_pair([3, 4], 2, 200.0, &tuning);
        set.segments[0].pos.x = -31.0;
        set.segments[1].pos.x = -31.0;
        let survivors = set.segments[2..].to_vec();

        assert_eq!(set.prune_offscreen(), 2);
        assert_eq!(set.segments(), survivors.as_slice());
    }

    #[test]
    fn test_first_overlap_finds_touching_bar() {
        let tuning = Tuning::default();
        let mut set = ObstacleSet::new();
        set.spawn_pair([1, 2], 9, 300.0, &tuning);
        let avatar = Avatar {
            pos: set.segments()[1].pos,
            size: set.segments()[1].size,
            vel_y: 0.0,
        };
        let hit = set.first_overlap(&avatar).map(|s| s.id);
        assert_eq!(hit, Some(2));
    }

    #[test]
    fn test_next_gap_skips_passed_gates() {
        let tuning = Tuning::default();
        let mut set = ObstacleSet::new();
        set.spawn_pair([1, 2], 1, 100.0, &tuning);
        set.spawn_pair([3, 4], 2, 250.0, &tuning);
        set.segments[0].pos.x = 300.0;
        set.segments[1].pos.x = 300.0;

        assert_eq!(set.next_gap(200.0), Some((100.0, 250.0)));
        assert_eq!(set.next_gap(375.0), Some((250.0, 400.0)));
        assert_eq!(ObstacleSet::new().next_gap(0.0), None);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut round = default_round();
        let a = round.spawn_gate(100);
        let b = round.spawn_gate(200);
        assert_ne!(a, b);
        let ids: Vec<u32> = round.obstacles.segments().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = default_round();
        let mut b = default_round();
        for _ in 0..32 {
            let h = a.draw_top_height();
            assert_eq!(h, b.draw_top_height());
            assert!((50..450).contains(&h));
        }
    }

    #[test]
    fn test_round_rejects_tuning_without_room_for_gate() {
        let short = Tuning {
            playfield_height: 300.0,
            ..Default::default()
        };
        assert_eq!(
            RoundState::new(1, short).err(),
            Some(TuningError::GateDoesNotFit {
                max_top: 199.0,
                limit: 150.0
            })
        );

        let flat = Tuning {
            playfield_height: 1.0,
            ..Default::default()
        };
        assert!(RoundState::new(1, flat).is_err());
    }

    proptest! {
        #[test]
        fn prop_avatar_never_above_ceiling(
            y in 0.0f32..800.0,
            vel in -40.0f32..40.0,
            jumps in proptest::collection::vec(any::<bool>(), 1..200),
        ) {
            let mut avatar = Avatar::spawn(&Tuning::default());
            avatar.pos.y = y;
            avatar.vel_y = vel;
            for jump in jumps {
                if jump {
                    avatar.jump(-9.0);
                }
                avatar.tick(0.5);
                prop_assert!(avatar.pos.y >= 0.0);
            }
        }

        #[test]
        fn prop_pair_heights_sum_to_playfield(top in 50i32..450) {
            let tuning = Tuning::default();
            let mut set = ObstacleSet::new();
            set.spawn_pair([1, 2], 1, top as f32, &tuning);
            let total = set.segments()[0].size.y + tuning.gate_gap + set.segments()[1].size.y;
            prop_assert_eq!(total, tuning.playfield_height);
        }

        #[test]
        fn prop_prune_matches_right_edge(xs in proptest::collection::vec(-100.0f32..100.0, 0..40)) {
            let tuning = Tuning::default();
            let mut set = ObstacleSet::new();
            for (i, x) in xs.iter().enumerate() {
                set.spawn_pair([2 * i as u32, 2 * i as u32 + 1], i as u32, 100.0, &tuning);
                let n = set.segments.len();
                set.segments[n - 2].pos.x = *x;
                set.segments[n - 1].pos.x = *x;
            }
            let expected = xs.iter().filter(|x| **x + tuning.bar_width >= 0.0).count() * 2;
            set.prune_offscreen();
            prop_assert_eq!(set.len(), expected);
            prop_assert!(set.segments().iter().all(|s| s.pos.x + s.size.x >= 0.0));
        }
    }
}
