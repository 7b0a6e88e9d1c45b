//! Property tests for the session-wide invariants of the simulation

use std::collections::HashSet;

use glam::Vec3;
use proptest::prelude::*;

use kaiju_kitty::Tuning;
use kaiju_kitty::sim::{Direction, GameState, InputState, Obstacle, collision_radius, tick};

/// Bitmask -> held keys (bit 0 forward, 1 backward, 2 left, 3 right)
fn input_from_bits(bits: u8) -> InputState {
    let mut input = InputState::new();
    for (bit, dir) in [
        Direction::Forward,
        Direction::Backward,
        Direction::TurnLeft,
        Direction::TurnRight,
    ]
    .into_iter()
    .enumerate()
    {
        if bits & (1 << bit) != 0 {
            input.set_direction(dir, true);
        }
    }
    input
}

/// A cramped arena so random walks actually shove buildings off the edge
fn cramped() -> Tuning {
    Tuning {
        world_size: 10.0,
        spawn_margin: 2.0,
        building_count: 12,
        ..Tuning::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pool_size_score_and_falling_invariants(
        seed in any::<u64>(),
        inputs in prop::collection::vec(0u8..16, 1..400),
    ) {
        let tuning = cramped();
        let half = tuning.world_half_extent();
        let count = tuning.building_count;
        let mut state = GameState::with_tuning(seed, tuning).unwrap();

        let mut falling: HashSet<u32> = HashSet::new();
        let mut last_score = 0;

        for bits in inputs {
            let mut shown = Vec::new();
            let reaped = tick(&mut state, &input_from_bits(bits), &mut |s: u64| shown.push(s));

            prop_assert_eq!(state.obstacles.len(), count);

            prop_assert_eq!(state.score, last_score + reaped as u64);
            prop_assert_eq!(shown.len(), reaped);
            if let Some(&displayed) = shown.last() {
                prop_assert_eq!(displayed, state.score);
            }
            last_score = state.score;

            for ob in &state.obstacles {
                if falling.contains(&ob.id) {
                    prop_assert!(ob.is_falling(), "building {} stood back up", ob.id);
                }
                if !ob.is_falling() {
                    prop_assert!(ob.position.x.abs() <= half && ob.position.z.abs() <= half);
                }
            }
            falling = state
                .obstacles
                .iter()
                .filter(|o| o.is_falling())
                .map(|o| o.id)
                .collect();
        }
    }

    #[test]
    fn overlapping_building_at_rest_is_pushed_away(
        angle in 0.0f32..std::f32::consts::TAU,
        frac in 0.05f32..0.95,
        w in 1.0f32..3.0,
        d in 1.0f32..3.0,
    ) {
        let extents = Vec3::new(w, 4.0, d);
        let radius = collision_radius(extents, kaiju_kitty::consts::COLLISION_BUFFER);
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * radius * frac;

        let mut state = GameState::new(1);
        state.obstacles.clear();
        let id = state.obstacles.insert(Obstacle::new(0, extents, offset + Vec3::Y * 2.0, [1.0; 3]));

        tick(&mut state, &InputState::default(), &mut |_: u64| {});

        let ob = state.obstacles.get(id).unwrap();
        prop_assert!(ob.velocity.length() > 0.0);
        prop_assert!(ob.velocity.dot(offset) > 0.0, "velocity points away from the kitty");
        prop_assert_eq!(ob.velocity.y, 0.0);
    }

    #[test]
    fn idle_kitty_never_moves(seed in any::<u64>(), ticks in 1usize..200) {
        let mut state = GameState::new(seed);
        for _ in 0..ticks {
            tick(&mut state, &InputState::default(), &mut |_: u64| {});
        }
        prop_assert_eq!(state.kitty.position, Vec3::ZERO);
        prop_assert_eq!(state.kitty.yaw, 0.0);
    }
}
