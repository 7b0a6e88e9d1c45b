//! Per-frame simulation tick
//!
//! One call advances the world by one rendered frame. The caller owns the
//! scheduling; nothing in here waits or re-arms itself.

use super::collision::{step_active, step_falling};
use super::input::InputState;
use super::state::GameState;

/// Receives the score every time a building is destroyed
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u64);
}

impl<F: FnMut(u64)> ScoreDisplay for F {
    fn show_score(&mut self, score: u64) {
        self(score)
    }
}

/// Advance the game by one tick.
///
/// Order: kitty movement, camera follow, then a single pass over the pool in
/// which each building runs either its physics step or its fall step. Reaped
/// buildings are collected during the pass; removal, scoring and respawn are
/// applied once the pass is done so the pool is never mutated mid-iteration.
///
/// Returns the number of buildings destroyed this tick.
pub fn tick(state: &mut GameState, input: &InputState, display: &mut impl ScoreDisplay) -> usize {
    if !state.is_running() {
        return 0;
    }

    state.time_ticks += 1;

    let tuning = &state.tuning;
    state
        .kitty
        .apply_input(input, tuning.kitty_speed, tuning.kitty_rot_speed);
    state
        .camera
        .follow(&state.kitty, tuning.camera_offset(), tuning.camera_lerp);

    let kitty_pos = state.kitty.position;
    let mut reaped = Vec::new();
    for obstacle in state.obstacles.iter_mut() {
        if obstacle.is_falling() {
            if step_falling(obstacle, tuning) {
                reaped.push(obstacle.id);
            }
            continue;
        }

        if let Some(contact) = step_active(obstacle, kitty_pos, tuning) {
            log::trace!(
                "Kitty pushing building {} (overlap {:.2})",
                obstacle.id,
                contact.penetration
            );
        }
        if obstacle.is_falling() {
            log::debug!(
                "Building {} went over the edge at ({:.1}, {:.1})",
                obstacle.id,
                obstacle.position.x,
                obstacle.position.z
            );
        }
    }

    if reaped.is_empty() {
        return 0;
    }

    let removed = state.obstacles.remove_all(&reaped);
    for _ in 0..removed {
        state.score += 1;
        display.show_score(state.score);
        let id = state.obstacles.spawn(&mut state.rng, &state.tuning);
        log::debug!("Building destroyed (score {}), respawned as {}", state.score, id);
    }

    removed
}
