//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; nothing is global.

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::FollowCamera;
use super::input::InputState;
use super::pool::ObstaclePool;
use crate::error::TuningError;
use crate::tuning::Tuning;
use crate::{forward_axis, yaw_rotation};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ticking normally (there is no game over)
    Running,
    /// Torn down via `GameState::shutdown`; ticks are ignored
    Stopped,
}

/// The player-controlled kitty
#[derive(Debug, Clone, PartialEq)]
pub struct Kitty {
    pub position: Vec3,
    /// Rotation about world Y (radians). Zero faces -Z.
    pub yaw: f32,
}

impl Default for Kitty {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

impl Kitty {
    /// Unit vector the kitty is facing
    pub fn forward(&self) -> Vec3 {
        forward_axis(self.yaw)
    }

    /// Local-to-world transform, built fresh from the current position and yaw
    pub fn world_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(yaw_rotation(self.yaw), self.position)
    }

    /// Walk and turn from the held keys. Translation uses the yaw from before
    /// this tick's turn. Opposing keys cancel; nothing is normalised.
    pub fn apply_input(&mut self, input: &InputState, speed: f32, turn_speed: f32) {
        if input.forward() {
            self.position += self.forward() * speed;
        }
        if input.backward() {
            self.position -= self.forward() * speed;
        }
        if input.turn_left() {
            self.yaw += turn_speed;
        }
        if input.turn_right() {
            self.yaw -= turn_speed;
        }
    }
}

/// Lifecycle of a building: standing on the map, or tumbling into the void
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleMode {
    Active,
    Falling,
}

/// A cardboard building
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Width (X), height (Y), depth (Z). Fixed at spawn.
    extents: Vec3,
    pub position: Vec3,
    /// Euler XYZ (radians); only changes while falling
    pub rotation: Vec3,
    pub velocity: Vec3,
    pub color: [f32; 3],
    mode: ObstacleMode,
}

impl Obstacle {
    /// A resting building at `position`
    pub fn new(id: u32, extents: Vec3, position: Vec3, color: [f32; 3]) -> Self {
        Self {
            id,
            extents,
            position,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color,
            mode: ObstacleMode::Active,
        }
    }

    #[inline]
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    #[inline]
    pub fn mode(&self) -> ObstacleMode {
        self.mode
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.mode == ObstacleMode::Falling
    }

    /// Push the building over the edge. There is no way back.
    pub fn start_falling(&mut self) {
        self.mode = ObstacleMode::Falling;
    }

    /// Model matrix for drawing (scale by extents, tumble, translate)
    pub fn world_transform(&self) -> Mat4 {
        let rot = glam::Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.extents, rot, self.position)
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Buildings destroyed
    pub score: u64,
    pub kitty: Kitty,
    pub camera: FollowCamera,
    pub obstacles: ObstaclePool,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new session from custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut obstacles = ObstaclePool::new();
        for _ in 0..tuning.building_count {
            obstacles.spawn(&mut rng, &tuning);
        }

        log::info!(
            "Session created: seed {}, {} buildings in a {}x{} world",
            seed,
            obstacles.len(),
            tuning.world_size,
            tuning.world_size
        );

        Self {
            seed,
            camera: FollowCamera::new(tuning.camera_offset()),
            tuning,
            phase: GamePhase::Running,
            time_ticks: 0,
            score: 0,
            kitty: Kitty::default(),
            obstacles,
            rng,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Stop the session. Later ticks leave the state untouched.
    pub fn shutdown(&mut self) {
        if self.phase != GamePhase::Stopped {
            log::info!(
                "Session stopped after {} ticks, score {}",
                self.time_ticks,
                self.score
            );
            self.phase = GamePhase::Stopped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Direction;

    #[test]
    fn test_new_session() {
        let state = GameState::new(42);
        assert_eq!(state.obstacles.len(), crate::consts::BUILDING_COUNT);
        assert_eq!(state.score, 0);
        assert!(state.is_running());
        assert_eq!(state.kitty, Kitty::default());
        assert!(state.obstacles.iter().all(|o| !o.is_falling()));
    }

    #[test]
    fn test_same_seed_same_world() {
        assert_eq!(GameState::new(7), GameState::new(7));
        assert_ne!(GameState::new(7).obstacles, GameState::new(8).obstacles);
    }

    #[test]
    fn test_with_tuning_validates() {
        let tuning = Tuning {
            building_count: 0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(1, tuning),
            Err(TuningError::EmptyPool)
        ));

        let tuning = Tuning {
            building_count: 3,
            ..Tuning::default()
        };
        assert_eq!(GameState::with_tuning(1, tuning).unwrap().obstacles.len(), 3);
    }

    #[test]
    fn test_with_tuning_rejects_infinite_extents() {
        let tuning = Tuning {
            width_range: (1.0, f32::INFINITY),
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(1, tuning),
            Err(TuningError::NonFinite { name: "width_range", .. })
        ));
    }

    #[test]
    fn test_kitty_walks_forward_along_neg_z() {
        let mut kitty = Kitty::default();
        kitty.apply_input(&InputState::with(&[Direction::Forward]), 0.2, 0.05);
        assert!(kitty.position.abs_diff_eq(Vec3::new(0.0, 0.0, -0.2), 1e-6));
        assert_eq!(kitty.yaw, 0.0);

        kitty.apply_input(&InputState::with(&[Direction::Backward]), 0.2, 0.05);
        assert!(kitty.position.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_kitty_turns() {
        let mut kitty = Kitty::default();
        kitty.apply_input(&InputState::with(&[Direction::TurnLeft]), 0.2, 0.05);
        assert!((kitty.yaw - 0.05).abs() < 1e-6);
        kitty.apply_input(&InputState::with(&[Direction::TurnRight]), 0.2, 0.05);
        kitty.apply_input(&InputState::with(&[Direction::TurnRight]), 0.2, 0.05);
        assert!((kitty.yaw + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_walk_while_turning_uses_old_heading() {
        let mut kitty = Kitty::default();
        let input = InputState::with(&[Direction::Forward, Direction::TurnLeft]);
        kitty.apply_input(&input, 1.0, 0.5);
        // Moved straight along -Z, then turned
        assert!(kitty.position.abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!((kitty.yaw - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut kitty = Kitty::default();
        let input = InputState::with(&[
            Direction::Forward,
            Direction::Backward,
            Direction::TurnLeft,
            Direction::TurnRight,
        ]);
        kitty.apply_input(&input, 0.2, 0.05);
        assert!(kitty.position.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(kitty.yaw.abs() < 1e-6);
    }

    #[test]
    fn test_falling_is_one_way() {
        let mut ob = Obstacle::new(1, Vec3::ONE, Vec3::ZERO, [1.0; 3]);
        assert_eq!(ob.mode(), ObstacleMode::Active);
        ob.start_falling();
        ob.start_falling();
        assert!(ob.is_falling());
    }

    #[test]
    fn test_shutdown() {
        let mut state = GameState::new(1);
        state.shutdown();
        assert!(!state.is_running());
        state.shutdown();
        assert_eq!(state.phase, GamePhase::Stopped);
    }
}
