//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod pool;
pub mod state;
pub mod tick;

pub use camera::FollowCamera;
pub use collision::{Contact, beyond_bound, collision_radius, kitty_contact, step_active, step_falling};
pub use input::{Direction, InputState};
pub use pool::ObstaclePool;
pub use state::{GamePhase, GameState, Kitty, Obstacle, ObstacleMode};
pub use tick::{ScoreDisplay, tick};
