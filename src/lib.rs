//! Kaiju Kitty - a giant kitty shoves buildings off the edge of the world
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, camera follow, push physics, respawn)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{RenderError, TuningError};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::{Quat, Vec3};

/// Game configuration constants
pub mod consts {
    /// Side length of the square ground plane
    pub const WORLD_SIZE: f32 = 50.0;
    /// Buildings alive at any moment
    pub const BUILDING_COUNT: usize = 30;

    /// Kitty translation per tick
    pub const KITTY_SPEED: f32 = 0.2;
    /// Kitty yaw change per tick (radians)
    pub const KITTY_ROT_SPEED: f32 = 0.05;

    /// Camera offset in kitty-local space: above and behind (+Z is behind)
    pub const CAMERA_OFFSET: [f32; 3] = [0.0, 10.0, 20.0];
    /// Fraction of the remaining distance the camera covers per tick
    pub const CAMERA_LERP: f32 = 0.1;

    /// Approximate kitty footprint added to a building's radius
    pub const COLLISION_BUFFER: f32 = 2.0;
    /// Velocity added per tick of overlap
    pub const PUSH_IMPULSE: f32 = 0.5;
    /// Per-tick velocity multiplier (friction)
    pub const VELOCITY_DAMPING: f32 = 0.9;

    /// Vertical drop per tick once a building goes over the edge
    pub const FALL_SPEED: f32 = 0.5;
    /// Tumble per tick on the X and Z axes (radians)
    pub const TUMBLE_SPEED: f32 = 0.1;
    /// Buildings below this height are reaped
    pub const FALL_DEPTH: f32 = -20.0;

    /// Keeps fresh spawns this far (in total) away from the world edge
    pub const SPAWN_MARGIN: f32 = 10.0;
    /// Building extents: (min, max) ranges, sampled uniformly
    pub const WIDTH_RANGE: (f32, f32) = (1.0, 3.0);
    pub const HEIGHT_RANGE: (f32, f32) = (2.0, 8.0);
    pub const DEPTH_RANGE: (f32, f32) = (1.0, 3.0);
}

/// Rotation about the world Y axis for a yaw angle
#[inline]
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Forward direction for a yaw angle (-Z when yaw is zero)
#[inline]
pub fn forward_axis(yaw: f32) -> Vec3 {
    yaw_rotation(yaw) * Vec3::NEG_Z
}

/// Convert HSL (all components in [0, 1]) to sRGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let hue = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    [hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0)]
}
