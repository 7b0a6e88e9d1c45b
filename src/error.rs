//! Error types
//!
//! The simulation tick itself is total; errors only surface while building a
//! session from tuning data or while bringing up the GPU.

use thiserror::Error;

/// Rejected tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be a finite number (got {value})")]
    NonFinite { name: &'static str, value: f32 },
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },
    #[error("world_size must be positive (got {0})")]
    WorldSize(f32),
    #[error("building_count must be at least 1")]
    EmptyPool,
    #[error("velocity_damping must be in [0, 1) (got {0})")]
    Damping(f32),
    #[error("camera_lerp must be in (0, 1] (got {0})")]
    CameraLerp(f32),
    #[error("spawn_margin {margin} leaves no room inside world_size {world_size}")]
    SpawnMargin { margin: f32, world_size: f32 },
    #[error("{name} range is inverted or non-positive: ({min}, {max})")]
    ExtentRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("fall_speed must be positive (got {0})")]
    FallSpeed(f32),
}

/// Renderer bring-up failure. Fatal: the game never starts.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not create a drawing surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("graphics device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
