//! WebGPU rendering module
//!
//! Draws the ground, the kitty and every building as instanced, flat-shaded
//! boxes. Reads the simulation state after each tick; never writes to it.

pub mod camera;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
