//! Box geometry and per-frame instance lists
//!
//! Everything on screen is a scaled unit cube: the ground slab, the five
//! parts of the kitty, and every building in the pool.

use glam::{Mat4, Quat, Vec3};

use super::vertex::{Instance, Vertex, colors};
use crate::sim::{GameState, Kitty, Obstacle};

/// Thickness of the ground slab (its top face sits at y = 0)
const GROUND_THICKNESS: f32 = 0.1;

/// Unit cube centred on the origin, one quad per face so normals stay flat
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, tangent u, tangent v) per face, u x v = normal for CCW winding
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (n, u, v) in faces {
        let n = Vec3::from_array(n);
        let u = Vec3::from_array(u);
        let v = Vec3::from_array(v);
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * 0.5;
            vertices.push(Vertex::new(p.to_array(), n.to_array()));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// Kitty body parts in kitty-local space: (size, centre, pitch)
///
/// The head is toward -Z, the way the kitty walks. The first browser version
/// of this game modelled the head at +Z, so the kitty walked tail-first.
const KITTY_PARTS: [([f32; 3], [f32; 3], f32); 5] = [
    // Body
    ([2.0, 1.5, 3.0], [0.0, 0.75, 0.0], 0.0),
    // Head
    ([1.5, 1.2, 1.2], [0.0, 1.8, -1.2], 0.0),
    // Ears
    ([0.3, 0.5, 0.2], [0.4, 2.5, -1.2], 0.0),
    ([0.3, 0.5, 0.2], [-0.4, 2.5, -1.2], 0.0),
    // Tail, tilted up
    ([0.4, 0.4, 2.0], [0.0, 1.0, 2.0], -0.5),
];

/// Number of instances drawn before the first building
pub const FIXED_INSTANCES: usize = 1 + KITTY_PARTS.len();

pub fn ground_instance(world_size: f32) -> Instance {
    let model = Mat4::from_scale_rotation_translation(
        Vec3::new(world_size, GROUND_THICKNESS, world_size),
        Quat::IDENTITY,
        Vec3::new(0.0, -GROUND_THICKNESS / 2.0, 0.0),
    );
    Instance::new(model, colors::GROUND)
}

pub fn kitty_instances(kitty: &Kitty) -> impl Iterator<Item = Instance> + '_ {
    let world = kitty.world_transform();
    KITTY_PARTS.iter().map(move |&(size, centre, pitch)| {
        let local = Mat4::from_scale_rotation_translation(
            Vec3::from_array(size),
            Quat::from_rotation_x(pitch),
            Vec3::from_array(centre),
        );
        Instance::new(world * local, colors::KITTY)
    })
}

pub fn obstacle_instance(obstacle: &Obstacle) -> Instance {
    Instance::new(obstacle.world_transform(), obstacle.color)
}

/// Fill `out` with every instance for this frame: ground, kitty, buildings
pub fn scene_instances(state: &GameState, out: &mut Vec<Instance>) {
    out.clear();
    out.push(ground_instance(state.tuning.world_size));
    out.extend(kitty_instances(&state.kitty));
    out.extend(state.obstacles.iter().map(obstacle_instance));
}
