//! Kitty-vs-building contact and push response
//!
//! Contact is a cheap cylinder test on the ground plane: each building gets a
//! radius from its larger horizontal extent, padded by the kitty's footprint.
//! Height never matters. Buildings never collide with each other.

use glam::Vec3;

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Result of a contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Horizontal unit vector from the kitty toward the building
    pub push_dir: Vec3,
    /// Overlap depth on the ground plane
    pub penetration: f32,
}

/// Contact radius for a building of the given extents
#[inline]
pub fn collision_radius(extents: Vec3, buffer: f32) -> f32 {
    extents.x.max(extents.z) / 2.0 + buffer
}

/// Squared distance on the XZ plane
#[inline]
pub fn horizontal_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Check whether the kitty at `kitty_pos` is pressing against `obstacle`.
///
/// A kitty standing exactly on a building's centre overlaps it but has no
/// meaningful push direction; that case reports no contact.
pub fn kitty_contact(kitty_pos: Vec3, obstacle: &Obstacle, buffer: f32) -> Option<Contact> {
    let radius = collision_radius(obstacle.extents(), buffer);
    let dist_sq = horizontal_distance_sq(kitty_pos, obstacle.position);
    if dist_sq >= radius * radius {
        return None;
    }

    let mut away = obstacle.position - kitty_pos;
    away.y = 0.0; // Flatten so buildings never get launched upward
    let push_dir = away.try_normalize()?;

    Some(Contact {
        push_dir,
        penetration: radius - dist_sq.sqrt(),
    })
}

/// Whether a position lies outside the square world bound on either axis
#[inline]
pub fn beyond_bound(position: Vec3, half_extent: f32) -> bool {
    position.x.abs() > half_extent || position.z.abs() > half_extent
}

/// One physics step for a standing building: impulse on contact, Euler
/// integration, friction, then the edge check. Returns the contact, if any.
///
/// Friction is applied after integration, so a fresh push moves the building
/// by the full impulse this tick.
pub fn step_active(obstacle: &mut Obstacle, kitty_pos: Vec3, tuning: &Tuning) -> Option<Contact> {
    debug_assert!(!obstacle.is_falling());

    let contact = kitty_contact(kitty_pos, obstacle, tuning.collision_buffer);
    if let Some(contact) = contact {
        obstacle.velocity += contact.push_dir * tuning.push_impulse;
    }

    obstacle.position += obstacle.velocity;
    obstacle.velocity *= tuning.velocity_damping;

    if beyond_bound(obstacle.position, tuning.world_half_extent()) {
        obstacle.start_falling();
    }

    contact
}

/// One tick of the cosmetic fall: drop and tumble. Returns true once the
/// building has sunk below the reap depth.
pub fn step_falling(obstacle: &mut Obstacle, tuning: &Tuning) -> bool {
    debug_assert!(obstacle.is_falling());

    obstacle.position.y -= tuning.fall_speed;
    obstacle.rotation.x += tuning.tumble_speed;
    obstacle.rotation.z += tuning.tumble_speed;

    obstacle.position.y < tuning.fall_depth
}
