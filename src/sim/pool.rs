//! Building pool: sole owner of every `Obstacle`
//!
//! Buildings keep spawn order; ids are never reused within a session.

use glam::Vec3;
use rand::Rng;

use super::state::Obstacle;
use crate::hsl_to_rgb;
use crate::tuning::Tuning;

/// Uniform draw from `[min, max)`; a collapsed range yields `min`
fn sample_range(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    if min < max {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstaclePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a building with random extents, placement and colour, resting on
    /// the ground somewhere inside the margin-reduced spawn square.
    pub fn spawn(&mut self, rng: &mut impl Rng, tuning: &Tuning) -> u32 {
        let extents = Vec3::new(
            sample_range(rng, tuning.width_range),
            sample_range(rng, tuning.height_range),
            sample_range(rng, tuning.depth_range),
        );

        let half = tuning.spawn_half_extent();
        let position = Vec3::new(
            sample_range(rng, (-half, half)),
            extents.y / 2.0,
            sample_range(rng, (-half, half)),
        );

        let color = hsl_to_rgb(rng.random::<f32>(), 0.3, 0.6);

        self.insert(Obstacle::new(0, extents, position, color))
    }

    /// Add a hand-built obstacle (scripted scenes, tests). It is given a
    /// fresh id, which is returned.
    pub fn insert(&mut self, mut obstacle: Obstacle) -> u32 {
        let id = self.next_obstacle_id();
        obstacle.id = id;
        self.obstacles.push(obstacle);
        id
    }

    /// Remove every obstacle whose id is listed. Returns how many were removed.
    pub fn remove_all(&mut self, ids: &[u32]) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !ids.contains(&o.id));
        before - self.obstacles.len()
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Obstacle> {
        self.obstacles.iter_mut().find(|o| o.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Drop everything (test scaffolding for single-building scenarios)
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }
}

impl<'a> IntoIterator for &'a ObstaclePool {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}
