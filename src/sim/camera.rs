//! Chase camera
//!
//! Trails the kitty from a fixed local offset, easing toward its target
//! position each tick. The look target snaps to the kitty.

use glam::Vec3;

use super::state::Kitty;

#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
}

impl FollowCamera {
    /// Camera parked at the follow offset behind a kitty standing at the origin
    pub fn new(offset: Vec3) -> Self {
        Self {
            position: offset,
            target: Vec3::ZERO,
        }
    }

    /// Where the camera wants to be: `offset` carried into world space by the
    /// kitty's transform, so the offset swings around with its yaw
    pub fn desired_position(kitty: &Kitty, offset: Vec3) -> Vec3 {
        kitty.world_transform().transform_point3(offset)
    }

    /// Ease `lerp` of the remaining way toward the desired position
    pub fn follow(&mut self, kitty: &Kitty, offset: Vec3, lerp: f32) {
        let desired = Self::desired_position(kitty, offset);
        self.position = self.position.lerp(desired, lerp);
        self.target = kitty.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const OFFSET: Vec3 = Vec3::new(0.0, 10.0, 20.0);

    #[test]
    fn test_desired_position_rotates_with_yaw() {
        let kitty = Kitty {
            position: Vec3::new(5.0, 0.0, 5.0),
            yaw: 0.0,
        };
        let p = FollowCamera::desired_position(&kitty, OFFSET);
        assert!(p.abs_diff_eq(Vec3::new(5.0, 10.0, 25.0), 1e-5));

        // Facing -X, "behind" is +X
        let kitty = Kitty {
            position: Vec3::ZERO,
            yaw: FRAC_PI_2,
        };
        let p = FollowCamera::desired_position(&kitty, OFFSET);
        assert!(p.abs_diff_eq(Vec3::new(20.0, 10.0, 0.0), 1e-4));
    }

    #[test]
    fn test_follow_moves_fraction_of_gap() {
        let mut camera = FollowCamera::new(OFFSET);
        let kitty = Kitty {
            position: Vec3::new(10.0, 0.0, 0.0),
            yaw: 0.0,
        };
        let desired = FollowCamera::desired_position(&kitty, OFFSET);

        let before = camera.position;
        camera.follow(&kitty, OFFSET, 0.1);
        let moved = camera.position - before;
        let expected = (desired - before) * 0.1;
        assert!(moved.abs_diff_eq(expected, 1e-5));
        assert_eq!(camera.target, kitty.position);
    }

    #[test]
    fn test_follow_converges() {
        let mut camera = FollowCamera::new(Vec3::new(-30.0, 50.0, 0.0));
        let kitty = Kitty::default();
        let mut last_gap = f32::MAX;
        for _ in 0..200 {
            camera.follow(&kitty, OFFSET, 0.1);
            let gap = camera.position.distance(OFFSET);
            assert!(gap <= last_gap + 1e-6);
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
    }

    #[test]
    fn test_follow_at_rest_is_stable() {
        let mut camera = FollowCamera::new(OFFSET);
        camera.follow(&Kitty::default(), OFFSET, 0.1);
        assert!(camera.position.abs_diff_eq(OFFSET, 1e-6));
    }
}
