//! Data-driven game balance
//!
//! Every gameplay constant lives in `Tuning` so a session can be built from a
//! JSON blob. Missing fields fall back to the defaults in `crate::consts`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_size: f32,
    pub building_count: usize,
    pub kitty_speed: f32,
    pub kitty_rot_speed: f32,
    pub camera_offset: [f32; 3],
    pub camera_lerp: f32,
    pub collision_buffer: f32,
    pub push_impulse: f32,
    pub velocity_damping: f32,
    pub fall_speed: f32,
    pub tumble_speed: f32,
    pub fall_depth: f32,
    pub spawn_margin: f32,
    pub width_range: (f32, f32),
    pub height_range: (f32, f32),
    pub depth_range: (f32, f32),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            building_count: BUILDING_COUNT,
            kitty_speed: KITTY_SPEED,
            kitty_rot_speed: KITTY_ROT_SPEED,
            camera_offset: CAMERA_OFFSET,
            camera_lerp: CAMERA_LERP,
            collision_buffer: COLLISION_BUFFER,
            push_impulse: PUSH_IMPULSE,
            velocity_damping: VELOCITY_DAMPING,
            fall_speed: FALL_SPEED,
            tumble_speed: TUMBLE_SPEED,
            fall_depth: FALL_DEPTH,
            spawn_margin: SPAWN_MARGIN,
            width_range: WIDTH_RANGE,
            height_range: HEIGHT_RANGE,
            depth_range: DEPTH_RANGE,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Half-extent of the square world bound
    #[inline]
    pub fn world_half_extent(&self) -> f32 {
        self.world_size / 2.0
    }

    /// Half-extent of the region fresh buildings may spawn in
    #[inline]
    pub fn spawn_half_extent(&self) -> f32 {
        (self.world_size - self.spawn_margin) / 2.0
    }

    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera_offset)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let [cam_x, cam_y, cam_z] = self.camera_offset;
        for (name, value) in [
            ("world_size", self.world_size),
            ("kitty_speed", self.kitty_speed),
            ("kitty_rot_speed", self.kitty_rot_speed),
            ("camera_offset", cam_x),
            ("camera_offset", cam_y),
            ("camera_offset", cam_z),
            ("collision_buffer", self.collision_buffer),
            ("push_impulse", self.push_impulse),
            ("fall_speed", self.fall_speed),
            ("tumble_speed", self.tumble_speed),
            ("fall_depth", self.fall_depth),
            ("spawn_margin", self.spawn_margin),
            ("width_range", self.width_range.0),
            ("width_range", self.width_range.1),
            ("height_range", self.height_range.0),
            ("height_range", self.height_range.1),
            ("depth_range", self.depth_range.0),
            ("depth_range", self.depth_range.1),
        ] {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { name, value });
            }
        }
        for (name, value) in [
            ("kitty_speed", self.kitty_speed),
            ("collision_buffer", self.collision_buffer),
            ("push_impulse", self.push_impulse),
        ] {
            if value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }
        if !(self.world_size > 0.0) {
            return Err(TuningError::WorldSize(self.world_size));
        }
        if self.building_count == 0 {
            return Err(TuningError::EmptyPool);
        }
        if !(0.0..1.0).contains(&self.velocity_damping) {
            return Err(TuningError::Damping(self.velocity_damping));
        }
        if !(self.camera_lerp > 0.0 && self.camera_lerp <= 1.0) {
            return Err(TuningError::CameraLerp(self.camera_lerp));
        }
        if !(self.spawn_margin >= 0.0 && self.spawn_margin < self.world_size) {
            return Err(TuningError::SpawnMargin {
                margin: self.spawn_margin,
                world_size: self.world_size,
            });
        }
        for (name, (min, max)) in [
            ("width", self.width_range),
            ("height", self.height_range),
            ("depth", self.depth_range),
        ] {
            if !(min > 0.0 && min <= max) {
                return Err(TuningError::ExtentRange { name, min, max });
            }
        }
        if !(self.fall_speed > 0.0) {
            return Err(TuningError::FallSpeed(self.fall_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().world_half_extent(), 25.0);
        assert_eq!(Tuning::default().spawn_half_extent(), 20.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "building_count": 5, "push_impulse": 1.0 }"#).unwrap();
        assert_eq!(tuning.building_count, 5);
        assert_eq!(tuning.push_impulse, 1.0);
        assert_eq!(tuning.world_size, WORLD_SIZE);
        assert_eq!(tuning.height_range, HEIGHT_RANGE);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "velocity_damping": 1.0 }"#),
            Err(TuningError::Damping(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "building_count": 0 }"#),
            Err(TuningError::EmptyPool)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_margin": 60.0 }"#),
            Err(TuningError::SpawnMargin { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "height_range": [8.0, 2.0] }"#),
            Err(TuningError::ExtentRange { name: "height", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "camera_lerp": 0.0 }"#),
            Err(TuningError::CameraLerp(_))
        ));
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Json(_))));
    }

    #[test]
    fn test_rejects_overflowing_values() {
        // serde_json reads 1e39 as f32 infinity
        assert!(matches!(
            Tuning::from_json(r#"{ "width_range": [1.0, 1e39] }"#),
            Err(TuningError::NonFinite { name: "width_range", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "world_size": 1e39 }"#),
            Err(TuningError::NonFinite { name: "world_size", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "fall_depth": -1e39 }"#),
            Err(TuningError::NonFinite { name: "fall_depth", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_margin": 1e39 }"#),
            Err(TuningError::NonFinite { name: "spawn_margin", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_forces() {
        assert!(matches!(
            Tuning::from_json(r#"{ "collision_buffer": -10.0 }"#),
            Err(TuningError::Negative { name: "collision_buffer", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "kitty_speed": -0.2 }"#),
            Err(TuningError::Negative { name: "kitty_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "push_impulse": -0.5 }"#),
            Err(TuningError::Negative { name: "push_impulse", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "fall_speed": -0.5 }"#),
            Err(TuningError::FallSpeed(_))
        ));
        // Zero buffer is allowed: contact then uses the bare footprint
        assert!(Tuning::from_json(r#"{ "collision_buffer": 0.0 }"#).is_ok());
    }
}
