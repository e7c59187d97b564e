//! Aim pose supplied by the camera each frame.

use glam::Vec3;

/// Where the hook is held and which way it flies when released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPose {
    /// Shoot origin in world space
    pub position: Vec3,
    /// Unit aim direction (zero if the camera supplied a degenerate vector)
    pub forward: Vec3,
}

impl Default for AimPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

impl AimPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalize_or_zero(),
        }
    }

    /// Pose from an FPS camera's eye position and yaw/pitch (radians).
    ///
    /// Yaw 0 / pitch 0 looks down -Z, matching the FPS camera controller.
    pub fn from_yaw_pitch(eye: Vec3, yaw: f32, pitch: f32) -> Self {
        let forward = Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        );
        Self::new(eye, forward)
    }

    /// Horizontal right vector. Falls back to +X when aiming straight up or down.
    pub fn right(&self) -> Vec3 {
        let right = self.forward.cross(Vec3::Y);
        if right.length_squared() < 1e-8 {
            Vec3::X
        } else {
            right.normalize()
        }
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward).normalize_or_zero()
    }

    /// Move the origin by `offset` given in (right, up, forward) camera axes.
    pub fn with_offset(self, offset: Vec3) -> Self {
        let position = self.position
            + self.right() * offset.x
            + self.up() * offset.y
            + self.forward * offset.z;
        Self { position, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_new_normalizes_forward() {
        let pose = AimPose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(pose.forward, Vec3::Z);
    }

    #[test]
    fn test_yaw_pitch_zero_looks_down_negative_z() {
        let pose = AimPose::from_yaw_pitch(Vec3::ZERO, 0.0, 0.0);
        assert!(approx(pose.forward, Vec3::NEG_Z));
        assert!(approx(pose.right(), Vec3::X));
        assert!(approx(pose.up(), Vec3::Y));
    }

    #[test]
    fn test_offset_in_camera_frame() {
        let eye = Vec3::new(0.0, 1.0, 0.0);
        let pose = AimPose::from_yaw_pitch(eye, 0.0, 0.0).with_offset(Vec3::new(-0.6, 0.7, 0.0));
        assert!(approx(pose.position, Vec3::new(-0.6, 1.7, 0.0)));

        // Turned to face +X, "left" is now -Z
        let turned = AimPose::from_yaw_pitch(eye, std::f32::consts::FRAC_PI_2, 0.0)
            .with_offset(Vec3::new(-0.6, 0.0, 0.0));
        assert!(approx(turned.position, Vec3::new(0.0, 1.0, -0.6)));
    }

    #[test]
    fn test_straight_up_has_stable_right() {
        let pose = AimPose::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(pose.right(), Vec3::X);
    }
}
