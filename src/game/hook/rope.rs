//! Rope line endpoints for the rendering collaborator.

use glam::Vec3;

/// Two world-space points to draw the rope between.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RopeLine {
    /// False while the hook is stowed or held; nothing should be drawn.
    pub enabled: bool,
    /// Shoot origin end
    pub start: Vec3,
    /// Hook head end
    pub end: Vec3,
}

impl RopeLine {
    pub fn set(&mut self, start: Vec3, end: Vec3) {
        self.enabled = true;
        self.start = start;
        self.end = end;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Drawn length, or zero when disabled.
    pub fn length(&self) -> f32 {
        if self.enabled {
            self.start.distance(self.end)
        } else {
            0.0
        }
    }

    /// Endpoints if the rope should be drawn.
    pub fn endpoints(&self) -> Option<(Vec3, Vec3)> {
        self.enabled.then_some((self.start, self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_rope_has_no_endpoints() {
        let rope = RopeLine::default();
        assert_eq!(rope.endpoints(), None);
        assert_eq!(rope.length(), 0.0);
    }

    #[test]
    fn test_set_and_disable() {
        let mut rope = RopeLine::default();
        rope.set(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(rope.endpoints(), Some((Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0))));
        assert_eq!(rope.length(), 3.0);

        rope.disable();
        assert_eq!(rope.endpoints(), None);
    }
}
