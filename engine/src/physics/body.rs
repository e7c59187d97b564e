//! Rigid bodies for the sandbox physics world
//!
//! Bodies are point masses with an optional collider. They do not rotate:
//! the hook only needs translational limits, and rope joints leave rotation
//! free anyway.
//!
//! Integration is semi-implicit Euler, split in two halves so joints can be
//! solved between the velocity and the position update:
//! - velocity += gravity * dt
//! - (joint solve)
//! - position += velocity * dt

use glam::Vec3;

use super::types::CollisionLayers;

/// Whether a body is moved by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Moved by gravity, impulses and joints.
    Dynamic,
    /// Never moves; infinite mass.
    Static,
}

/// Collision geometry, centered on the body position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

/// A collider attached to a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    /// Categories this collider belongs to.
    pub layers: CollisionLayers,
    /// Categories this collider collides with.
    pub mask: CollisionLayers,
}

impl Collider {
    pub fn sphere(radius: f32, layers: CollisionLayers) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            layers,
            mask: CollisionLayers::ALL,
        }
    }

    pub fn cuboid(half_extents: Vec3, layers: CollisionLayers) -> Self {
        Self {
            shape: Shape::Box { half_extents },
            layers,
            mask: CollisionLayers::ALL,
        }
    }

    /// Two colliders interact only if each one's mask accepts the other's layers.
    pub fn interacts_with(&self, other: &Collider) -> bool {
        self.mask.intersects(other.layers) && other.mask.intersects(self.layers)
    }
}

/// A rigid body simulated by [`SandboxWorld`](super::sandbox::SandboxWorld).
#[derive(Debug, Clone, Copy)]
pub struct RigidBody {
    /// Current position in world space (meters)
    pub position: Vec3,
    /// Current velocity (meters/second)
    pub velocity: Vec3,
    /// Mass (kilograms). Ignored for static bodies.
    pub mass: f32,
    pub kind: BodyKind,
    /// Whether world gravity accelerates this body.
    pub gravity_enabled: bool,
    /// Kinematically pinned bodies keep their position until moved by hand.
    pub pinned: bool,
    pub collider: Option<Collider>,
}

impl RigidBody {
    /// A dynamic sphere with gravity enabled.
    pub fn dynamic_sphere(position: Vec3, radius: f32, mass: f32, layers: CollisionLayers) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass: mass.max(0.001), // Prevent division by zero
            kind: BodyKind::Dynamic,
            gravity_enabled: true,
            pinned: false,
            collider: Some(Collider::sphere(radius, layers)),
        }
    }

    /// An immovable box, typically level geometry.
    pub fn static_box(center: Vec3, half_extents: Vec3, layers: CollisionLayers) -> Self {
        Self {
            position: center,
            velocity: Vec3::ZERO,
            mass: 0.0,
            kind: BodyKind::Static,
            gravity_enabled: false,
            pinned: false,
            collider: Some(Collider::cuboid(half_extents, layers)),
        }
    }

    /// Replace the collider's collision mask.
    pub fn with_mask(mut self, mask: CollisionLayers) -> Self {
        if let Some(collider) = self.collider.as_mut() {
            collider.mask = mask;
        }
        self
    }

    /// Remove the collider, leaving a purely inertial body.
    pub fn without_collider(mut self) -> Self {
        self.collider = None;
        self
    }

    /// Inverse mass; zero for static and pinned bodies.
    pub fn inverse_mass(&self) -> f32 {
        if self.kind == BodyKind::Static || self.pinned {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// True if the solver may move this body.
    pub fn is_movable(&self) -> bool {
        self.inverse_mass() > 0.0
    }

    /// Instant change in momentum. No effect on static or pinned bodies.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass();
    }

    /// First half of the step: accumulate gravity into velocity.
    pub fn integrate_velocity(&mut self, gravity: Vec3, dt: f32) {
        if !self.is_movable() {
            return;
        }
        if self.gravity_enabled {
            self.velocity += gravity * dt;
        }
    }

    /// Second half of the step: advance position with the solved velocity.
    pub fn integrate_position(&mut self, dt: f32) {
        if !self.is_movable() {
            return;
        }
        self.position += self.velocity * dt;
    }

    /// Collision categories, or `NONE` without a collider.
    pub fn layers(&self) -> CollisionLayers {
        self.collider
            .map(|collider| collider.layers)
            .unwrap_or(CollisionLayers::NONE)
    }
}
