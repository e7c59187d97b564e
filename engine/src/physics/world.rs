//! Physics world boundary
//!
//! [`PhysicsWorld`] is everything gameplay code needs from a physics engine:
//! body queries, gravity and pinning toggles, impulses, and joint
//! create / mutate / remove. [`SandboxWorld`](super::sandbox::SandboxWorld)
//! implements it from scratch; an adapter over another engine only has to
//! implement the same trait.

use glam::Vec3;

use super::joints::Joint;
use super::types::{BodyHandle, CollisionLayers, ConstraintHandle};

/// A contact that started during the last physics step.
///
/// Raised once per body per new contact (enter semantics): a body resting
/// against a wall does not raise a new event every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The body this event is reported to
    pub body: BodyHandle,
    /// The body that was struck, if it is a simulated body
    pub other: Option<BodyHandle>,
    /// Collision categories of the struck collider
    pub other_layers: CollisionLayers,
    /// World-space contact point
    pub point: Vec3,
    /// Contact normal pointing toward `body`
    pub normal: Vec3,
}

/// The operations the hook subsystem performs on a physics engine.
///
/// Operations on unknown handles are no-ops (setters) or return
/// `None` / `false` (queries); bodies and joints can disappear under scene
/// teardown at any time.
pub trait PhysicsWorld {
    fn contains_body(&self, body: BodyHandle) -> bool;

    fn body_position(&self, body: BodyHandle) -> Option<Vec3>;

    fn body_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    /// True if the body exists and has a collider.
    fn has_collider(&self, body: BodyHandle) -> bool;

    fn collision_layers(&self, body: BodyHandle) -> CollisionLayers;

    fn gravity_enabled(&self, body: BodyHandle) -> bool;

    fn set_gravity_enabled(&mut self, body: BodyHandle, enabled: bool);

    /// Hold the body kinematically at `position` with zero velocity.
    fn pin_body(&mut self, body: BodyHandle, position: Vec3);

    /// Return a pinned body to normal dynamic simulation.
    fn unpin_body(&mut self, body: BodyHandle);

    fn is_pinned(&self, body: BodyHandle) -> bool;

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3);

    fn create_joint(&mut self, joint: Joint) -> ConstraintHandle;

    fn joint(&self, handle: ConstraintHandle) -> Option<&Joint>;

    fn joint_mut(&mut self, handle: ConstraintHandle) -> Option<&mut Joint>;

    /// Remove a joint, returning it if it was still alive.
    fn remove_joint(&mut self, handle: ConstraintHandle) -> Option<Joint>;

    fn contains_joint(&self, handle: ConstraintHandle) -> bool {
        self.joint(handle).is_some()
    }
}
