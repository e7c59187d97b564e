//! Recording physics world double for hook unit tests.
//!
//! Stores bodies and joints in maps, never simulates, and records every
//! impulse so tests can assert exactly what the hook asked of physics.

use std::collections::{BTreeMap, HashMap};

use crate::physics::{
    BodyHandle, CollisionEvent, CollisionLayers, ConstraintHandle, Joint, PhysicsWorld, Vec3,
};

#[derive(Debug, Clone, Copy)]
pub struct FakeBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub gravity: bool,
    pub pinned: bool,
    pub layers: CollisionLayers,
    pub collider: bool,
}

#[derive(Debug, Default)]
pub struct RecordingWorld {
    pub bodies: HashMap<BodyHandle, FakeBody>,
    pub joints: BTreeMap<ConstraintHandle, Joint>,
    pub impulses: Vec<(BodyHandle, Vec3)>,
    pub joints_created: usize,
    pub joints_removed: usize,
    next_body: u32,
    next_joint: u32,
}

impl RecordingWorld {
    pub fn add_body(&mut self, position: Vec3, layers: CollisionLayers) -> BodyHandle {
        self.insert(FakeBody {
            position,
            velocity: Vec3::ZERO,
            gravity: true,
            pinned: false,
            layers,
            collider: true,
        })
    }

    pub fn add_body_without_collider(&mut self, position: Vec3) -> BodyHandle {
        self.insert(FakeBody {
            position,
            velocity: Vec3::ZERO,
            gravity: true,
            pinned: false,
            layers: CollisionLayers::NONE,
            collider: false,
        })
    }

    fn insert(&mut self, body: FakeBody) -> BodyHandle {
        self.next_body += 1;
        let handle = BodyHandle::from_raw(self.next_body);
        self.bodies.insert(handle, body);
        handle
    }

    /// Remove a body and, like a real engine, every joint bound to it.
    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle);
        self.joints.retain(|_, joint| !joint.involves(handle));
    }

    pub fn move_body(&mut self, handle: BodyHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.position = position;
        }
    }

    pub fn live_joint_count(&self) -> usize {
        self.joints.len()
    }

    /// A contact-enter event as the world would report it to `body`.
    pub fn impact(&self, body: BodyHandle, other: BodyHandle) -> CollisionEvent {
        CollisionEvent {
            body,
            other: Some(other),
            other_layers: self.collision_layers(other),
            point: self.body_position(body).unwrap_or(Vec3::ZERO),
            normal: Vec3::NEG_Z,
        }
    }

    /// Sum of impulses applied to `body`.
    pub fn total_impulse(&self, body: BodyHandle) -> Vec3 {
        self.impulses
            .iter()
            .filter(|(b, _)| *b == body)
            .map(|(_, impulse)| *impulse)
            .sum()
    }
}

impl PhysicsWorld for RecordingWorld {
    fn contains_body(&self, body: BodyHandle) -> bool {
        self.bodies.contains_key(&body)
    }

    fn body_position(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.position)
    }

    fn body_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.velocity)
    }

    fn has_collider(&self, body: BodyHandle) -> bool {
        self.bodies.get(&body).is_some_and(|b| b.collider)
    }

    fn collision_layers(&self, body: BodyHandle) -> CollisionLayers {
        self.bodies
            .get(&body)
            .map(|b| b.layers)
            .unwrap_or(CollisionLayers::NONE)
    }

    fn gravity_enabled(&self, body: BodyHandle) -> bool {
        self.bodies.get(&body).is_some_and(|b| b.gravity)
    }

    fn set_gravity_enabled(&mut self, body: BodyHandle, enabled: bool) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.gravity = enabled;
        }
    }

    fn pin_body(&mut self, body: BodyHandle, position: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.pinned = true;
            b.position = position;
            b.velocity = Vec3::ZERO;
        }
    }

    fn unpin_body(&mut self, body: BodyHandle) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.pinned = false;
        }
    }

    fn is_pinned(&self, body: BodyHandle) -> bool {
        self.bodies.get(&body).is_some_and(|b| b.pinned)
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3) {
        self.impulses.push((body, impulse));
    }

    fn create_joint(&mut self, joint: Joint) -> ConstraintHandle {
        self.next_joint += 1;
        self.joints_created += 1;
        let handle = ConstraintHandle::from_raw(self.next_joint);
        self.joints.insert(handle, joint);
        handle
    }

    fn joint(&self, handle: ConstraintHandle) -> Option<&Joint> {
        self.joints.get(&handle)
    }

    fn joint_mut(&mut self, handle: ConstraintHandle) -> Option<&mut Joint> {
        self.joints.get_mut(&handle)
    }

    fn remove_joint(&mut self, handle: ConstraintHandle) -> Option<Joint> {
        let removed = self.joints.remove(&handle);
        if removed.is_some() {
            self.joints_removed += 1;
        }
        removed
    }
}
