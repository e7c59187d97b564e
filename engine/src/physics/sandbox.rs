//! Sandbox physics world
//!
//! A small from-scratch rigid body world implementing [`PhysicsWorld`].
//! It is deterministic (bodies and joints are stepped in handle order) and
//! single-threaded.
//!
//! # Step order
//!
//! 1. Gravity into velocity
//! 2. Soft rope spring impulses, once
//! 3. Joint solver passes (`solver_iterations`)
//! 4. Velocity into position
//! 5. Contact detection and resolution
//! 6. Contact-enter events returned to the caller (post-solve)
//!
//! Bodies linked by a joint do not collide with each other.

use std::collections::{BTreeMap, HashSet};

use glam::Vec3;

use super::body::{RigidBody, Shape};
use super::collision::{Contact, sphere_aabb_contact, sphere_sphere_contact};
use super::joints::Joint;
use super::types::{BodyHandle, CollisionLayers, ConstraintHandle};
use super::world::{CollisionEvent, PhysicsWorld};

/// Global parameters for a [`SandboxWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandboxConfig {
    /// Gravity acceleration vector (m/s²)
    pub gravity: Vec3,
    /// Joint solver passes per step
    pub solver_iterations: usize,
    /// Bounciness of contacts (0 = no bounce, 1 = elastic)
    pub restitution: f32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            solver_iterations: 8,
            restitution: 0.0,
        }
    }
}

type ContactPair = (BodyHandle, BodyHandle);

/// In-house rigid body world with rope/fixed joints and contact events.
#[derive(Debug, Default)]
pub struct SandboxWorld {
    config: SandboxConfig,
    bodies: BTreeMap<BodyHandle, RigidBody>,
    joints: BTreeMap<ConstraintHandle, Joint>,
    next_body: u32,
    next_joint: u32,
    active_contacts: HashSet<ContactPair>,
}

impl SandboxWorld {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.next_body += 1;
        let handle = BodyHandle::from_raw(self.next_body);
        self.bodies.insert(handle, body);
        handle
    }

    /// Remove a body together with every joint that references it.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(&handle)?;
        let before = self.joints.len();
        self.joints.retain(|_, joint| !joint.involves(handle));
        let dropped = before - self.joints.len();
        if dropped > 0 {
            log::debug!("removed body {:?} and {} attached joint(s)", handle, dropped);
        }
        self.active_contacts
            .retain(|&(a, b)| a != handle && b != handle);
        Some(body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(&handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(&handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn joints(&self) -> impl Iterator<Item = (ConstraintHandle, &Joint)> {
        self.joints.iter().map(|(&handle, joint)| (handle, joint))
    }

    /// Number of live joints referencing `body`.
    pub fn joints_involving(&self, body: BodyHandle) -> usize {
        self.joints.values().filter(|joint| joint.involves(body)).count()
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Returns the contacts that began during this step, one event per
    /// participating body.
    pub fn step(&mut self, dt: f32) -> Vec<CollisionEvent> {
        if dt <= 0.0 {
            return Vec::new();
        }

        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            body.integrate_velocity(gravity, dt);
        }

        self.joint_pass(dt, Joint::apply_spring);
        for _ in 0..self.config.solver_iterations {
            self.joint_pass(dt, Joint::solve);
        }

        for body in self.bodies.values_mut() {
            body.integrate_position(dt);
        }

        self.resolve_contacts()
    }

    /// Run `solve` once over every joint, in handle order.
    fn joint_pass(&mut self, dt: f32, solve: fn(&Joint, &mut RigidBody, &mut RigidBody, f32)) {
        for joint in self.joints.values() {
            if joint.body_a == joint.body_b {
                continue;
            }
            let (Some(mut a), Some(mut b)) = (
                self.bodies.get(&joint.body_a).copied(),
                self.bodies.get(&joint.body_b).copied(),
            ) else {
                continue;
            };
            solve(joint, &mut a, &mut b, dt);
            self.bodies.insert(joint.body_a, a);
            self.bodies.insert(joint.body_b, b);
        }
    }

    fn resolve_contacts(&mut self) -> Vec<CollisionEvent> {
        let handles: Vec<BodyHandle> = self.bodies.keys().copied().collect();
        let restitution = self.config.restitution;
        let mut touching = HashSet::new();
        let mut events = Vec::new();

        for (i, &ha) in handles.iter().enumerate() {
            for &hb in &handles[i + 1..] {
                let (Some(mut a), Some(mut b)) =
                    (self.bodies.get(&ha).copied(), self.bodies.get(&hb).copied())
                else {
                    continue;
                };
                if !a.is_movable() && !b.is_movable() {
                    continue;
                }
                if self.joints.values().any(|joint| joint.connects(ha, hb)) {
                    continue;
                }
                let Some(contact) = contact_between(&a, &b) else {
                    continue;
                };

                resolve_contact(&mut a, &mut b, &contact, restitution);
                self.bodies.insert(ha, a);
                self.bodies.insert(hb, b);

                let pair = (ha, hb);
                if !self.active_contacts.contains(&pair) {
                    events.push(CollisionEvent {
                        body: ha,
                        other: Some(hb),
                        other_layers: b.layers(),
                        point: contact.point,
                        normal: contact.normal,
                    });
                    events.push(CollisionEvent {
                        body: hb,
                        other: Some(ha),
                        other_layers: a.layers(),
                        point: contact.point,
                        normal: -contact.normal,
                    });
                }
                touching.insert(pair);
            }
        }

        self.active_contacts = touching;
        events
    }
}

/// Narrow phase for a body pair; the normal points from `b` toward `a`.
fn contact_between(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    let (ca, cb) = (a.collider?, b.collider?);
    if !ca.interacts_with(&cb) {
        return None;
    }

    match (ca.shape, cb.shape) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            sphere_sphere_contact(a.position, ra, b.position, rb)
        }
        (Shape::Sphere { radius }, Shape::Box { half_extents }) => sphere_aabb_contact(
            a.position,
            radius,
            b.position - half_extents,
            b.position + half_extents,
        ),
        (Shape::Box { half_extents }, Shape::Sphere { radius }) => sphere_aabb_contact(
            b.position,
            radius,
            a.position - half_extents,
            a.position + half_extents,
        )
        .map(|contact| Contact {
            normal: -contact.normal,
            ..contact
        }),
        (Shape::Box { .. }, Shape::Box { .. }) => None,
    }
}

/// Push the bodies apart and remove their approaching velocity.
fn resolve_contact(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact, restitution: f32) {
    let (inv_a, inv_b) = (a.inverse_mass(), b.inverse_mass());
    let w = inv_a + inv_b;
    if w <= 0.0 {
        return;
    }

    let correction = contact.normal * (contact.depth / w);
    a.position += correction * inv_a;
    b.position -= correction * inv_b;

    let approach = (a.velocity - b.velocity).dot(contact.normal);
    if approach < 0.0 {
        let impulse = -(1.0 + restitution) * approach / w;
        a.velocity += contact.normal * impulse * inv_a;
        b.velocity -= contact.normal * impulse * inv_b;
    }
}

impl PhysicsWorld for SandboxWorld {
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
        self.bodies
            .get(&body)
            .is_some_and(|b| b.collider.is_some())
    }

    fn collision_layers(&self, body: BodyHandle) -> CollisionLayers {
        self.bodies
            .get(&body)
            .map(RigidBody::layers)
            .unwrap_or(CollisionLayers::NONE)
    }

    fn gravity_enabled(&self, body: BodyHandle) -> bool {
        self.bodies.get(&body).is_some_and(|b| b.gravity_enabled)
    }

    fn set_gravity_enabled(&mut self, body: BodyHandle, enabled: bool) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.gravity_enabled = enabled;
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
        if let Some(b) = self.bodies.get_mut(&body) {
            b.apply_impulse(impulse);
        }
    }

    fn create_joint(&mut self, joint: Joint) -> ConstraintHandle {
        self.next_joint += 1;
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
        self.joints.remove(&handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 120.0;

    fn world_with_floor() -> (SandboxWorld, BodyHandle) {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let floor = world.add_body(RigidBody::static_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(20.0, 0.5, 20.0),
            CollisionLayers::WORLD,
        ));
        (world, floor)
    }

    fn ball(position: Vec3) -> RigidBody {
        RigidBody::dynamic_sphere(position, 0.25, 1.0, CollisionLayers::HOOK)
    }

    #[test]
    fn test_ball_lands_on_floor_with_single_enter_event() {
        let (mut world, floor) = world_with_floor();
        let ball = world.add_body(ball(Vec3::new(0.0, 1.0, 0.0)));

        let mut events = Vec::new();
        for _ in 0..240 {
            events.extend(world.step(DT));
        }

        let ball_events: Vec<_> = events.iter().filter(|e| e.body == ball).collect();
        assert_eq!(ball_events.len(), 1, "resting contact must not re-trigger");
        assert_eq!(ball_events[0].other, Some(floor));
        assert_eq!(ball_events[0].other_layers, CollisionLayers::WORLD);
        assert_eq!(ball_events[0].normal, Vec3::Y);

        let y = world.body_position(ball).unwrap().y;
        assert!((y - 0.25).abs() < 0.05, "ball should rest on the floor, y = {}", y);
    }

    #[test]
    fn test_contact_events_reported_to_both_bodies() {
        let (mut world, floor) = world_with_floor();
        let ball = world.add_body(ball(Vec3::new(0.0, 0.2, 0.0)));
        let events = world.step(DT);
        assert!(events.iter().any(|e| e.body == ball && e.other == Some(floor)));
        assert!(events.iter().any(|e| e.body == floor && e.other == Some(ball)));
    }

    #[test]
    fn test_gravity_disabled_body_floats() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let ball = world.add_body(ball(Vec3::new(0.0, 5.0, 0.0)));
        world.set_gravity_enabled(ball, false);
        for _ in 0..60 {
            world.step(DT);
        }
        assert_eq!(world.body_position(ball), Some(Vec3::new(0.0, 5.0, 0.0)));
    }

    #[test]
    fn test_pinned_body_stays_put_and_unpins() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let ball = world.add_body(ball(Vec3::ZERO));
        world.pin_body(ball, Vec3::new(1.0, 2.0, 3.0));
        world.apply_impulse(ball, Vec3::X * 50.0);
        world.step(DT);
        assert_eq!(world.body_position(ball), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(world.is_pinned(ball));

        world.unpin_body(ball);
        world.step(DT);
        assert!(world.body_position(ball).unwrap().y < 2.0);
    }

    #[test]
    fn test_rope_joint_limits_distance() {
        let mut world = SandboxWorld::new(SandboxConfig {
            gravity: Vec3::ZERO,
            ..Default::default()
        });
        let anchor = world.add_body(RigidBody::static_box(
            Vec3::ZERO,
            Vec3::splat(0.1),
            CollisionLayers::WORLD,
        ));
        let ball = world.add_body(ball(Vec3::new(1.0, 0.0, 0.0)));
        world.create_joint(Joint::rope(anchor, Vec3::ZERO, ball, 3.0, 0.0, 0.0));
        world.apply_impulse(ball, Vec3::X * 20.0);

        for _ in 0..240 {
            world.step(DT);
        }
        let dist = world.body_position(ball).unwrap().length();
        assert!(dist < 3.1, "rope should hold the ball near 3 m, got {}", dist);
    }

    #[test]
    fn test_spring_rope_pulls_with_configured_stiffness() {
        let mut world = SandboxWorld::new(SandboxConfig {
            gravity: Vec3::ZERO,
            ..Default::default()
        });
        let anchor = world.add_body(RigidBody::static_box(
            Vec3::ZERO,
            Vec3::splat(0.1),
            CollisionLayers::WORLD,
        ));
        let ball = world.add_body(ball(Vec3::new(5.1, 0.0, 0.0)));
        world.create_joint(Joint::rope(anchor, Vec3::ZERO, ball, 5.0, 100.0, 0.0));

        world.step(DT);

        // One step of 100 N/m * 0.1 m on 1 kg, however many solver passes run
        let v = world.body_velocity(ball).unwrap();
        let expected = -100.0 * 0.1 * DT;
        assert!((v.x - expected).abs() < 1e-5, "dv = {}, expected {}", v.x, expected);
    }

    #[test]
    fn test_jointed_bodies_do_not_collide() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let a = world.add_body(ball(Vec3::ZERO));
        let b = world.add_body(ball(Vec3::new(0.1, 0.0, 0.0)));
        world.create_joint(Joint::fixed(a, b, Vec3::new(0.1, 0.0, 0.0)));
        let events = world.step(DT);
        assert!(events.is_empty());
    }

    #[test]
    fn test_remove_body_drops_its_joints() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let a = world.add_body(ball(Vec3::ZERO));
        let b = world.add_body(ball(Vec3::new(2.0, 0.0, 0.0)));
        let joint = world.create_joint(Joint::fixed(a, b, Vec3::new(2.0, 0.0, 0.0)));

        assert!(world.remove_body(b).is_some());
        assert!(!world.contains_joint(joint));
        assert_eq!(world.joint_count(), 0);
        assert!(world.remove_body(b).is_none());
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let a = world.add_body(ball(Vec3::ZERO));
        let b = world.add_body(ball(Vec3::X * 3.0));
        let first = world.create_joint(Joint::fixed(a, b, Vec3::X * 3.0));
        world.remove_joint(first);
        let second = world.create_joint(Joint::fixed(a, b, Vec3::X * 3.0));
        assert_ne!(first, second);
        assert!(world.remove_joint(first).is_none());
    }

    #[test]
    fn test_masked_colliders_pass_through() {
        let mut world = SandboxWorld::new(SandboxConfig {
            gravity: Vec3::ZERO,
            ..Default::default()
        });
        let hook = world.add_body(
            ball(Vec3::ZERO).with_mask(CollisionLayers::ALL.without(CollisionLayers::PLAYER)),
        );
        let player = world.add_body(RigidBody::dynamic_sphere(
            Vec3::new(0.2, 0.0, 0.0),
            0.4,
            80.0,
            CollisionLayers::PLAYER,
        ));
        let events = world.step(DT);
        assert!(events.is_empty());
        assert_eq!(world.body_position(hook), Some(Vec3::ZERO));
        assert_eq!(world.body_position(player), Some(Vec3::new(0.2, 0.0, 0.0)));
    }
}
