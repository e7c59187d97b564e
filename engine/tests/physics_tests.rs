//! Physics Tests - Rope Swing, Reeling, and Anchors Over Many Steps
//!
//! Long-running checks of the sandbox world through the [`PhysicsWorld`]
//! trait, the same surface the hook uses.

use glam::Vec3;
use grapple_tok_engine::physics::{
    BodyHandle, CollisionLayers, ConstraintHandle, Joint, PhysicsWorld, RigidBody,
    SandboxConfig, SandboxWorld,
};

const DT: f32 = 1.0 / 120.0;

/// An 80 kg bob on a hard rope from a static pivot, starting at `start`
/// relative to the pivot with the rope just taut.
fn swing_rig(start: Vec3) -> (SandboxWorld, BodyHandle, Vec3, ConstraintHandle) {
    let rope_length = start.length();
    let mut world = SandboxWorld::new(SandboxConfig::default());
    let pivot = Vec3::new(0.0, 10.0, 0.0);
    let anchor = world.add_body(RigidBody::static_box(
        pivot,
        Vec3::splat(0.1),
        CollisionLayers::WORLD | CollisionLayers::HOOKABLE,
    ));
    let bob = world.add_body(RigidBody::dynamic_sphere(
        pivot + start,
        0.3,
        80.0,
        CollisionLayers::PLAYER,
    ));
    let rope = world.create_joint(Joint::rope(anchor, Vec3::ZERO, bob, rope_length, 0.0, 0.0));
    (world, bob, pivot, rope)
}

// ============================================================================
// Rope swing
// ============================================================================

#[test]
fn test_pendulum_swing_stays_on_rope() {
    let (mut world, bob, pivot, _) = swing_rig(Vec3::X * 4.0);

    let mut lowest = f32::MAX;
    for _ in 0..360 {
        world.step(DT);
        let p = world.body_position(bob).unwrap();
        assert!(p.distance(pivot) < 4.0 + 0.05, "bob at {}", p.distance(pivot));
        lowest = lowest.min(p.y);
    }

    // Swung through the bottom of the arc
    assert!(lowest < pivot.y - 3.8, "lowest point {lowest}");
}

#[test]
fn test_slack_rope_lets_body_fall_freely() {
    let (mut world, bob, _, rope) = swing_rig(Vec3::X * 4.0);
    world.joint_mut(rope).unwrap().set_rope_length(20.0);

    for _ in 0..60 {
        world.step(DT);
    }
    // Half a second of free fall, no sideways pull
    let p = world.body_position(bob).unwrap();
    assert!((p.x - 4.0).abs() < 1e-4);
    assert!(p.y < 10.0 - 1.0);
}

#[test]
fn test_spring_rope_stretches_more_than_hard_rope() {
    let stretch = |stiffness: f32| {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let anchor = world.add_body(RigidBody::static_box(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::splat(0.1),
            CollisionLayers::WORLD,
        ));
        let bob = world.add_body(RigidBody::dynamic_sphere(
            Vec3::new(0.0, 8.0, 0.0),
            0.3,
            10.0,
            CollisionLayers::PLAYER,
        ));
        world.create_joint(Joint::rope(anchor, Vec3::ZERO, bob, 2.0, stiffness, 5.0));
        world.apply_impulse(bob, Vec3::NEG_Y * 50.0);

        let mut max_len: f32 = 0.0;
        for _ in 0..120 {
            world.step(DT);
            let y = world.body_position(bob).unwrap().y;
            max_len = max_len.max(10.0 - y);
        }
        max_len
    };

    let hard = stretch(0.0);
    let soft = stretch(400.0);
    assert!(hard < 2.1, "hard rope stretched to {hard}");
    assert!(soft > hard, "spring {soft} vs hard {hard}");
}

// ============================================================================
// Reeling
// ============================================================================

#[test]
fn test_shortened_rope_pulls_body_in() {
    let (mut world, bob, pivot, rope) = swing_rig(Vec3::NEG_Y * 6.0);

    // Wind in at 4 m/s, then let it settle
    let mut length = 6.0;
    for _ in 0..240 {
        length = f32::max(length - 4.0 * DT, 2.0);
        assert!(world.joint_mut(rope).unwrap().set_rope_length(length));
        world.step(DT);
    }

    let dist = world.body_position(bob).unwrap().distance(pivot);
    assert!(dist < 2.0 + 0.05, "bob still {dist} m out");
}

// ============================================================================
// Anchors
// ============================================================================

#[test]
fn test_fixed_joint_carries_hook_with_moving_target() {
    let mut world = SandboxWorld::new(SandboxConfig::default());
    let target = world.add_body(RigidBody::dynamic_sphere(
        Vec3::ZERO,
        0.5,
        50.0,
        CollisionLayers::HOOKABLE,
    ));
    world.set_gravity_enabled(target, false);
    world.apply_impulse(target, Vec3::X * 50.0);

    let offset = Vec3::new(0.0, 0.0, 0.65);
    let hook = world.add_body(RigidBody::dynamic_sphere(
        offset,
        0.15,
        1.0,
        CollisionLayers::HOOK,
    ));
    world.create_joint(Joint::fixed(target, hook, offset));

    for _ in 0..120 {
        world.step(DT);
    }

    let t = world.body_position(target).unwrap();
    let h = world.body_position(hook).unwrap();
    assert!(t.x > 0.5, "target should have moved, at {t:?}");
    assert!((h - t - offset).length() < 0.05, "hook drifted to {:?}", h - t);
}

#[test]
fn test_hook_hits_wall_once_then_rests() {
    let mut world = SandboxWorld::new(SandboxConfig::default());
    let wall = world.add_body(RigidBody::static_box(
        Vec3::new(0.0, 2.0, -5.0),
        Vec3::new(2.0, 2.0, 0.5),
        CollisionLayers::WORLD | CollisionLayers::HOOKABLE,
    ));
    let hook = world.add_body(RigidBody::dynamic_sphere(
        Vec3::new(0.0, 2.0, 0.0),
        0.15,
        1.0,
        CollisionLayers::HOOK,
    ));
    world.set_gravity_enabled(hook, false);
    world.apply_impulse(hook, Vec3::NEG_Z * 10.0);

    let mut hits = Vec::new();
    for _ in 0..120 {
        hits.extend(world.step(DT).into_iter().filter(|e| e.body == hook));
    }

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].other, Some(wall));
    assert!(hits[0].other_layers.contains(CollisionLayers::HOOKABLE));
    assert_eq!(hits[0].normal, Vec3::Z);
    let z = world.body_position(hook).unwrap().z;
    assert!((z + 4.35).abs() < 0.01, "hook at z = {z}");
}
