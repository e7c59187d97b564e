//! Joints (constraints) between two rigid bodies
//!
//! Two joint kinds cover the grappling hook:
//!
//! - [`JointKind::Rope`] limits the distance between the bodies to
//!   `[0, max_length]` on all translational axes and leaves rotation free.
//!   Slack rope applies no force. Past the limit it either acts as a hard
//!   stop (`stiffness == 0`) or as a spring-damper soft stop:
//!   `F = stiffness * overextension + damper * separating_speed`
//!   along the rope axis, in N/m and N·s/m.
//! - [`JointKind::Fixed`] locks the relative translation of the two bodies to
//!   the offset they had when the joint was created.
//!
//! Hard ropes and fixed joints are solved at the velocity level with a
//! Baumgarte position bias, one pass per solver iteration. A soft rope's
//! spring is a force, so its impulse is applied once per step through
//! [`Joint::apply_spring`].

use glam::Vec3;

use super::body::RigidBody;
use super::types::BodyHandle;

/// Fraction of the positional error corrected per step.
const BAUMGARTE: f32 = 0.2;

/// Joint-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointKind {
    Rope {
        /// Distance limit in meters
        max_length: f32,
        /// Soft-limit spring stiffness (N/m); 0 = inelastic
        stiffness: f32,
        /// Soft-limit damper (N·s/m)
        damper: f32,
    },
    Fixed {
        /// `body_b.position - (body_a.position + local_anchor_a)` to hold
        offset: Vec3,
    },
}

/// A constraint between `body_a` and `body_b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Attachment point on `body_a`, relative to its position
    pub local_anchor_a: Vec3,
    pub kind: JointKind,
}

impl Joint {
    /// Rope-like distance limit from `body_a` (at `local_anchor_a`) to `body_b`.
    pub fn rope(
        body_a: BodyHandle,
        local_anchor_a: Vec3,
        body_b: BodyHandle,
        max_length: f32,
        stiffness: f32,
        damper: f32,
    ) -> Self {
        Self {
            body_a,
            body_b,
            local_anchor_a,
            kind: JointKind::Rope {
                max_length: max_length.max(0.0),
                stiffness: stiffness.max(0.0),
                damper: damper.max(0.0),
            },
        }
    }

    /// Rigid link holding `body_b` at `offset` from `body_a`.
    pub fn fixed(body_a: BodyHandle, body_b: BodyHandle, offset: Vec3) -> Self {
        Self {
            body_a,
            body_b,
            local_anchor_a: Vec3::ZERO,
            kind: JointKind::Fixed { offset },
        }
    }

    /// True if this joint references `body`.
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// True if this joint links `a` and `b`, in either order.
    pub fn connects(&self, a: BodyHandle, b: BodyHandle) -> bool {
        (self.body_a == a && self.body_b == b) || (self.body_a == b && self.body_b == a)
    }

    /// The rope limit, if this is a rope joint.
    pub fn rope_length(&self) -> Option<f32> {
        match self.kind {
            JointKind::Rope { max_length, .. } => Some(max_length),
            JointKind::Fixed { .. } => None,
        }
    }

    /// Change the rope limit in place. Returns false for non-rope joints.
    pub fn set_rope_length(&mut self, length: f32) -> bool {
        match &mut self.kind {
            JointKind::Rope { max_length, .. } => {
                *max_length = length.max(0.0);
                true
            }
            JointKind::Fixed { .. } => false,
        }
    }

    /// Run one velocity-level solver pass over the two bodies.
    ///
    /// Soft ropes are left alone here.
    pub fn solve(&self, a: &mut RigidBody, b: &mut RigidBody, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        match self.kind {
            JointKind::Rope {
                max_length,
                stiffness,
                ..
            } if stiffness <= 0.0 => solve_hard_rope(a, self.local_anchor_a, b, max_length, dt),
            JointKind::Rope { .. } => {}
            JointKind::Fixed { offset } => solve_fixed(a, self.local_anchor_a, b, offset, dt),
        }
    }

    /// Apply a soft rope's spring-damper impulse for a whole step of `dt`.
    ///
    /// Call once per step, before the solver passes. No-op for hard ropes
    /// and fixed joints.
    pub fn apply_spring(&self, a: &mut RigidBody, b: &mut RigidBody, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        match self.kind {
            JointKind::Rope {
                max_length,
                stiffness,
                damper,
            } if stiffness > 0.0 => {
                spring_rope(a, self.local_anchor_a, b, max_length, stiffness, damper, dt)
            }
            JointKind::Rope { .. } | JointKind::Fixed { .. } => {}
        }
    }
}

/// A rope past its limit: unit axis from `a` to `b`, overextension, and the
/// separating speed along the axis.
struct Stretch {
    axis: Vec3,
    overextension: f32,
    separating_speed: f32,
}

fn rope_stretch(
    a: &RigidBody,
    anchor_a: Vec3,
    b: &RigidBody,
    max_length: f32,
) -> Option<Stretch> {
    let delta = b.position - (a.position + anchor_a);
    let dist = delta.length();
    if dist <= max_length || dist < 1e-6 {
        return None; // Slack
    }
    let axis = delta / dist;
    Some(Stretch {
        axis,
        overextension: dist - max_length,
        separating_speed: (b.velocity - a.velocity).dot(axis),
    })
}

/// Pull the two bodies together along `axis`. Ropes pull, never push.
fn pull(a: &mut RigidBody, b: &mut RigidBody, axis: Vec3, impulse: f32) {
    if impulse <= 0.0 {
        return;
    }
    a.velocity += axis * impulse * a.inverse_mass();
    b.velocity -= axis * impulse * b.inverse_mass();
}

fn solve_hard_rope(
    a: &mut RigidBody,
    anchor_a: Vec3,
    b: &mut RigidBody,
    max_length: f32,
    dt: f32,
) {
    let w = a.inverse_mass() + b.inverse_mass();
    if w <= 0.0 {
        return;
    }
    let Some(stretch) = rope_stretch(a, anchor_a, b, max_length) else {
        return;
    };

    let impulse = (stretch.separating_speed + BAUMGARTE * stretch.overextension / dt) / w;
    pull(a, b, stretch.axis, impulse);
}

fn spring_rope(
    a: &mut RigidBody,
    anchor_a: Vec3,
    b: &mut RigidBody,
    max_length: f32,
    stiffness: f32,
    damper: f32,
    dt: f32,
) {
    let w = a.inverse_mass() + b.inverse_mass();
    if w <= 0.0 {
        return;
    }
    let Some(stretch) = rope_stretch(a, anchor_a, b, max_length) else {
        return;
    };

    let force = stiffness * stretch.overextension + damper * stretch.separating_speed;
    // Never more than what a hard stop would apply
    let limit =
        stretch.separating_speed.max(0.0) / w + BAUMGARTE * stretch.overextension / (dt * w);
    pull(a, b, stretch.axis, (force * dt).min(limit));
}

fn solve_fixed(a: &mut RigidBody, anchor_a: Vec3, b: &mut RigidBody, offset: Vec3, dt: f32) {
    let w = a.inverse_mass() + b.inverse_mass();
    if w <= 0.0 {
        return;
    }

    let error = b.position - (a.position + anchor_a + offset);
    let relative_velocity = b.velocity - a.velocity;
    let impulse = (relative_velocity + error * (BAUMGARTE / dt)) / w;

    a.velocity += impulse * a.inverse_mass();
    b.velocity -= impulse * b.inverse_mass();
}
