//! Physics module for the grapple engine
//!
//! Custom physics built from scratch, without an external physics library.
//! Gameplay code talks to physics only through the [`PhysicsWorld`] trait;
//! [`SandboxWorld`] is the in-house implementation.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Impulses in N·s (kg·m/s)
//! - Spring stiffness in N/m, damping in N·s/m
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - glam re-exports, body/constraint handles, collision layers
//! - [`body`] - Rigid bodies and colliders
//! - [`joints`] - Rope and fixed joints with their solver
//! - [`collision`] - Sphere/sphere and sphere/box contact tests
//! - [`world`] - The [`PhysicsWorld`] trait and [`CollisionEvent`]
//! - [`sandbox`] - [`SandboxWorld`], a deterministic implementation of the trait

pub mod body;
pub mod collision;
pub mod joints;
pub mod sandbox;
pub mod types;
pub mod world;

// Re-export commonly used types at the physics module level
pub use body::{BodyKind, Collider, RigidBody, Shape};
pub use collision::{Contact, aabb_surface_normal, sphere_aabb_contact, sphere_sphere_contact};
pub use joints::{Joint, JointKind};
pub use sandbox::{SandboxConfig, SandboxWorld};
pub use types::{BodyHandle, CollisionLayers, ConstraintHandle, Vec3};
pub use world::{CollisionEvent, PhysicsWorld};
