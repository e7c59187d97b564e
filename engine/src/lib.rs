//! Grapple Engine Library
//!
//! A grappling-hook tether subsystem on top of a small rigid body world.
//! Gameplay code drives the hook with input edges and collision events; the
//! physics world owns simulation.
//!
//! # Modules
//!
//! - [`physics`] - Bodies, rope/fixed joints, contact events, and the
//!   [`PhysicsWorld`] trait with its in-house [`SandboxWorld`] implementation
//! - [`game`] - Hook state machine, tether constraint manager, collision
//!   classifier, configuration, and the fixed-step [`HookScene`]
//!
//! # Example
//!
//! ```ignore
//! use grapple_tok_engine::game::{HookScene, HookState, SceneConfig};
//!
//! let mut scene = HookScene::new(SceneConfig::default());
//! scene.set_camera(0.0, 0.3);
//!
//! // Charge and throw
//! scene.press_fire();
//! scene.update(1.0 / 60.0);
//! scene.release_fire();
//!
//! // Fly until the hook lands somewhere
//! while scene.hook.state() == HookState::Thrown {
//!     scene.update(1.0 / 60.0);
//! }
//! println!("hook is {}", scene.hook.state());
//! ```

pub mod physics;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the types most callers need
pub use game::{HookScene, HookState, HookStateMachine, SceneConfig, TetherParameters};
pub use physics::{
    BodyHandle, CollisionEvent, CollisionLayers, ConstraintHandle, PhysicsWorld, SandboxWorld,
};
