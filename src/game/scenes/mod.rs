//! Scene Module
//!
//! High-level scene compositions that wire the hook to a physics world.

pub mod hook_scene;

pub use hook_scene::{FIXED_PHYSICS_STEP_S, HookScene, HookTransition, MAX_FIXED_STEPS_PER_FRAME};
