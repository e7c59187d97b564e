//! Game Module
//!
//! Contains game-specific systems that build on top of the engine.

pub mod config;
pub mod hook;
pub mod scenes;

pub use config::{ConfigError, SceneConfig, SurfaceConfig, TetherParameters};
pub use hook::{
    AimPose, CollisionClassifier, HookEntity, HookError, HookState, HookStateMachine, RopeLine,
    TetherConstraintManager, Verdict,
};
pub use scenes::HookScene;
