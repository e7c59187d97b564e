//! Grappling Hook
//!
//! Hook lifecycle, tether constraints, and impact classification.
//!
//! ```text
//!             fire-down            fire-up
//!   Idle ───────────────> Holding ─────────> Thrown
//!                                              │
//!                        impact(anchorable) ───┤─── impact(not anchorable)
//!                                              v               │
//!                         fire-down        Attached            v
//!              Released <──────────────────────────────── Released
//! ```
//!
//! `Released` has no outgoing edge; game-mode logic calls
//! [`HookStateMachine::reset`] to stow the hook again.

pub mod aim;
pub mod classifier;
pub mod constraints;
pub mod entity;
pub mod error;
pub mod machine;
pub mod rope;
pub mod state;

#[cfg(test)]
pub mod test_world;

pub use aim::AimPose;
pub use classifier::{CollisionClassifier, Verdict};
pub use constraints::TetherConstraintManager;
pub use entity::HookEntity;
pub use error::{AttachmentError, HookError};
pub use machine::HookStateMachine;
pub use rope::RopeLine;
pub use state::{HookEvent, HookState, next_state};
