//! Hook error types.
//!
//! None of these reach the player: an invalid transition is dropped, and a
//! failed attachment makes the hook bounce off as if the surface were not
//! hookable.

use std::fmt;

use crate::physics::BodyHandle;

use super::state::{HookEvent, HookState};

/// Why an anchor constraint could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentError {
    /// The struck collider has no simulated body behind it.
    NoTargetBody,
    /// The target body no longer exists in the physics world.
    MissingBody(BodyHandle),
    /// The target body has no collider and cannot carry a hook.
    NonPhysicalTarget(BodyHandle),
    /// The hook already holds an anchor constraint.
    AlreadyAnchored,
    /// The hook tried to anchor to itself or to its own player.
    SelfAnchor(BodyHandle),
}

impl fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentError::NoTargetBody => write!(f, "struck collider has no body"),
            AttachmentError::MissingBody(body) => {
                write!(f, "target body {} no longer exists", body.raw())
            }
            AttachmentError::NonPhysicalTarget(body) => {
                write!(f, "target body {} has no collider", body.raw())
            }
            AttachmentError::AlreadyAnchored => write!(f, "hook is already anchored"),
            AttachmentError::SelfAnchor(body) => {
                write!(f, "hook cannot anchor to body {}", body.raw())
            }
        }
    }
}

impl std::error::Error for AttachmentError {}

/// Errors produced while driving the hook state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookError {
    /// The event has no row in the transition table for this state.
    InvalidTransition { state: HookState, event: HookEvent },
    /// Anchoring failed; the hook falls through to `Released`.
    Attachment(AttachmentError),
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookError::InvalidTransition { state, event } => {
                write!(f, "no transition from {state} on {event}")
            }
            HookError::Attachment(e) => write!(f, "attachment failed: {e}"),
        }
    }
}

impl std::error::Error for HookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HookError::Attachment(e) => Some(e),
            HookError::InvalidTransition { .. } => None,
        }
    }
}

impl From<AttachmentError> for HookError {
    fn from(e: AttachmentError) -> Self {
        HookError::Attachment(e)
    }
}
