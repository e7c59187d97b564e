//! The physical hook: its body, lifecycle state and constraint slots.

use glam::Vec3;

use crate::physics::{BodyHandle, ConstraintHandle, PhysicsWorld};

use super::state::HookState;

/// One hook per player, created `Idle` at scene setup and kept for the
/// player's lifetime. The player body is referenced, never owned.
///
/// Only [`HookStateMachine`](super::HookStateMachine) mutates the state and
/// constraint slots.
#[derive(Debug, Clone, PartialEq)]
pub struct HookEntity {
    pub(super) body: BodyHandle,
    pub(super) player_body: BodyHandle,
    pub(super) position: Vec3,
    pub(super) state: HookState,
    pub(super) tether_constraint: Option<ConstraintHandle>,
    pub(super) anchor_constraint: Option<ConstraintHandle>,
    pub(super) anchor_target: Option<BodyHandle>,
}

impl HookEntity {
    pub fn new(body: BodyHandle, player_body: BodyHandle, position: Vec3) -> Self {
        Self {
            body,
            player_body,
            position,
            state: HookState::Idle,
            tether_constraint: None,
            anchor_constraint: None,
            anchor_target: None,
        }
    }

    /// The hook head's rigid body.
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// The player body the rope is tied to.
    pub fn player_body(&self) -> BodyHandle {
        self.player_body
    }

    /// Hook head position as of the last refresh.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn state(&self) -> HookState {
        self.state
    }

    /// The player⇄hook rope, present in Thrown/Attached/Released.
    pub fn tether_constraint(&self) -> Option<ConstraintHandle> {
        self.tether_constraint
    }

    /// The hook⇄target rigid link, present only in Attached.
    pub fn anchor_constraint(&self) -> Option<ConstraintHandle> {
        self.anchor_constraint
    }

    /// The body the hook is anchored to.
    pub fn anchor_target(&self) -> Option<BodyHandle> {
        self.anchor_target
    }

    /// Slot occupancy matches the state: tether iff Thrown/Attached/Released,
    /// anchor iff Attached.
    pub fn slots_match_state(&self) -> bool {
        self.tether_constraint.is_some() == self.state.has_tether()
            && self.anchor_constraint.is_some() == self.state.has_anchor()
            && self.anchor_target.is_some() == self.state.has_anchor()
    }

    /// [`slots_match_state`](Self::slots_match_state), and every held handle
    /// is alive in `world`.
    pub fn invariants_hold<W: PhysicsWorld + ?Sized>(&self, world: &W) -> bool {
        self.slots_match_state()
            && self
                .tether_constraint
                .is_none_or(|handle| world.contains_joint(handle))
            && self
                .anchor_constraint
                .is_none_or(|handle| world.contains_joint(handle))
    }
}
