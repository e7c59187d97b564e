//! Hook lifecycle states and the events that drive them.

use std::fmt;

use super::classifier::Verdict;

/// Lifecycle of the grappling hook. Starts `Idle` and cycles; there is no
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HookState {
    /// Stowed; no rope, nothing rendered.
    #[default]
    Idle,
    /// Fire held: hook pinned to the shoot origin, following the aim.
    Holding,
    /// In flight on the rope.
    Thrown,
    /// Anchored to a struck body.
    Attached,
    /// Bounced off or let go; rope still tied to the player.
    Released,
}

impl HookState {
    /// States in which the player⇄hook rope constraint exists.
    pub fn has_tether(self) -> bool {
        matches!(self, HookState::Thrown | HookState::Attached | HookState::Released)
    }

    /// States in which the hook⇄target anchor constraint exists.
    pub fn has_anchor(self) -> bool {
        self == HookState::Attached
    }

    /// States in which the rope line is drawn.
    pub fn shows_rope(self) -> bool {
        self.has_tether()
    }
}

impl fmt::Display for HookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookState::Idle => "Idle",
            HookState::Holding => "Holding",
            HookState::Thrown => "Thrown",
            HookState::Attached => "Attached",
            HookState::Released => "Released",
        };
        f.write_str(name)
    }
}

/// Inputs to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Fire button pressed (edge).
    FireDown,
    /// Fire button released (edge).
    FireUp,
    /// The hook struck something; carries the classifier verdict.
    Impact(Verdict),
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookEvent::FireDown => f.write_str("fire-down"),
            HookEvent::FireUp => f.write_str("fire-up"),
            HookEvent::Impact(verdict) => write!(f, "impact({verdict:?})"),
        }
    }
}

/// Target state for `event` in `state`, or `None` when the table has no row.
///
/// `Impact(Ignore)` never has a row: ignored contacts do not move the machine.
pub fn next_state(state: HookState, event: HookEvent) -> Option<HookState> {
    match (state, event) {
        (HookState::Idle, HookEvent::FireDown) => Some(HookState::Holding),
        (HookState::Holding, HookEvent::FireUp) => Some(HookState::Thrown),
        (HookState::Thrown, HookEvent::Impact(Verdict::Anchorable)) => Some(HookState::Attached),
        (HookState::Thrown, HookEvent::Impact(Verdict::NotAnchorable)) => {
            Some(HookState::Released)
        }
        (HookState::Attached, HookEvent::FireDown) => Some(HookState::Released),
        _ => None,
    }
}
