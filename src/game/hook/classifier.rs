//! Impact classification: anchor, bounce, or ignore.

use crate::physics::{CollisionEvent, CollisionLayers};

use super::entity::HookEntity;

/// Outcome of classifying one collision event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Hookable surface and the hook is free to anchor.
    Anchorable,
    /// Anything else the hook struck; it bounces off.
    NotAnchorable,
    /// Not a hook impact at all (another body's contact, or the hook touching
    /// its own player).
    Ignore,
}

/// Stateless classifier; safe to call any number of times per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionClassifier {
    hookable: CollisionLayers,
}

impl Default for CollisionClassifier {
    fn default() -> Self {
        Self {
            hookable: CollisionLayers::HOOKABLE,
        }
    }
}

impl CollisionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchorable iff the struck collider is hookable **and** the hook holds
    /// no anchor yet, which stops a multi-contact impact from attaching twice.
    pub fn classify(&self, hook: &HookEntity, event: &CollisionEvent) -> Verdict {
        if event.body != hook.body() {
            return Verdict::Ignore;
        }
        if event
            .other
            .is_some_and(|other| other == hook.player_body() || other == hook.body())
        {
            return Verdict::Ignore;
        }

        if event.other_layers.intersects(self.hookable) && hook.anchor_constraint().is_none() {
            Verdict::Anchorable
        } else {
            Verdict::NotAnchorable
        }
    }
}
