//! Tether constraint manager.
//!
//! Owns the create / mutate / destroy rules for the two constraint kinds a
//! hook uses. Handles live in [`HookEntity`](super::HookEntity) slots; every
//! operation here takes the slot so that at most one constraint of each kind
//! can exist per hook.

use crate::game::config::TetherParameters;
use crate::physics::{BodyHandle, ConstraintHandle, Joint, PhysicsWorld, Vec3};

use super::error::AttachmentError;

/// Creates and tears down the player⇄hook rope and the hook⇄target anchor.
#[derive(Debug, Clone, Default)]
pub struct TetherConstraintManager {
    /// Times a create found an old constraint of the same kind still in its slot.
    dangling_recoveries: u32,
}

impl TetherConstraintManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// How often a leftover constraint had to be destroyed before a create.
    pub fn dangling_recoveries(&self) -> u32 {
        self.dangling_recoveries
    }

    /// Tie `hook` to `player` with a rope limited to `params.max_length`.
    ///
    /// Free movement inside the limit, then a hard or spring-damped stop.
    /// Any tether already in `slot` is destroyed first.
    pub fn create_tether<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        slot: &mut Option<ConstraintHandle>,
        player: BodyHandle,
        hook: BodyHandle,
        params: &TetherParameters,
    ) -> ConstraintHandle {
        if let Some(old) = slot.take() {
            self.dangling_recoveries += 1;
            log::warn!("tether {:?} still alive on create; destroying it first", old);
            self.destroy(world, old);
        }

        let handle = world.create_joint(Joint::rope(
            player,
            Vec3::ZERO,
            hook,
            params.max_length,
            params.spring_stiffness,
            params.damper,
        ));
        *slot = Some(handle);
        log::debug!(
            "tether {:?} created: length {:.2} m, stiffness {}, damper {}",
            handle,
            params.max_length,
            params.spring_stiffness,
            params.damper
        );
        handle
    }

    /// Change a live tether's length limit without recreating it.
    ///
    /// Returns false if the handle is dead or not a rope.
    pub fn set_tether_length<W: PhysicsWorld + ?Sized>(
        &self,
        world: &mut W,
        handle: ConstraintHandle,
        length: f32,
    ) -> bool {
        world
            .joint_mut(handle)
            .is_some_and(|joint| joint.set_rope_length(length))
    }

    /// Current length limit of a live tether.
    pub fn tether_length<W: PhysicsWorld + ?Sized>(
        &self,
        world: &W,
        handle: ConstraintHandle,
    ) -> Option<f32> {
        world.joint(handle).and_then(Joint::rope_length)
    }

    /// Rigidly attach `hook` to `target` at their current relative offset.
    ///
    /// Fails if the target is missing, has no collider, is the hook or its
    /// player, or if `slot` already holds a live anchor. A slot whose joint
    /// has already vanished from the world is cleared and reused.
    pub fn create_anchor<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        slot: &mut Option<ConstraintHandle>,
        hook: BodyHandle,
        player: BodyHandle,
        target: Option<BodyHandle>,
    ) -> Result<ConstraintHandle, AttachmentError> {
        if let Some(existing) = *slot {
            if world.contains_joint(existing) {
                return Err(AttachmentError::AlreadyAnchored);
            }
            self.dangling_recoveries += 1;
            log::warn!("anchor slot held dead handle {:?}; clearing", existing);
            *slot = None;
        }

        let target = target.ok_or(AttachmentError::NoTargetBody)?;
        if target == hook || target == player {
            return Err(AttachmentError::SelfAnchor(target));
        }
        let (Some(target_pos), Some(hook_pos)) =
            (world.body_position(target), world.body_position(hook))
        else {
            return Err(AttachmentError::MissingBody(target));
        };
        if !world.has_collider(target) {
            return Err(AttachmentError::NonPhysicalTarget(target));
        }

        let handle = world.create_joint(Joint::fixed(target, hook, hook_pos - target_pos));
        *slot = Some(handle);
        log::debug!("anchor {:?} created to body {:?}", handle, target);
        Ok(handle)
    }

    /// Destroy a constraint. Dead or unknown handles are a no-op.
    ///
    /// Returns true if a live constraint was removed.
    pub fn destroy<W: PhysicsWorld + ?Sized>(
        &self,
        world: &mut W,
        handle: ConstraintHandle,
    ) -> bool {
        let removed = world.remove_joint(handle).is_some();
        if removed {
            log::debug!("constraint {:?} destroyed", handle);
        }
        removed
    }

    /// Empty `slot`, destroying whatever it held.
    pub fn clear<W: PhysicsWorld + ?Sized>(
        &self,
        world: &mut W,
        slot: &mut Option<ConstraintHandle>,
    ) -> bool {
        slot.take().is_some_and(|handle| self.destroy(world, handle))
    }
}
