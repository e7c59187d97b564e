//! Hook state machine.
//!
//! Orchestrates the hook lifecycle: takes fire-button edges and collision
//! events, applies the transition table, and performs each edge's side
//! effects through the [`TetherConstraintManager`]. Each edge creates or
//! destroys at most one constraint.
//!
//! # Per-tick protocol
//!
//! ```text
//! on_fire_button(..)        input edges, any time between ticks
//! pre_step(world, aim)      stow/pin hook at aim, check anchor liveness
//! world.step(dt)            physics solver
//! on_collision(..)          each post-solve contact event
//! post_step(world)          sync hook position, refresh rope line
//! ```
//!
//! [`HookScene`](crate::game::scenes::HookScene) runs this protocol on a
//! fixed timestep.

use glam::Vec3;

use crate::game::config::TetherParameters;
use crate::physics::{BodyHandle, CollisionEvent, PhysicsWorld};

use super::aim::AimPose;
use super::classifier::{CollisionClassifier, Verdict};
use super::constraints::TetherConstraintManager;
use super::entity::HookEntity;
use super::error::HookError;
use super::rope::RopeLine;
use super::state::{HookEvent, HookState, next_state};

/// Drives one hook through Idle → Holding → Thrown → Attached/Released.
#[derive(Debug, Clone)]
pub struct HookStateMachine {
    hook: HookEntity,
    params: TetherParameters,
    constraints: TetherConstraintManager,
    classifier: CollisionClassifier,
    rope: RopeLine,
    /// Last aim pose received from the camera
    aim: AimPose,
    /// Current rope limit; `max_length` when fired, then changed by the reel
    rope_length: f32,
}

impl HookStateMachine {
    /// Build an `Idle` hook for `hook_body`, tied to `player_body` when fired.
    pub fn new<W: PhysicsWorld + ?Sized>(
        world: &W,
        hook_body: BodyHandle,
        player_body: BodyHandle,
        params: TetherParameters,
    ) -> Self {
        let position = world.body_position(hook_body).unwrap_or(Vec3::ZERO);
        Self {
            hook: HookEntity::new(hook_body, player_body, position),
            rope_length: params.max_length,
            params,
            constraints: TetherConstraintManager::new(),
            classifier: CollisionClassifier::new(),
            rope: RopeLine::default(),
            aim: AimPose::default(),
        }
    }

    pub fn state(&self) -> HookState {
        self.hook.state()
    }

    pub fn hook(&self) -> &HookEntity {
        &self.hook
    }

    pub fn hook_position(&self) -> Vec3 {
        self.hook.position()
    }

    /// True while a rope ties the hook to the player.
    pub fn is_tethered(&self) -> bool {
        self.hook.tether_constraint().is_some()
    }

    /// True while the hook is anchored to a struck body.
    pub fn is_anchored(&self) -> bool {
        self.hook.anchor_constraint().is_some()
    }

    pub fn rope_line(&self) -> &RopeLine {
        &self.rope
    }

    pub fn params(&self) -> &TetherParameters {
        &self.params
    }

    pub fn constraints(&self) -> &TetherConstraintManager {
        &self.constraints
    }

    /// Current rope limit while tethered.
    pub fn tether_length(&self) -> Option<f32> {
        self.hook.tether_constraint().map(|_| self.rope_length)
    }

    /// Fire button edge from the input collaborator.
    ///
    /// Returns the new state, or `None` if the press/release does not apply
    /// to the current state (ignored, not an error).
    pub fn on_fire_button<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        pressed: bool,
        aim: &AimPose,
    ) -> Option<HookState> {
        self.aim = *aim;
        let event = if pressed {
            HookEvent::FireDown
        } else {
            HookEvent::FireUp
        };
        self.dispatch(world, event, None)
    }

    /// Post-solve collision event from the physics world.
    ///
    /// Only the first hook impact of a throw can act: after it the state has
    /// left `Thrown`, so later events in the same tick find no row.
    pub fn on_collision<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        event: &CollisionEvent,
    ) -> Option<HookState> {
        let verdict = self.classifier.classify(&self.hook, event);
        if verdict == Verdict::Ignore {
            return None;
        }
        self.dispatch(world, HookEvent::Impact(verdict), event.other)
    }

    /// Per-tick work before the physics step.
    ///
    /// A rope the world dropped on its own (player body removed) leaves
    /// nothing to swing from, so the hook is stowed as on [`reset`](Self::reset).
    pub fn pre_step<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, aim: &AimPose) {
        self.aim = *aim;
        if self
            .hook
            .tether_constraint
            .is_some_and(|handle| !world.contains_joint(handle))
        {
            log::warn!("tether to player {:?} vanished; stowing hook", self.hook.player_body);
            self.hook.tether_constraint = None;
            self.reset(world);
        }
        match self.hook.state {
            // Stowed or charging: ride along at the shoot origin
            HookState::Idle | HookState::Holding => {
                world.pin_body(self.hook.body, aim.position);
                self.hook.position = aim.position;
            }
            HookState::Attached => {
                let alive = self
                    .hook
                    .anchor_constraint
                    .is_some_and(|handle| world.contains_joint(handle));
                if !alive {
                    log::warn!(
                        "anchor to {:?} vanished; releasing hook",
                        self.hook.anchor_target
                    );
                    self.hook.anchor_constraint = None;
                    self.hook.anchor_target = None;
                    self.set_state(HookState::Released);
                }
            }
            HookState::Thrown | HookState::Released => {}
        }
    }

    /// Per-tick work after the physics step and its collision events.
    pub fn post_step<W: PhysicsWorld + ?Sized>(&mut self, world: &W) {
        if let Some(position) = world.body_position(self.hook.body) {
            self.hook.position = position;
        }
        if self.hook.state.shows_rope() {
            self.rope.set(self.aim.position, self.hook.position);
        } else {
            self.rope.disable();
        }
    }

    /// Wind the rope in (`input < 0`) or pay it out (`input > 0`).
    ///
    /// `input` is clamped to `[-1, 1]` and scaled by the reel rate; the
    /// length stays within `[idle_length, max_length]`. Returns the new
    /// limit, or `None` when there is no rope.
    pub fn reel<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        input: f32,
        dt: f32,
    ) -> Option<f32> {
        let handle = self.hook.tether_constraint?;
        let delta = input.clamp(-1.0, 1.0) * self.params.reel_rate * dt;
        let length = self.params.clamp_length(self.rope_length + delta);
        if length != self.rope_length && self.constraints.set_tether_length(world, handle, length)
        {
            self.rope_length = length;
        }
        Some(self.rope_length)
    }

    /// Return to `Idle` from any state, destroying both constraints and
    /// stowing the hook at the last shoot origin.
    ///
    /// This is the re-arm path owned by game-mode logic (picking the hook
    /// back up, respawn, scene reload).
    pub fn reset<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        self.constraints.clear(world, &mut self.hook.anchor_constraint);
        self.hook.anchor_target = None;
        self.constraints.clear(world, &mut self.hook.tether_constraint);
        world.set_gravity_enabled(self.hook.body, true);
        world.pin_body(self.hook.body, self.aim.position);
        self.hook.position = self.aim.position;
        self.rope_length = self.params.max_length;
        self.rope.disable();
        self.set_state(HookState::Idle);
    }

    fn dispatch<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        event: HookEvent,
        target: Option<BodyHandle>,
    ) -> Option<HookState> {
        match self.apply(world, event, target) {
            Ok(state) => Some(state),
            Err(HookError::Attachment(e)) => {
                log::warn!("hook bounced off: {e}");
                self.set_state(HookState::Released);
                Some(HookState::Released)
            }
            Err(e @ HookError::InvalidTransition { .. }) => {
                log::trace!("ignored: {e}");
                None
            }
        }
    }

    /// Run one table edge. On error the state is left untouched.
    fn apply<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        event: HookEvent,
        target: Option<BodyHandle>,
    ) -> Result<HookState, HookError> {
        let from = self.hook.state;
        let to =
            next_state(from, event).ok_or(HookError::InvalidTransition { state: from, event })?;

        match (from, to) {
            (HookState::Idle, HookState::Holding) => self.enter_holding(world),
            (HookState::Holding, HookState::Thrown) => self.enter_thrown(world),
            (HookState::Thrown, HookState::Attached) => {
                let handle = self.constraints.create_anchor(
                    world,
                    &mut self.hook.anchor_constraint,
                    self.hook.body,
                    self.hook.player_body,
                    target,
                )?;
                log::debug!("hook anchored via {:?}", handle);
                self.hook.anchor_target = target;
            }
            (HookState::Attached, HookState::Released) => {
                self.constraints.clear(world, &mut self.hook.anchor_constraint);
                self.hook.anchor_target = None;
            }
            // Thrown -> Released: bounce, the rope stays
            _ => {}
        }

        self.set_state(to);
        Ok(to)
    }

    fn enter_holding<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        // Leftovers from a previous cycle (scene reload, missed reset)
        if self.constraints.clear(world, &mut self.hook.tether_constraint) {
            log::warn!("cleared leftover tether on charge");
        }
        self.constraints.clear(world, &mut self.hook.anchor_constraint);
        self.hook.anchor_target = None;

        world.set_gravity_enabled(self.hook.body, false);
        world.pin_body(self.hook.body, self.aim.position);
        self.hook.position = self.aim.position;
        self.rope.disable();
    }

    fn enter_thrown<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        world.unpin_body(self.hook.body);
        world.set_gravity_enabled(self.hook.body, true);
        world.apply_impulse(self.hook.body, self.aim.forward * self.params.shoot_force);

        self.rope_length = self.params.max_length;
        self.constraints.create_tether(
            world,
            &mut self.hook.tether_constraint,
            self.hook.player_body,
            self.hook.body,
            &self.params,
        );
        self.rope.set(self.aim.position, self.hook.position);
    }

    fn set_state(&mut self, state: HookState) {
        if self.hook.state != state {
            log::info!("hook {} -> {}", self.hook.state, state);
        }
        self.hook.state = state;
    }
}
