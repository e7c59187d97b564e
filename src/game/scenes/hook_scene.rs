//! HookScene: a player, a grappling hook and static level geometry.
//!
//! Owns the [`SandboxWorld`] and the [`HookStateMachine`] and runs them on a
//! fixed timestep. Input arrives as edges between frames and is applied at
//! the start of the next physics tick, so a press and release in the same
//! frame still produce Holding then Thrown.

use std::collections::VecDeque;

use glam::Vec3;

use crate::game::config::SceneConfig;
use crate::game::hook::{AimPose, HookState, HookStateMachine};
use crate::physics::{BodyHandle, CollisionLayers, RigidBody, SandboxConfig, SandboxWorld};

pub const FIXED_PHYSICS_STEP_S: f32 = 1.0 / 120.0;
pub const MAX_FIXED_STEPS_PER_FRAME: usize = 8;

/// A state change reported by the hook during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookTransition {
    /// Fixed step counter at which it happened
    pub tick: u64,
    pub state: HookState,
}

/// Complete hook sandbox scene.
///
/// Created from a [`SceneConfig`]. Call [`update`](HookScene::update) each
/// frame with the frame delta; queue input with
/// [`press_fire`](HookScene::press_fire) / [`release_fire`](HookScene::release_fire).
pub struct HookScene {
    // -- Config --
    pub config: SceneConfig,

    // -- Simulation --
    pub world: SandboxWorld,
    pub hook: HookStateMachine,
    player_body: BodyHandle,
    hook_body: BodyHandle,
    surface_bodies: Vec<BodyHandle>,

    // -- Camera --
    pub camera_yaw: f32,
    pub camera_pitch: f32,

    // -- Input --
    pending_fire: VecDeque<bool>,
    reel_input: f32,

    // -- Clock --
    simulation_accumulator_s: f32,
    tick_count: u64,
    transitions: Vec<HookTransition>,
}

impl HookScene {
    /// Build the world from configuration and stow the hook at the shoot
    /// origin. Call [`SceneConfig::validate`] first for untrusted input.
    pub fn new(config: SceneConfig) -> Self {
        let mut world = SandboxWorld::new(SandboxConfig {
            gravity: config.gravity,
            ..SandboxConfig::default()
        });

        let surface_bodies = config
            .surfaces
            .iter()
            .map(|surface| {
                let mut layers = CollisionLayers::WORLD;
                if surface.hookable {
                    layers |= CollisionLayers::HOOKABLE;
                }
                world.add_body(RigidBody::static_box(
                    surface.center,
                    surface.half_extents,
                    layers,
                ))
            })
            .collect();

        let player_body = world.add_body(
            RigidBody::dynamic_sphere(
                config.player_start,
                config.player_radius,
                config.player_mass,
                CollisionLayers::PLAYER,
            )
            .with_mask(CollisionLayers::ALL.without(CollisionLayers::HOOK)),
        );

        let aim = Self::aim_from(&config, config.player_start, 0.0, 0.0);
        let hook_body = world.add_body(
            RigidBody::dynamic_sphere(
                aim.position,
                config.hook_radius,
                config.hook_mass,
                CollisionLayers::HOOK,
            )
            .with_mask(CollisionLayers::ALL.without(CollisionLayers::PLAYER)),
        );

        let mut hook = HookStateMachine::new(&world, hook_body, player_body, config.tether);
        hook.pre_step(&mut world, &aim);

        log::info!(
            "hook scene ready: {} surfaces, rope {:.1} m",
            config.surfaces.len(),
            config.tether.max_length
        );

        Self {
            config,
            world,
            hook,
            player_body,
            hook_body,
            surface_bodies,
            camera_yaw: 0.0,
            camera_pitch: 0.0,
            pending_fire: VecDeque::new(),
            reel_input: 0.0,
            simulation_accumulator_s: 0.0,
            tick_count: 0,
            transitions: Vec::new(),
        }
    }

    fn aim_from(config: &SceneConfig, player_pos: Vec3, yaw: f32, pitch: f32) -> AimPose {
        let eye = player_pos + Vec3::Y * config.eye_height;
        AimPose::from_yaw_pitch(eye, yaw, pitch).with_offset(config.tether.shoot_origin_offset)
    }

    pub fn player_body(&self) -> BodyHandle {
        self.player_body
    }

    pub fn hook_body(&self) -> BodyHandle {
        self.hook_body
    }

    /// Static level bodies in config order.
    pub fn surface_bodies(&self) -> &[BodyHandle] {
        &self.surface_bodies
    }

    pub fn player_position(&self) -> Vec3 {
        self.world
            .body(self.player_body)
            .map(|body| body.position)
            .unwrap_or(self.config.player_start)
    }

    /// Current shoot origin and aim direction.
    pub fn aim_pose(&self) -> AimPose {
        Self::aim_from(
            &self.config,
            self.player_position(),
            self.camera_yaw,
            self.camera_pitch,
        )
    }

    pub fn set_camera(&mut self, yaw: f32, pitch: f32) {
        self.camera_yaw = yaw;
        self.camera_pitch = pitch.clamp(-1.5, 1.5);
    }

    pub fn press_fire(&mut self) {
        self.pending_fire.push_back(true);
    }

    pub fn release_fire(&mut self) {
        self.pending_fire.push_back(false);
    }

    /// Held reel axis: negative winds in, positive pays out.
    pub fn set_reel_input(&mut self, input: f32) {
        self.reel_input = input;
    }

    /// Stow the hook and drop all rope constraints.
    pub fn reset_hook(&mut self) {
        self.pending_fire.clear();
        let aim = self.aim_pose();
        self.hook.reset(&mut self.world);
        self.hook.pre_step(&mut self.world, &aim);
        self.record(self.hook.state());
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Drain hook state changes since the last call.
    pub fn drain_transitions(&mut self) -> Vec<HookTransition> {
        std::mem::take(&mut self.transitions)
    }

    /// Per-frame update: runs as many fixed steps as `delta` covers.
    ///
    /// Returns the number of fixed steps taken.
    pub fn update(&mut self, delta: f32) -> usize {
        let delta = delta.clamp(0.0, 0.1);
        self.simulation_accumulator_s = (self.simulation_accumulator_s + delta)
            .min(FIXED_PHYSICS_STEP_S * MAX_FIXED_STEPS_PER_FRAME as f32);

        let mut steps = 0usize;
        while self.simulation_accumulator_s >= FIXED_PHYSICS_STEP_S
            && steps < MAX_FIXED_STEPS_PER_FRAME
        {
            self.tick(FIXED_PHYSICS_STEP_S);
            self.simulation_accumulator_s -= FIXED_PHYSICS_STEP_S;
            steps += 1;
        }
        steps
    }

    /// Run exactly one fixed step of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.tick_count += 1;
        let aim = self.aim_pose();

        // 1. Queued fire edges
        while let Some(pressed) = self.pending_fire.pop_front() {
            if let Some(state) = self.hook.on_fire_button(&mut self.world, pressed, &aim) {
                self.record(state);
            }
        }

        // 2. Pin / liveness, then reel
        let before = self.hook.state();
        self.hook.pre_step(&mut self.world, &aim);
        if self.hook.state() != before {
            self.record(self.hook.state());
        }
        if self.reel_input != 0.0 {
            self.hook.reel(&mut self.world, self.reel_input, dt);
        }

        // 3. Physics
        let events = self.world.step(dt);

        // 4. Post-solve contacts
        for event in &events {
            if let Some(state) = self.hook.on_collision(&mut self.world, event) {
                self.record(state);
            }
        }

        // 5. Sync
        self.hook.post_step(&self.world);
    }

    fn record(&mut self, state: HookState) {
        self.transitions.push(HookTransition {
            tick: self.tick_count,
            state,
        });
    }
}
