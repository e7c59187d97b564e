//! Hook Sandbox - Headless Grappling Hook Demo
//!
//! Run with: `cargo run --bin hook_sandbox [scene.json]`
//!
//! Builds a [`HookScene`] (default layout, or a JSON scene file) and plays a
//! scripted session at 60 fps:
//!
//! 1. Aim slightly up at the hookable wall, charge and throw
//! 2. Wait for the impact, then reel in for a second
//! 3. Let go of the anchor, then stow the hook
//! 4. Throw at the bare wall to the right and watch it bounce off
//!
//! Set `RUST_LOG=debug` for constraint-level logging.

use std::path::Path;
use std::process::ExitCode;

use grapple_tok_engine::game::{HookScene, HookState, SceneConfig};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FLIGHT_FRAMES: usize = 600;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SceneConfig::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("loaded scene from {path}");
                config
            }
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SceneConfig::default(),
    };
    if let Err(e) = config.validate() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    let mut scene = HookScene::new(config);

    println!("=== Throw at the hookable wall ===");
    let landed = throw_and_wait(&mut scene, 0.0, 0.3);
    report(&scene, landed);

    if landed == HookState::Attached {
        scene.set_reel_input(-1.0);
        run_frames(&mut scene, 60);
        scene.set_reel_input(0.0);
        println!(
            "reeled in: rope limit {:.2} m",
            scene.hook.tether_length().unwrap_or(0.0)
        );

        scene.press_fire();
        run_frames(&mut scene, 1);
        scene.release_fire();
        run_frames(&mut scene, 1);
        println!("let go: {}", scene.hook.state());
    }

    scene.reset_hook();
    run_frames(&mut scene, 1);
    println!("stowed: {} ({} joints)", scene.hook.state(), scene.world.joint_count());

    println!();
    println!("=== Throw at the bare wall ===");
    let landed = throw_and_wait(&mut scene, std::f32::consts::FRAC_PI_2, 0.3);
    report(&scene, landed);

    scene.reset_hook();
    run_frames(&mut scene, 1);

    println!();
    println!("Transitions:");
    for transition in scene.drain_transitions() {
        println!("  tick {:>5}  {}", transition.tick, transition.state);
    }
    println!(
        "dangling constraint recoveries: {}",
        scene.hook.constraints().dangling_recoveries()
    );

    ExitCode::SUCCESS
}

/// Aim, charge for a few frames, release, then fly until the hook leaves
/// `Thrown` or the frame budget runs out.
fn throw_and_wait(scene: &mut HookScene, yaw: f32, pitch: f32) -> HookState {
    scene.set_camera(yaw, pitch);
    scene.press_fire();
    run_frames(scene, 10);
    scene.release_fire();
    run_frames(scene, 1);

    for _ in 0..MAX_FLIGHT_FRAMES {
        if scene.hook.state() != HookState::Thrown {
            break;
        }
        scene.update(FRAME_DT);
    }
    scene.hook.state()
}

fn run_frames(scene: &mut HookScene, frames: usize) {
    for _ in 0..frames {
        scene.update(FRAME_DT);
    }
}

fn report(scene: &HookScene, state: HookState) {
    let p = scene.hook.hook_position();
    println!(
        "hook {} at ({:.2}, {:.2}, {:.2}), rope drawn: {}",
        state,
        p.x,
        p.y,
        p.z,
        scene.hook.rope_line().enabled
    );
    if let Some(target) = scene.hook.hook().anchor_target() {
        println!("anchored to body {}", target.raw());
    }
}
