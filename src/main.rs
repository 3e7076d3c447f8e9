//! Strider Demo Simulation
//!
//! Headless scripted run of the character controller: locomotion, double
//! jump, glide, dash, and a wall slide, against the reference world.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use strider::core::fixed::{to_fixed, TICK_DT};
use strider::core::vec2::FixedVec2;
use strider::sim::body::KinematicBody;
use strider::sim::config::CharacterConfig;
use strider::sim::controller::CharacterController;
use strider::sim::intent::IntentFrame;
use strider::sim::world::{Aabb, StaticWorld};
use strider::{TICK_RATE, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Strider Control v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    // Optional config file; defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => CharacterConfig::load(&path)
            .with_context(|| format!("loading character config from {path}"))?,
        None => CharacterConfig::default(),
    };

    run_demo(config);
    Ok(())
}

/// Build the demo scene: a long floor and a wall to the right.
fn build_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    // Floor: top surface at y = -1
    world.add_solid(
        Aabb::new(
            FixedVec2::new(to_fixed(-50.0), to_fixed(-3.0)),
            FixedVec2::new(to_fixed(50.0), to_fixed(-1.0)),
        ),
        1,
    );
    // Wall: left face at x = 12
    world.add_solid(
        Aabb::new(
            FixedVec2::new(to_fixed(12.0), to_fixed(-1.0)),
            FixedVec2::new(to_fixed(14.0), to_fixed(40.0)),
        ),
        1,
    );
    world
}

/// Scripted intent for a given tick.
fn scripted_intent(tick: u32) -> IntentFrame {
    let mut frame = IntentFrame::with_axis(match tick {
        0..=359 => 64,   // walk right
        _ => 127,        // sprint into the wall
    });
    // Double jump at 1s and 1.25s
    frame.set_jump(tick == 60 || tick == 75);
    // Glide through the descent
    frame.set_glide((100..200).contains(&tick));
    // Dash once back on the ground
    frame.set_dash(tick == 300);
    frame
}

fn run_demo(config: CharacterConfig) {
    let world = build_world();
    let mut body = KinematicBody::new(FixedVec2::new(0, to_fixed(-0.1)));
    let mut controller = CharacterController::new(config, &world, &body);

    info!("Running 600 ticks...");

    let mut total_events = 0;
    for tick in 0..600u32 {
        controller.record_intent(scripted_intent(tick));

        // Sense + advance + write the directive, then let gravity act
        let result = controller.step(&world, &mut body, TICK_DT);
        body.integrate(TICK_DT);

        for event in &result.events {
            info!("tick {}: {:?}", event.tick, event.data);
        }
        total_events += result.events.len();

        if tick % 60 == 0 {
            let (x, y) = body.position.to_floats();
            let probe = controller.debug_probe(&body);
            info!(
                "tick {}: mode {:?} at ({:.2}, {:.2}), grounded={}, jumps={}",
                tick,
                result.mode,
                x,
                y,
                probe.grounded,
                controller.jumps_remaining(),
            );
        }
    }

    let (x, y) = body.position.to_floats();
    info!("=== Demo Results ===");
    info!("Final position: ({:.2}, {:.2})", x, y);
    info!("Final mode: {:?}", controller.mode());
    info!("Total events: {}", total_events);
}
