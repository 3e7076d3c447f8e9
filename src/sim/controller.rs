//! Character Controller
//!
//! Owns one character's config, sensor, runtime state and intent latch,
//! and runs the fixed-tick pipeline: sense -> drain intent -> advance the
//! state machine -> write the directive to the rigid body.
//!
//! Single-threaded by construction: one controller per character, ticked
//! strictly in order, never concurrently.

use tracing::{debug, trace};

use crate::core::fixed::Fixed;
use crate::core::vec2::FixedVec2;
use crate::sim::body::RigidBody;
use crate::sim::config::CharacterConfig;
use crate::sim::events::ControllerEvent;
use crate::sim::integrator;
use crate::sim::intent::{IntentFrame, IntentLatch};
use crate::sim::machine::{advance, Mode, RuntimeState};
use crate::sim::sensor::{ContactSensor, PhysicsWorld, SensorReading};

/// Outcome of one controller tick.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Mode after the tick
    pub mode: Mode,
    /// This tick's sensor reading
    pub sensed: SensorReading,
    /// Events generated this tick
    pub events: Vec<ControllerEvent>,
}

/// Diagnostic snapshot for debug rendering.
#[derive(Clone, Copy, Debug)]
pub struct DebugProbe {
    /// Ground reading from the most recent tick
    pub grounded: bool,
    /// World-space position of the ground probe
    pub ground_anchor: FixedVec2,
}

/// Ability state controller for one character.
pub struct CharacterController {
    config: CharacterConfig,
    sensor: ContactSensor,
    state: RuntimeState,
    latch: IntentLatch,
    tick: u64,
}

impl CharacterController {
    /// Create a controller for a body in a world.
    ///
    /// Captures the body's current gravity scale as the normal scale and
    /// takes an initial ground reading to seed the runtime state.
    pub fn new<W: PhysicsWorld, B: RigidBody>(
        config: CharacterConfig,
        world: &W,
        body: &B,
    ) -> Self {
        let mut config = config.sanitized();
        config.normal_gravity_scale = body.gravity_scale();

        let sensor = ContactSensor::from_config(&config);
        let grounded = sensor.probe_ground(world, Some(body.position()));
        let state = RuntimeState::new(&config, grounded);

        debug!(
            grounded,
            max_jumps = config.max_jumps,
            "character controller initialized"
        );

        Self {
            config,
            sensor,
            state,
            latch: IntentLatch::new(),
            tick: 0,
        }
    }

    /// Record one sampled intent frame (called at render rate).
    pub fn record_intent(&mut self, frame: IntentFrame) {
        self.latch.record(frame);
    }

    /// Run one fixed tick against the world and body.
    pub fn step<W: PhysicsWorld, B: RigidBody>(
        &mut self,
        world: &W,
        body: &mut B,
        dt: Fixed,
    ) -> StepResult {
        self.tick += 1;

        let sensed = self.sensor.sense(world, Some(body.position()));
        let intent = self.latch.take();

        let mode_before = self.state.mode;
        let landed = sensed.grounded && !self.state.was_grounded;

        let directive = advance(
            &self.config,
            &mut self.state,
            dt,
            &intent,
            sensed,
            body.velocity(),
        );
        integrator::apply(body, &directive);

        let mut events = Vec::new();
        if landed {
            events.push(ControllerEvent::landed(self.tick));
        }
        if self.state.mode != mode_before {
            debug!(
                tick = self.tick,
                from = ?mode_before,
                to = ?self.state.mode,
                "mode transition"
            );
            events.push(ControllerEvent::mode_changed(
                self.tick,
                mode_before,
                self.state.mode,
            ));
        }
        // Dash events follow the dash outcome, not the net mode change: an
        // instantaneous dash enters and retires within one tick, leaving
        // the mode where it started.
        let dash_started = mode_before != Mode::Dashing && intent.dash;
        if dash_started {
            events.push(ControllerEvent::dash_started(
                self.tick,
                self.state.facing_sign,
            ));
        }
        if (mode_before == Mode::Dashing || dash_started) && self.state.mode != Mode::Dashing {
            events.push(ControllerEvent::dash_ended(self.tick));
        }
        // The only impulse the machine ever emits is a jump
        if directive.impulse.is_some() {
            events.push(ControllerEvent::jumped(
                self.tick,
                self.state.jumps_remaining,
            ));
        }

        trace!(
            tick = self.tick,
            mode = ?self.state.mode,
            velocity = %directive.velocity,
            gravity_scale = directive.gravity_scale,
            "tick"
        );

        StepResult {
            mode: self.state.mode,
            sensed,
            events,
        }
    }

    /// Reset runtime state for a respawn.
    pub fn reset<W: PhysicsWorld, B: RigidBody>(&mut self, world: &W, body: &B) {
        let grounded = self.sensor.probe_ground(world, Some(body.position()));
        self.state = RuntimeState::new(&self.config, grounded);
        self.latch = IntentLatch::new();
        debug!(grounded, "character controller reset");
    }

    /// Diagnostic snapshot for debug rendering.
    pub fn debug_probe<B: RigidBody>(&self, body: &B) -> DebugProbe {
        DebugProbe {
            grounded: self.state.was_grounded,
            ground_anchor: self.sensor.ground_anchor(body.position()),
        }
    }

    /// Current movement mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Jumps left before the character must land.
    pub fn jumps_remaining(&self) -> u32 {
        self.state.jumps_remaining
    }

    /// The runtime state, for snapshots and assertions.
    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    /// The sanitized config in effect.
    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }
}

// =============================================================================
// TESTS
// =============================================================================
