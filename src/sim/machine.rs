//! Ability State Machine
//!
//! The decision core: converts one tick's sensor reading and intent
//! snapshot into a velocity/gravity directive and the next movement mode.
//! Pure function over an explicit `RuntimeState`, so it runs headlessly.
//!
//! Branch priority per tick (one mode branch executes):
//!
//! 1. Landing edge bookkeeping (jump budget refill)
//! 2. Dash continuation / dash entry (exclusive, timed, cannot be preempted)
//! 3. Wall slide (descending against a wall; suppresses horizontal drive)
//! 4. Glide (descending, glide held, no wall)
//! 5. Default locomotion (grounded or airborne)
//!
//! A latched jump is layered over whichever branch ran, except dash.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{fixed_max, fixed_mul, fixed_signum, Fixed};
use crate::core::vec2::FixedVec2;
use crate::sim::config::CharacterConfig;
use crate::sim::intent::TickIntent;
use crate::sim::sensor::SensorReading;

/// Exclusive movement mode.
///
/// A tagged variant rather than independent flags: exactly one mode holds
/// at any time, enforced by the type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// On the ground, driven by the move axis
    #[default]
    Grounded,
    /// In the air under normal gravity
    Airborne,
    /// Descending under reduced gravity with a capped fall speed
    Gliding,
    /// Timed horizontal burst; gravity frozen, vertical velocity carried
    Dashing,
    /// Pinned to a wall, descent capped, horizontal drive suppressed
    WallSliding,
}

/// Per-character mutable state, owned by the state machine.
///
/// Created once at character initialization and reset only on respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeState {
    /// Current movement mode
    pub mode: Mode,
    /// Jumps left before the character must land
    pub jumps_remaining: u32,
    /// Remaining dash time; meaningful only while `mode == Dashing`
    pub dash_timer: Fixed,
    /// +1 or -1, the last non-zero horizontal intent sign
    pub facing_sign: i32,
    /// Previous tick's ground reading, for landing-edge detection
    pub was_grounded: bool,
}

impl RuntimeState {
    /// Create runtime state at character initialization.
    pub fn new(config: &CharacterConfig, initially_grounded: bool) -> Self {
        Self {
            mode: if initially_grounded {
                Mode::Grounded
            } else {
                Mode::Airborne
            },
            jumps_remaining: config.max_jumps,
            dash_timer: 0,
            facing_sign: 1,
            was_grounded: initially_grounded,
        }
    }
}

/// Velocity and gravity instruction for the integrator, computed once per
/// tick and applied in a single write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// New velocity for the rigid body
    pub velocity: FixedVec2,
    /// Gravity multiplier to apply this tick
    pub gravity_scale: Fixed,
    /// Instantaneous impulse (jump), applied after the velocity write
    pub impulse: Option<FixedVec2>,
}

/// Advance the state machine by one fixed tick.
///
/// `velocity` is the rigid body's velocity at tick start; branch
/// preconditions read it unmodified.
pub fn advance(
    config: &CharacterConfig,
    state: &mut RuntimeState,
    dt: Fixed,
    intent: &TickIntent,
    sensed: SensorReading,
    velocity: FixedVec2,
) -> Directive {
    let mut v = velocity;
    let mut gravity_scale = config.normal_gravity_scale;
    let mut impulse = None;

    // Dash direction is locked at entry: facing tracks the axis only
    // while no dash is running, and resumes once the timer retires it.
    if state.mode != Mode::Dashing {
        match fixed_signum(intent.move_axis) {
            1 => state.facing_sign = 1,
            -1 => state.facing_sign = -1,
            _ => {}
        }
    }

    // Landing edge: refill the jump budget and drop any glide leftover
    // gravity override. An in-flight dash keeps its tag; the dash branch
    // itself grounds the character when the timer runs out.
    if sensed.grounded && !state.was_grounded {
        state.jumps_remaining = config.max_jumps;
        if state.mode != Mode::Dashing {
            state.mode = Mode::Grounded;
        }
    }

    let dashing = if state.mode == Mode::Dashing {
        dash_tick(config, state, sensed, dt, &mut v, &mut gravity_scale);
        true
    } else if intent.dash {
        // facing_sign already reflects this tick's axis; zero axis keeps
        // the previous facing
        state.mode = Mode::Dashing;
        state.dash_timer = config.dash_duration;
        dash_tick(config, state, sensed, dt, &mut v, &mut gravity_scale);
        true
    } else if !sensed.grounded && sensed.wall && velocity.y <= 0 {
        // Pinned to the wall: descent capped, horizontal drive suppressed
        // (intentional wall-stick feel, even when pushing away)
        state.mode = Mode::WallSliding;
        v.y = fixed_max(v.y, config.wall_slide_speed);
        false
    } else if !sensed.grounded && !sensed.wall && velocity.y <= 0 && intent.glide {
        state.mode = Mode::Gliding;
        gravity_scale = config.glide_gravity_scale;
        v.x = fixed_mul(intent.move_axis, config.move_speed);
        if v.y < config.max_fall_speed {
            v.y = config.max_fall_speed;
        }
        false
    } else {
        state.mode = if sensed.grounded {
            Mode::Grounded
        } else {
            Mode::Airborne
        };
        v.x = fixed_mul(intent.move_axis, config.move_speed);
        false
    };

    // One-shot jump layered over the mode branch, never during a dash tick.
    // Vertical velocity is zeroed first so multi-jumps feel uniform
    // regardless of current fall speed.
    if intent.jump && state.jumps_remaining > 0 && !dashing {
        v.y = 0;
        impulse = Some(FixedVec2::new(0, config.jump_force));
        state.jumps_remaining -= 1;
    }

    state.was_grounded = sensed.grounded;

    Directive {
        velocity: v,
        gravity_scale,
        impulse,
    }
}

/// One dash tick: burn the timer, force the horizontal burst, freeze
/// gravity. The entry tick counts against the timer, so a dash of duration
/// D lasts exactly ceil(D/dt) ticks and a non-positive duration applies
/// its directive once and retires on the same tick.
fn dash_tick(
    config: &CharacterConfig,
    state: &mut RuntimeState,
    sensed: SensorReading,
    dt: Fixed,
    v: &mut FixedVec2,
    gravity_scale: &mut Fixed,
) {
    state.dash_timer = state.dash_timer.saturating_sub(dt);

    v.x = if state.facing_sign >= 0 {
        config.dash_speed
    } else {
        -config.dash_speed
    };
    // Vertical component carries through untouched; gravity frozen
    *gravity_scale = 0;

    if state.dash_timer <= 0 {
        state.mode = if sensed.grounded {
            Mode::Grounded
        } else {
            Mode::Airborne
        };
        *gravity_scale = config.normal_gravity_scale;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, FIXED_ONE};

    // Power-of-two timestep so duration arithmetic is exact in Q16.16
    const DT: Fixed = to_fixed(0.125);

    fn config() -> CharacterConfig {
        CharacterConfig::default().sanitized()
    }

    fn airborne_state(config: &CharacterConfig) -> RuntimeState {
        RuntimeState::new(config, false)
    }

    fn grounded_state(config: &CharacterConfig) -> RuntimeState {
        RuntimeState::new(config, true)
    }

    const ON_GROUND: SensorReading = SensorReading {
        grounded: true,
        wall: false,
    };
    const IN_AIR: SensorReading = SensorReading {
        grounded: false,
        wall: false,
    };
    const ON_WALL: SensorReading = SensorReading {
        grounded: false,
        wall: true,
    };

    #[test]
    fn test_grounded_locomotion() {
        let cfg = config();
        let mut state = grounded_state(&cfg);
        let intent = TickIntent {
            move_axis: FIXED_ONE,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &intent, ON_GROUND, FixedVec2::ZERO);

        assert_eq!(state.mode, Mode::Grounded);
        assert_eq!(d.velocity.x, cfg.move_speed);
        assert_eq!(d.velocity.y, 0);
        assert_eq!(d.gravity_scale, cfg.normal_gravity_scale);
        assert!(d.impulse.is_none());
    }

    #[test]
    fn test_airborne_without_glide_uses_normal_gravity() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        let intent = TickIntent::default();

        let falling = FixedVec2::new(0, to_fixed(-3.0));
        let d = advance(&cfg, &mut state, DT, &intent, IN_AIR, falling);

        assert_eq!(state.mode, Mode::Airborne);
        assert_eq!(d.gravity_scale, cfg.normal_gravity_scale);
        assert_eq!(d.velocity.y, to_fixed(-3.0));
    }

    #[test]
    fn test_jump_budget_two_air_jumps() {
        let cfg = config();
        assert_eq!(cfg.max_jumps, 2);
        let mut state = airborne_state(&cfg);
        let jump = TickIntent {
            jump: true,
            ..Default::default()
        };

        // First jump: vertical zeroed, impulse applied, 2 -> 1
        let d1 = advance(&cfg, &mut state, DT, &jump, IN_AIR, FixedVec2::new(0, to_fixed(-4.0)));
        assert_eq!(d1.velocity.y, 0);
        assert_eq!(d1.impulse, Some(FixedVec2::new(0, cfg.jump_force)));
        assert_eq!(state.jumps_remaining, 1);

        // Second jump: 1 -> 0
        let d2 = advance(&cfg, &mut state, DT, &jump, IN_AIR, FixedVec2::new(0, to_fixed(2.0)));
        assert_eq!(d2.impulse, Some(FixedVec2::new(0, cfg.jump_force)));
        assert_eq!(state.jumps_remaining, 0);

        // Third press is ignored
        let d3 = advance(&cfg, &mut state, DT, &jump, IN_AIR, FixedVec2::new(0, to_fixed(2.0)));
        assert!(d3.impulse.is_none());
        assert_eq!(state.jumps_remaining, 0);
    }

    #[test]
    fn test_jump_budget_resets_only_on_landing_edge() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        state.jumps_remaining = 0;

        // Staying airborne never refills
        let idle = TickIntent::default();
        advance(&cfg, &mut state, DT, &idle, IN_AIR, FixedVec2::ZERO);
        assert_eq!(state.jumps_remaining, 0);

        // Landing edge refills
        advance(&cfg, &mut state, DT, &idle, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(state.jumps_remaining, cfg.max_jumps);
        assert_eq!(state.mode, Mode::Grounded);

        // Staying grounded does not re-trigger the edge path spuriously
        state.jumps_remaining = 1;
        advance(&cfg, &mut state, DT, &idle, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(state.jumps_remaining, 1);
    }

    #[test]
    fn test_glide_caps_fall_speed() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        let glide = TickIntent {
            glide: true,
            ..Default::default()
        };

        // Scenario: initial vy = -5, max fall -2 => one tick clamps to -2
        let d = advance(&cfg, &mut state, DT, &glide, IN_AIR, FixedVec2::new(0, to_fixed(-5.0)));
        assert_eq!(state.mode, Mode::Gliding);
        assert_eq!(d.velocity.y, to_fixed(-2.0));
        assert_eq!(d.gravity_scale, cfg.glide_gravity_scale);

        // Already slower than the cap: untouched
        let d2 = advance(&cfg, &mut state, DT, &glide, IN_AIR, FixedVec2::new(0, to_fixed(-1.0)));
        assert_eq!(d2.velocity.y, to_fixed(-1.0));
    }

    #[test]
    fn test_glide_requires_descent_and_hold() {
        let cfg = config();
        let mut state = airborne_state(&cfg);

        // Rising: no glide even if held
        let glide = TickIntent {
            glide: true,
            ..Default::default()
        };
        advance(&cfg, &mut state, DT, &glide, IN_AIR, FixedVec2::new(0, to_fixed(3.0)));
        assert_eq!(state.mode, Mode::Airborne);

        // Descending without hold: no glide
        let idle = TickIntent::default();
        advance(&cfg, &mut state, DT, &idle, IN_AIR, FixedVec2::new(0, to_fixed(-3.0)));
        assert_eq!(state.mode, Mode::Airborne);
    }

    #[test]
    fn test_glide_keeps_steering_live() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        let glide_left = TickIntent {
            move_axis: -FIXED_ONE,
            glide: true,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &glide_left, IN_AIR, FixedVec2::new(0, to_fixed(-1.0)));
        assert_eq!(state.mode, Mode::Gliding);
        assert_eq!(d.velocity.x, -cfg.move_speed);
    }

    #[test]
    fn test_wall_slide_caps_descent_and_pins_horizontal() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        // Pushing away from the wall makes no difference while pinned
        let push_away = TickIntent {
            move_axis: FIXED_ONE,
            ..Default::default()
        };

        let incoming = FixedVec2::new(to_fixed(0.5), to_fixed(-4.0));
        let d = advance(&cfg, &mut state, DT, &push_away, ON_WALL, incoming);

        assert_eq!(state.mode, Mode::WallSliding);
        assert_eq!(d.velocity.y, to_fixed(-1.5));
        assert_eq!(d.velocity.x, to_fixed(0.5), "horizontal drive suppressed");
    }

    #[test]
    fn test_wall_slide_requires_descent() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        let idle = TickIntent::default();

        // Moving upward against the wall: not a slide
        advance(&cfg, &mut state, DT, &idle, ON_WALL, FixedVec2::new(0, to_fixed(5.0)));
        assert_eq!(state.mode, Mode::Airborne);
    }

    #[test]
    fn test_wall_slide_beats_glide_hold() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        let glide = TickIntent {
            glide: true,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &glide, ON_WALL, FixedVec2::new(0, to_fixed(-4.0)));
        assert_eq!(state.mode, Mode::WallSliding);
        assert_eq!(d.gravity_scale, cfg.normal_gravity_scale);
        assert_eq!(d.velocity.y, cfg.wall_slide_speed);
    }

    #[test]
    fn test_jump_out_of_wall_slide() {
        let cfg = config();
        let mut state = airborne_state(&cfg);
        let jump = TickIntent {
            jump: true,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &jump, ON_WALL, FixedVec2::new(0, to_fixed(-4.0)));
        // Wall-slide branch ran, then the jump layered over it
        assert_eq!(state.mode, Mode::WallSliding);
        assert_eq!(d.velocity.y, 0);
        assert_eq!(d.impulse, Some(FixedVec2::new(0, cfg.jump_force)));
        assert_eq!(state.jumps_remaining, cfg.max_jumps - 1);
    }

    #[test]
    fn test_grounded_wall_contact_is_not_a_slide() {
        // Touching ground and wall simultaneously: grounded wins
        let cfg = config();
        let mut state = airborne_state(&cfg);
        let both = SensorReading {
            grounded: true,
            wall: true,
        };
        let run = TickIntent {
            move_axis: FIXED_ONE,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &run, both, FixedVec2::ZERO);
        assert_eq!(state.mode, Mode::Grounded);
        assert_eq!(d.velocity.x, cfg.move_speed);
    }

    #[test]
    fn test_dash_duration_in_ticks() {
        // D = 0.25s, dt = 0.125s => exactly 2 dashing ticks
        let cfg = config();
        let mut state = grounded_state(&cfg);
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };
        let idle = TickIntent::default();

        let d1 = advance(&cfg, &mut state, DT, &dash, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(state.mode, Mode::Dashing);
        assert_eq!(d1.velocity.x, cfg.dash_speed);
        assert_eq!(d1.gravity_scale, 0);

        let d2 = advance(&cfg, &mut state, DT, &idle, ON_GROUND, d1.velocity);
        assert_eq!(d2.velocity.x, cfg.dash_speed, "final tick still dashes");
        assert_eq!(state.mode, Mode::Grounded, "timer expired, dash retired");

        let d3 = advance(&cfg, &mut state, DT, &idle, ON_GROUND, d2.velocity);
        assert_eq!(d3.velocity.x, 0, "back to locomotion with idle axis");
    }

    #[test]
    fn test_dash_ceil_of_fractional_duration() {
        // D = 0.3s, dt = 0.125s => ceil(2.4) = 3 dashing ticks
        let cfg = CharacterConfig {
            dash_duration: to_fixed(0.3),
            ..config()
        };
        let mut state = grounded_state(&cfg);
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };
        let idle = TickIntent::default();

        advance(&cfg, &mut state, DT, &dash, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(state.mode, Mode::Dashing);
        advance(&cfg, &mut state, DT, &idle, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(state.mode, Mode::Dashing);
        advance(&cfg, &mut state, DT, &idle, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(state.mode, Mode::Grounded);
    }

    #[test]
    fn test_instantaneous_dash() {
        // Non-positive duration: directive applied once, retired same tick
        let cfg = CharacterConfig {
            dash_duration: 0,
            ..config()
        };
        let mut state = grounded_state(&cfg);
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &dash, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(d.velocity.x, cfg.dash_speed);
        assert_eq!(state.mode, Mode::Grounded);
    }

    #[test]
    fn test_dash_uses_facing_when_axis_idle() {
        // Scenario: dash with no axis, previous facing +1, speed 12
        let cfg = config();
        let mut state = grounded_state(&cfg);
        assert_eq!(state.facing_sign, 1);
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &dash, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(d.velocity.x, to_fixed(12.0));
    }

    #[test]
    fn test_dash_recomputes_facing_from_axis() {
        let cfg = config();
        let mut state = grounded_state(&cfg);
        let dash_left = TickIntent {
            move_axis: -FIXED_ONE,
            dash: true,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &dash_left, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(d.velocity.x, -cfg.dash_speed);
        assert_eq!(state.facing_sign, -1);
    }

    #[test]
    fn test_dash_direction_locked_at_entry() {
        // Axis 0 at entry dashes along the previous facing (+1); flipping
        // the stick mid-dash must not reverse the burst
        let cfg = CharacterConfig {
            dash_duration: to_fixed(0.5),
            ..config()
        };
        let mut state = grounded_state(&cfg);
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };

        let d = advance(&cfg, &mut state, DT, &dash, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(d.velocity.x, cfg.dash_speed);

        let reverse = TickIntent {
            move_axis: -FIXED_ONE,
            ..Default::default()
        };
        let d = advance(&cfg, &mut state, DT, &reverse, ON_GROUND, d.velocity);
        assert_eq!(state.mode, Mode::Dashing);
        assert_eq!(d.velocity.x, cfg.dash_speed, "burst keeps the entry direction");
        assert_eq!(state.facing_sign, 1, "facing untouched while dashing");
    }

    #[test]
    fn test_dash_cannot_be_preempted() {
        let cfg = CharacterConfig {
            dash_duration: to_fixed(0.5),
            ..config()
        };
        let mut state = airborne_state(&cfg);
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };

        advance(&cfg, &mut state, DT, &dash, IN_AIR, FixedVec2::new(0, to_fixed(-3.0)));
        assert_eq!(state.mode, Mode::Dashing);

        // Wall contact, glide hold, jump, and even a second dash edge all
        // bounce off a running dash
        let everything = TickIntent {
            move_axis: FIXED_ONE,
            jump: true,
            dash: true,
            glide: true,
        };
        let d = advance(&cfg, &mut state, DT, &everything, ON_WALL, FixedVec2::new(0, to_fixed(-3.0)));
        assert_eq!(state.mode, Mode::Dashing);
        assert!(d.impulse.is_none(), "no jump while dashing");
        assert_eq!(d.velocity.x, cfg.dash_speed);
        assert_eq!(state.jumps_remaining, cfg.max_jumps);
    }

    #[test]
    fn test_dash_carries_vertical_velocity() {
        let cfg = CharacterConfig {
            dash_duration: to_fixed(0.5),
            ..config()
        };
        let mut state = airborne_state(&cfg);
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };

        let falling = FixedVec2::new(0, to_fixed(-2.5));
        let d = advance(&cfg, &mut state, DT, &dash, IN_AIR, falling);
        assert_eq!(d.velocity.y, to_fixed(-2.5), "vertical carried through");
        assert_eq!(d.gravity_scale, 0, "gravity frozen during dash");
    }

    #[test]
    fn test_landing_edge_refills_jumps_but_not_during_dash() {
        let cfg = CharacterConfig {
            dash_duration: to_fixed(0.5),
            ..config()
        };
        let mut state = airborne_state(&cfg);
        state.jumps_remaining = 0;
        let dash = TickIntent {
            dash: true,
            ..Default::default()
        };
        let idle = TickIntent::default();

        advance(&cfg, &mut state, DT, &dash, IN_AIR, FixedVec2::ZERO);
        assert_eq!(state.mode, Mode::Dashing);

        // Landing mid-dash: budget refills, dash keeps running
        advance(&cfg, &mut state, DT, &idle, ON_GROUND, FixedVec2::ZERO);
        assert_eq!(state.jumps_remaining, cfg.max_jumps);
        assert_eq!(state.mode, Mode::Dashing);
    }

    #[test]
    fn test_initial_state() {
        let cfg = config();
        let grounded = RuntimeState::new(&cfg, true);
        assert_eq!(grounded.mode, Mode::Grounded);
        assert_eq!(grounded.jumps_remaining, cfg.max_jumps);
        assert_eq!(grounded.facing_sign, 1);

        let airborne = RuntimeState::new(&cfg, false);
        assert_eq!(airborne.mode, Mode::Airborne);
    }

    mod invariants {
        use super::*;
        use proptest::prelude::*;

        /// One randomized tick's worth of intent and sensing.
        #[derive(Clone, Copy, Debug)]
        struct TickInput {
            axis: i32,
            jump: bool,
            dash: bool,
            glide: bool,
            grounded: bool,
            wall: bool,
        }

        fn tick_input() -> impl Strategy<Value = TickInput> {
            (
                -2i32..=2,
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
            )
                .prop_map(|(axis, jump, dash, glide, grounded, wall)| TickInput {
                    axis,
                    jump,
                    dash,
                    glide,
                    grounded,
                    wall,
                })
        }

        proptest! {
            /// Runs the machine against arbitrary intent/sensor streams with
            /// a gravity step between ticks and checks every documented
            /// invariant on every tick.
            #[test]
            fn invariants_hold_for_any_stream(inputs in prop::collection::vec(tick_input(), 1..200)) {
                let cfg = config();
                let mut state = RuntimeState::new(&cfg, false);
                let mut velocity = FixedVec2::ZERO;
                let gravity_accel = to_fixed(-20.0);

                for input in inputs {
                    let intent = TickIntent {
                        move_axis: input.axis * (FIXED_ONE / 2),
                        jump: input.jump,
                        dash: input.dash,
                        glide: input.glide,
                    };
                    let sensed = SensorReading {
                        grounded: input.grounded,
                        wall: input.wall,
                    };

                    let was_dashing = state.mode == Mode::Dashing;
                    let facing_before = state.facing_sign;
                    let jumps_before = state.jumps_remaining;
                    let landing = sensed.grounded && !state.was_grounded;

                    let d = advance(&cfg, &mut state, DT, &intent, sensed, velocity);

                    // Jump budget bound; refills only on the landing edge,
                    // otherwise moves by at most one jump
                    prop_assert!(state.jumps_remaining <= cfg.max_jumps);
                    if landing {
                        prop_assert!(
                            state.jumps_remaining == cfg.max_jumps
                                || state.jumps_remaining + 1 == cfg.max_jumps
                        );
                    } else {
                        prop_assert!(
                            state.jumps_remaining == jumps_before
                                || state.jumps_remaining + 1 == jumps_before
                        );
                    }

                    // Wall-slide clamp
                    if state.mode == Mode::WallSliding {
                        prop_assert!(d.velocity.y >= cfg.wall_slide_speed);
                    }
                    // Glide clamp and gravity override
                    if state.mode == Mode::Gliding {
                        prop_assert!(d.velocity.y >= cfg.max_fall_speed);
                        prop_assert_eq!(d.gravity_scale, cfg.glide_gravity_scale);
                    }
                    // Gravity frozen only while a dash tick ran
                    if d.gravity_scale == 0 {
                        prop_assert!(was_dashing || intent.dash);
                    }
                    // No jump impulse and no steering during a dash
                    if was_dashing {
                        prop_assert!(d.impulse.is_none());
                        prop_assert_eq!(state.facing_sign, facing_before);
                    }

                    // Feed back: directive velocity plus impulse plus gravity
                    velocity = d.velocity;
                    if let Some(impulse) = d.impulse {
                        velocity = velocity + impulse;
                    }
                    velocity.y = velocity
                        .y
                        .wrapping_add(fixed_mul(fixed_mul(gravity_accel, d.gravity_scale), DT));
                }
            }

            /// A dash of any positive duration retires in exactly
            /// ceil(D/dt) ticks under arbitrary sensor noise.
            #[test]
            fn dash_always_terminates(
                duration_eighths in 1i32..=40,
                ground_noise in prop::collection::vec(any::<bool>(), 64),
            ) {
                let cfg = CharacterConfig {
                    dash_duration: duration_eighths * (FIXED_ONE / 8),
                    ..config()
                };
                let mut state = RuntimeState::new(&cfg, true);
                let dash = TickIntent { dash: true, ..Default::default() };
                let idle = TickIntent::default();

                // dt = 1/8s, duration = n/8s => exactly n dashing ticks
                let expected_ticks = duration_eighths as usize;

                let mut ticks = 0;
                for (i, grounded) in ground_noise.iter().enumerate() {
                    let sensed = SensorReading { grounded: *grounded, wall: false };
                    let intent = if i == 0 { &dash } else { &idle };
                    advance(&cfg, &mut state, DT, intent, sensed, FixedVec2::ZERO);
                    ticks += 1;
                    if state.mode != Mode::Dashing {
                        break;
                    }
                }

                prop_assert_eq!(ticks, expected_ticks);
            }
        }
    }
}
