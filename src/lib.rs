//! # Strider Control
//!
//! Deterministic, fixed-timestep 2D character ability state machine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     STRIDER CONTROL                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/               - Deterministic primitives              │
//! │  ├── fixed.rs        - Q16.16 fixed-point arithmetic         │
//! │  └── vec2.rs         - 2D vector with fixed-point            │
//! │                                                              │
//! │  sim/                - Control logic (deterministic)         │
//! │  ├── config.rs       - Character tuning and validation       │
//! │  ├── intent.rs       - Intent capture and tick latching      │
//! │  ├── sensor.rs       - Ground/wall contact probes            │
//! │  ├── machine.rs      - Ability state machine                 │
//! │  ├── integrator.rs   - Directive application                 │
//! │  ├── body.rs         - Rigid body abstraction                │
//! │  ├── world.rs        - Reference physics world               │
//! │  ├── events.rs       - Controller events                     │
//! │  └── controller.rs   - Per-character tick pipeline           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tick Pipeline
//!
//! Data flows one way per fixed tick:
//! sensor -> state machine -> velocity integrator. The state machine is
//! the only stateful element; sensing and integration are stateless
//! transformations. Engine specifics (physics queries, rigid body writes)
//! sit behind the [`sim::PhysicsWorld`] and [`sim::RigidBody`] traits, so
//! the whole pipeline runs headlessly.
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `sim/` modules are **100% deterministic**:
//! - No floating-point arithmetic in control logic
//! - No system time dependencies; time is a fixed Q16.16 `dt` per tick
//! - Single-threaded per character, ticks strictly ordered
//!
//! Given identical intent and sensor streams, the controller produces
//! **identical velocities** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod sim;

// Re-export commonly used types
pub use crate::core::fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE, TICK_DT};
pub use crate::core::vec2::FixedVec2;
pub use crate::sim::{
    CharacterConfig, CharacterController, Directive, IntentFrame, Mode, RuntimeState,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
