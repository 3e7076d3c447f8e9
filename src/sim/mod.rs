//! Character Simulation Module
//!
//! All control logic. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `config`: Character tuning, validation, JSON loading
//! - `intent`: Intent capture, normalization, tick latching
//! - `sensor`: Ground/wall contact probes over a physics query trait
//! - `machine`: The ability state machine (modes, runtime state, advance)
//! - `integrator`: Directive application onto the rigid body
//! - `body`: Rigid body trait and headless reference body
//! - `world`: Reference physics world for headless runs
//! - `events`: Controller events for diagnostics and replay
//! - `controller`: Per-character orchestration of the tick pipeline

pub mod body;
pub mod config;
pub mod controller;
pub mod events;
pub mod integrator;
pub mod intent;
pub mod machine;
pub mod sensor;
pub mod world;

// Re-export key types
pub use body::{KinematicBody, RigidBody};
pub use config::{CharacterConfig, ConfigError};
pub use controller::{CharacterController, StepResult};
pub use events::ControllerEvent;
pub use intent::{IntentFrame, IntentLatch, TickIntent};
pub use machine::{advance, Directive, Mode, RuntimeState};
pub use sensor::{ContactSensor, LayerMask, PhysicsWorld, SensorReading};
pub use world::StaticWorld;
