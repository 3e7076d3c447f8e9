//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform
//! determinism. They form the foundation the simulation is built on.

pub mod fixed;
pub mod vec2;

// Re-export core types
pub use fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE, TICK_DT};
pub use vec2::FixedVec2;
