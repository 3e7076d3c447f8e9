//! Rigid Body Abstraction
//!
//! The state machine never touches an engine body directly; it goes
//! through this narrow read/write surface. `KinematicBody` is a headless
//! reference implementation with explicit gravity integration, used by
//! tests and the demo binary.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{fixed_mul, to_fixed, Fixed, FIXED_ONE};
use crate::core::vec2::FixedVec2;

/// Read/write surface of a 2D rigid body.
pub trait RigidBody {
    /// Current pivot position.
    fn position(&self) -> FixedVec2;

    /// Current velocity.
    fn velocity(&self) -> FixedVec2;

    /// Overwrite the velocity.
    fn set_velocity(&mut self, velocity: FixedVec2);

    /// Current gravity multiplier.
    fn gravity_scale(&self) -> Fixed;

    /// Overwrite the gravity multiplier.
    fn set_gravity_scale(&mut self, scale: Fixed);

    /// Apply an instantaneous impulse (unit mass: adds to velocity).
    fn apply_impulse(&mut self, impulse: FixedVec2);
}

/// World gravity acceleration (units/sec^2, negative = downward).
pub const GRAVITY: Fixed = to_fixed(-20.0);

/// Headless rigid body with semi-implicit Euler integration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Pivot position
    pub position: FixedVec2,
    /// Velocity
    pub velocity: FixedVec2,
    /// Gravity multiplier
    pub gravity_scale: Fixed,
}

impl KinematicBody {
    /// Create a body at rest at the given position.
    pub fn new(position: FixedVec2) -> Self {
        Self {
            position,
            velocity: FixedVec2::ZERO,
            gravity_scale: FIXED_ONE,
        }
    }

    /// Integrate one fixed step: gravity into velocity, velocity into
    /// position. Runs after the controller has written its directive,
    /// standing in for the engine's solver.
    pub fn integrate(&mut self, dt: Fixed) {
        let g = fixed_mul(GRAVITY, self.gravity_scale);
        self.velocity.y = self.velocity.y.wrapping_add(fixed_mul(g, dt));
        self.position = self.position + self.velocity.scale(dt);
    }
}

impl RigidBody for KinematicBody {
    fn position(&self) -> FixedVec2 {
        self.position
    }

    fn velocity(&self) -> FixedVec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: FixedVec2) {
        self.velocity = velocity;
    }

    fn gravity_scale(&self) -> Fixed {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: Fixed) {
        self.gravity_scale = scale;
    }

    fn apply_impulse(&mut self, impulse: FixedVec2) {
        self.velocity = self.velocity + impulse;
    }
}
