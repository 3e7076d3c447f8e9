//! Velocity Integrator
//!
//! A single idempotent write of the state machine's directive onto the
//! rigid body abstraction. No iteration and no physics solving; the
//! engine's solver runs afterwards. This is the only place controller
//! decisions touch a body, which keeps the state machine headless.

use crate::sim::body::RigidBody;
use crate::sim::machine::Directive;

/// Apply one tick's directive to a rigid body.
pub fn apply<B: RigidBody>(body: &mut B, directive: &Directive) {
    body.set_velocity(directive.velocity);
    body.set_gravity_scale(directive.gravity_scale);
    if let Some(impulse) = directive.impulse {
        body.apply_impulse(impulse);
    }
}
