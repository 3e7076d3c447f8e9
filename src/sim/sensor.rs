//! Ground and Wall Contact Sensing
//!
//! Stateless circular overlap probes at fixed offsets from the character
//! pivot. The physics world is consumed through a narrow query trait so the
//! sensor can run headlessly.

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;
use crate::core::vec2::FixedVec2;
use crate::sim::config::CharacterConfig;

/// Physics layer bitmask.
pub type LayerMask = u32;

/// Narrow query interface onto the physics world.
pub trait PhysicsWorld {
    /// True if any solid on the masked layers overlaps the given circle.
    fn overlap_circle(&self, center: FixedVec2, radius: Fixed, mask: LayerMask) -> bool;
}

/// Result of one tick's contact probes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Ground probe overlapped solid geometry
    pub grounded: bool,
    /// Either wall probe overlapped solid geometry
    pub wall: bool,
}

/// Contact sensor for one character.
///
/// Pure transformation of world state; holds only probe geometry.
#[derive(Clone, Debug)]
pub struct ContactSensor {
    ground_offset: FixedVec2,
    ground_radius: Fixed,
    wall_offset: FixedVec2,
    wall_radius: Fixed,
    mask: LayerMask,
}

impl ContactSensor {
    /// Build a sensor from character config.
    pub fn from_config(config: &CharacterConfig) -> Self {
        Self {
            ground_offset: config.ground_check_offset,
            ground_radius: config.ground_check_radius,
            wall_offset: config.wall_check_offset,
            wall_radius: config.wall_check_radius,
            mask: config.solid_mask,
        }
    }

    /// Probe for ground contact below the pivot.
    ///
    /// A missing pivot reads as "not grounded": a misconfigured character
    /// falls rather than soft-locking or gaining free jumps.
    pub fn probe_ground<W: PhysicsWorld>(&self, world: &W, pivot: Option<FixedVec2>) -> bool {
        match pivot {
            Some(pivot) => {
                world.overlap_circle(pivot + self.ground_offset, self.ground_radius, self.mask)
            }
            None => false,
        }
    }

    /// Probe for wall contact on either side of the pivot.
    ///
    /// Two mirrored probes make detection direction-agnostic.
    pub fn probe_wall<W: PhysicsWorld>(&self, world: &W, pivot: Option<FixedVec2>) -> bool {
        match pivot {
            Some(pivot) => {
                world.overlap_circle(pivot + self.wall_offset, self.wall_radius, self.mask)
                    || world.overlap_circle(pivot - self.wall_offset, self.wall_radius, self.mask)
            }
            None => false,
        }
    }

    /// Run both probes for this tick.
    pub fn sense<W: PhysicsWorld>(&self, world: &W, pivot: Option<FixedVec2>) -> SensorReading {
        SensorReading {
            grounded: self.probe_ground(world, pivot),
            wall: self.probe_wall(world, pivot),
        }
    }

    /// World-space position of the ground probe, for diagnostic rendering.
    pub fn ground_anchor(&self, pivot: FixedVec2) -> FixedVec2 {
        pivot + self.ground_offset
    }
}
