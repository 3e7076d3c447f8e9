//! Reference Physics World
//!
//! A minimal collection of layered axis-aligned solids with deterministic
//! circle overlap queries. Stands in for an engine physics scene in
//! headless tests and the demo binary.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{fixed_clamp, fixed_mul, Fixed};
use crate::core::vec2::FixedVec2;
use crate::sim::sensor::{LayerMask, PhysicsWorld};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lower-left corner
    pub min: FixedVec2,
    /// Upper-right corner
    pub max: FixedVec2,
}

impl Aabb {
    /// Create a new box from corners.
    pub const fn new(min: FixedVec2, max: FixedVec2) -> Self {
        Self { min, max }
    }

    /// Closest point inside the box to the given point.
    #[inline]
    pub fn closest_point(&self, point: FixedVec2) -> FixedVec2 {
        FixedVec2::new(
            fixed_clamp(point.x, self.min.x, self.max.x),
            fixed_clamp(point.y, self.min.y, self.max.y),
        )
    }
}

/// Check if a circle overlaps a box.
#[inline]
pub fn circle_aabb_overlap(center: FixedVec2, radius: Fixed, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    let radius_sq = fixed_mul(radius, radius);
    center.distance_squared(closest) <= radius_sq
}

/// Static scene of layered solids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    solids: Vec<(Aabb, LayerMask)>,
}

impl StaticWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self { solids: Vec::new() }
    }

    /// Add a solid box on the given layers.
    pub fn add_solid(&mut self, aabb: Aabb, layers: LayerMask) {
        self.solids.push((aabb, layers));
    }

    /// Number of solids in the scene.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }
}

impl PhysicsWorld for StaticWorld {
    fn overlap_circle(&self, center: FixedVec2, radius: Fixed, mask: LayerMask) -> bool {
        self.solids
            .iter()
            .filter(|(_, layers)| layers & mask != 0)
            .any(|(aabb, _)| circle_aabb_overlap(center, radius, aabb))
    }
}
