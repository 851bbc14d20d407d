// Discrete AABB collision detection
//
// The whole physics model is per-tick and positional: boxes are tested for
// overlap after integration, classified by the side they hit, and corrected
// in place by the owning controller. No impulses, no rotation, no sweeping.

mod aabb;
mod collision;

pub use aabb::Aabb;
pub use collision::{collision_sides, Side, SideMask};
