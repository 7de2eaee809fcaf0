//! Pickable scene objects.
//!
//! The controller never walks a full scene graph. It only needs candidates
//! that can report a world-space bounding volume and answer a ray query,
//! which is what [`Pickable`] captures. [`SceneObject`] is a small
//! transform hierarchy of triangle meshes that implements it; hosts with
//! their own scene representation implement [`Pickable`] directly.

mod geometry;
mod object;

use glam::Vec3;

pub use geometry::Geometry;
pub use object::{ground_plane, SceneObject};

use crate::math::{Aabb, Ray};

/// Nearest surface hit on a single pickable object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Unit surface normal at the hit, facing the ray origin.
    pub normal: Vec3,
}

/// Capability set of anything the viewport can frame or pick.
pub trait Pickable {
    /// Display name, used in logs and debug output.
    fn name(&self) -> &str;

    /// World-space bounding volume of every renderable part.
    ///
    /// Returns [`Aabb::EMPTY`] when the object has no geometry.
    fn bounds(&self) -> Aabb;

    /// Nearest intersection of `ray` with this object, if any.
    fn intersect(&self, ray: &Ray) -> Option<RayHit>;
}

/// Bounding volume of `object` (its geometry and all of its sub-parts).
#[must_use]
pub fn compute_bounding_volume(object: &dyn Pickable) -> Aabb {
    object.bounds()
}
