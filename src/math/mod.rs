//! Geometry math: bounding volumes, rays and field-of-view trigonometry.
//!
//! Everything here is a pure function of its inputs.

/// Axis-aligned bounding volumes.
pub mod bounds;
/// Rays and ray/primitive intersection kernels.
pub mod ray;

pub use bounds::Aabb;
pub use ray::{intersect_aabb, intersect_triangle, Ray, TriangleHit};

/// Convert a field of view in degrees to radians.
#[inline]
#[must_use]
pub fn vertical_fov_radians(fov_degrees: f32) -> f32 {
    fov_degrees.to_radians()
}

/// Horizontal field of view (radians) for a vertical field of view (radians)
/// at the given aspect ratio.
#[inline]
#[must_use]
pub fn horizontal_fov_radians(vertical_fov: f32, aspect: f32) -> f32 {
    2.0 * ((vertical_fov * 0.5).tan() * aspect).atan()
}
