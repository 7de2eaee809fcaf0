//! View frustum containment tests.
//!
//! Extracts frustum planes from a view-projection matrix and tests points
//! and boxes against them. Used to verify camera framing.

use glam::{Mat4, Vec3, Vec4};

use crate::math::Aabb;

/// Plane `normal · p + distance = 0` with a unit normal pointing into the
/// positive half-space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed offset from the origin.
    pub distance: f32,
}

impl Plane {
    /// Normalize plane coefficients `(a, b, c, d)`.
    #[must_use]
    pub fn from_coefficients(v: Vec4) -> Self {
        let len = v.truncate().length();
        if len > 0.0 {
            Self {
                normal: v.truncate() / len,
                distance: v.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from point to plane (positive = inside).
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Identifies one of the six frustum planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumSide {
    /// Left clip plane.
    Left = 0,
    /// Right clip plane.
    Right = 1,
    /// Bottom clip plane.
    Bottom = 2,
    /// Top clip plane.
    Top = 3,
    /// Near clip plane.
    Near = 4,
    /// Far clip plane.
    Far = 5,
}

/// View frustum consisting of 6 inward-facing planes.
#[derive(Debug, Clone)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Extract planes from a view-projection matrix (Gribb/Hartmann), for a
    /// right-handed projection with [0,1] depth.
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let (r0, r1, r2, r3) = (vp.row(0), vp.row(1), vp.row(2), vp.row(3));
        Self {
            planes: [
                Plane::from_coefficients(r3 + r0),
                Plane::from_coefficients(r3 - r0),
                Plane::from_coefficients(r3 + r1),
                Plane::from_coefficients(r3 - r1),
                // [0,1] depth: near plane is just row 2
                Plane::from_coefficients(r2),
                Plane::from_coefficients(r3 - r2),
            ],
        }
    }

    /// The requested plane.
    #[must_use]
    pub fn plane(&self, side: FrustumSide) -> Plane {
        self.planes[side as usize]
    }

    /// Whether `point` is inside all six planes, allowing `tolerance` of
    /// slack in world units.
    #[must_use]
    pub fn contains_point(&self, point: Vec3, tolerance: f32) -> bool {
        self.planes
            .iter()
            .all(|p| p.distance_to_point(point) >= -tolerance)
    }

    /// Whether all eight corners of `bounds` are inside.
    #[must_use]
    pub fn contains_aabb(&self, bounds: &Aabb, tolerance: f32) -> bool {
        !bounds.is_empty()
            && bounds
                .corners()
                .iter()
                .all(|&c| self.contains_point(c, tolerance))
    }

    /// Test if a sphere intersects or is inside the frustum.
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|p| p.distance_to_point(center) >= -radius)
    }
}
