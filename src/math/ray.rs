use glam::Vec3;

use super::bounds::Aabb;

/// Half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction (zero only if constructed from a zero vector).
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Slab test against an axis-aligned box.
///
/// Returns the entry distance, `0.0` when the origin is already inside, or
/// `None` on a miss (including boxes entirely behind the origin).
#[must_use]
pub fn intersect_aabb(ray: &Ray, bounds: &Aabb) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    if bounds.is_empty() {
        return None;
    }

    // Near-zero components clamp to a huge inverse instead of dividing by 0
    let inv = |d: f32| {
        if d.abs() < EPSILON {
            1.0 / EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    let dir = ray.direction;
    let inv_dir = Vec3::new(inv(dir.x), inv(dir.y), inv(dir.z));

    let t0 = (bounds.min - ray.origin) * inv_dir;
    let t1 = (bounds.max - ray.origin) * inv_dir;

    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Result of a ray/triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Distance along the ray.
    pub t: f32,
    /// Barycentric weight of the second vertex.
    pub u: f32,
    /// Barycentric weight of the third vertex.
    pub v: f32,
    /// Unit face normal, flipped to face the ray origin.
    pub normal: Vec3,
}

/// Möller–Trumbore ray/triangle intersection, double-sided.
///
/// Only hits strictly in front of the origin are reported.
#[must_use]
pub fn intersect_triangle(
    ray: &Ray,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);

    // Ray parallel to the triangle plane
    if det.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / det;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t <= EPSILON {
        return None;
    }

    let mut normal = edge1.cross(edge2).normalize_or_zero();
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }

    Some(TriangleHit { t, u, v, normal })
}
