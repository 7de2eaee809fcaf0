use glam::{Mat4, Vec3};

/// Axis-aligned bounding box.
///
/// The empty box is represented with inverted infinite corners so that
/// expanding it by any point yields exactly that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// A box enclosing nothing.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from two corners (component-wise ordered).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing every point; empty for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut acc, p| {
            acc.expand_to_include(p);
            acc
        })
    }

    /// True if the box encloses no point at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
            || self.min.y > self.max.y
            || self.min.z > self.max.z
    }

    /// Grow the box to contain `point`.
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box enclosing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Midpoint. Zero for an empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis. Zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// Largest of the three extents.
    #[must_use]
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// The eight corners, min corner first.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Box enclosing this box after an affine transform.
    #[must_use]
    pub fn transformed(&self, transform: &Mat4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self::from_points(
            self.corners().into_iter().map(|c| transform.transform_point3(c)),
        )
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_box_has_no_extent() {
        let empty = Aabb::EMPTY;
        assert!(empty.is_empty());
        assert_eq!(empty.size(), Vec3::ZERO);
        assert_eq!(empty.center(), Vec3::ZERO);
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn single_point_is_a_degenerate_box() {
        let b = Aabb::from_points([Vec3::new(1.0, 2.0, 3.0)]);
        assert!(!b.is_empty());
        assert_eq!(b.size(), Vec3::ZERO);
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn center_and_size() {
        let b = Aabb::new(Vec3::new(2.0, 4.0, 6.0), Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(b.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(b.center(), Vec3::new(0.0, 2.0, 3.0));
        assert_eq!(b.size(), Vec3::new(4.0, 4.0, 6.0));
        assert_eq!(b.max_dimension(), 6.0);
    }

    #[test]
    fn union_with_empty_is_identity() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(b.union(&Aabb::EMPTY), b);
        assert_eq!(Aabb::EMPTY.union(&b), b);
    }

    #[test]
    fn union_of_disjoint_boxes() {
        let a = Aabb::new(Vec3::splat(-3.0), Vec3::splat(-1.0));
        let b = Aabb::new(Vec3::ONE, Vec3::splat(3.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-3.0));
        assert_eq!(u.max, Vec3::splat(3.0));
    }

    #[test]
    fn rotated_box_is_re_enclosed() {
        // 2 x 4 x 0 slab rotated a quarter turn about X becomes 2 x 0 x 4
        let slab =
            Aabb::new(Vec3::new(-1.0, -2.0, 0.0), Vec3::new(1.0, 2.0, 0.0));
        let rotated = slab.transformed(&Mat4::from_rotation_x(-FRAC_PI_2));
        let size = rotated.size();
        assert_relative_eq!(size.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(size.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(size.z, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn corners_are_all_contained() {
        let b = Aabb::new(Vec3::splat(-10.0), Vec3::splat(10.0));
        assert!(b.corners().iter().all(|&c| b.contains_point(c)));
        assert!(!b.contains_point(Vec3::new(0.0, 10.5, 0.0)));
    }
}
