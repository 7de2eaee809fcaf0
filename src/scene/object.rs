use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use super::{Geometry, Pickable, RayHit};
use crate::math::{intersect_aabb, intersect_triangle, Aabb, Ray};

/// Node in a small transform hierarchy.
///
/// A node may carry geometry, children, or both. Transforms compose
/// parent-first, so a child's world transform is `parent * child`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    name: String,
    transform: Mat4,
    geometry: Option<Geometry>,
    children: Vec<SceneObject>,
}

impl SceneObject {
    /// Node without geometry, used to group children.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            geometry: None,
            children: Vec::new(),
        }
    }

    /// Node rendering `geometry`.
    #[must_use]
    pub fn mesh(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::group(name)
        }
    }

    /// Replace the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Pre-multiply a translation onto the local transform.
    #[must_use]
    pub fn with_translation(mut self, offset: Vec3) -> Self {
        self.transform = Mat4::from_translation(offset) * self.transform;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child in place.
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Local transform relative to the parent.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Own geometry, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Depth-first walk over every node carrying geometry, with its world
    /// transform.
    fn for_each_mesh(
        &self,
        parent: &Mat4,
        visit: &mut impl FnMut(&Geometry, &Mat4),
    ) {
        let world = *parent * self.transform;
        if let Some(geometry) = &self.geometry {
            visit(geometry, &world);
        }
        for child in &self.children {
            child.for_each_mesh(&world, visit);
        }
    }
}

impl Pickable for SceneObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        self.for_each_mesh(&Mat4::IDENTITY, &mut |geometry, world| {
            // Per-vertex transform keeps rotated meshes tight
            for &p in geometry.positions() {
                bounds.expand_to_include(world.transform_point3(p));
            }
        });
        bounds
    }

    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        self.for_each_mesh(&Mat4::IDENTITY, &mut |geometry, world| {
            let world_bounds = geometry.local_bounds().transformed(world);
            let Some(entry) = intersect_aabb(ray, &world_bounds) else {
                return;
            };
            if nearest.is_some_and(|n| n.distance < entry) {
                return;
            }
            for [a, b, c] in geometry.triangles() {
                let hit = intersect_triangle(
                    ray,
                    world.transform_point3(a),
                    world.transform_point3(b),
                    world.transform_point3(c),
                );
                let Some(hit) = hit else { continue };
                let closer = match nearest {
                    Some(n) => hit.t < n.distance,
                    None => true,
                };
                if closer {
                    nearest = Some(RayHit {
                        distance: hit.t,
                        point: ray.at(hit.t),
                        normal: hit.normal,
                    });
                }
            }
        });
        nearest
    }
}

/// Square floor of `size` x `size` lying in the XZ plane at height `y`,
/// facing +Y. This is the default pick target when a pick names no
/// candidates.
#[must_use]
pub fn ground_plane(size: f32, y: f32) -> SceneObject {
    SceneObject::mesh("Floor", Geometry::plane(size, size))
        .with_transform(Mat4::from_rotation_x(-FRAC_PI_2))
        .with_translation(Vec3::new(0.0, y, 0.0))
}
