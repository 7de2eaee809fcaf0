//! Pointer picking via CPU ray casting.
//!
//! A pointer position is mapped to normalized device coordinates, unprojected
//! through the inverse view-projection into a world-space ray leaving the
//! eye, and tested against each candidate. Hits are ordered nearest first.

use std::fmt;

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::math::Ray;
use crate::scene::Pickable;

/// One ray hit against a pick candidate.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// World-space hit point.
    pub point: Vec3,
    /// Distance from the eye along the ray.
    pub distance: f32,
    /// Unit surface normal, facing the eye.
    pub normal: Vec3,
    /// The candidate that was hit.
    pub object: &'a dyn Pickable,
    /// Position of `object` in the candidate list.
    pub index: usize,
}

impl fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("point", &self.point)
            .field("distance", &self.distance)
            .field("normal", &self.normal)
            .field("object", &self.object.name())
            .field("index", &self.index)
            .finish()
    }
}

/// Map a pixel position to normalized device coordinates.
///
/// The viewport's top-left pixel maps to `(-1, 1)`, its center to `(0, 0)`.
/// Zero viewport dimensions are treated as 1.
#[must_use]
pub fn normalized_device_coords(
    x: f32,
    y: f32,
    width: u32,
    height: u32,
) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new(x / w * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
}

/// World-space ray from the camera eye through `ndc`.
#[must_use]
pub fn ray_from_ndc(ndc: Vec2, camera: &Camera) -> Ray {
    let through = camera
        .view_projection()
        .inverse()
        .project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
    Ray::new(camera.eye, through - camera.eye)
}

/// World-space ray through pixel `(x, y)` of a `width` x `height` viewport.
#[must_use]
pub fn ray_from_pointer(
    x: f32,
    y: f32,
    width: u32,
    height: u32,
    camera: &Camera,
) -> Ray {
    ray_from_ndc(normalized_device_coords(x, y, width, height), camera)
}

/// Every hit of `ray` against `candidates`, nearest first.
///
/// Equal distances are ordered by candidate index, so the result does not
/// depend on the sort's stability.
#[must_use]
pub fn pick_all<'a>(
    ray: &Ray,
    candidates: &[&'a dyn Pickable],
) -> Vec<Intersection<'a>> {
    let mut hits: Vec<Intersection<'a>> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, &object)| {
            let hit = object.intersect(ray)?;
            (hit.distance > 0.0).then_some(Intersection {
                point: hit.point,
                distance: hit.distance,
                normal: hit.normal,
                object,
                index,
            })
        })
        .collect();
    hits.sort_unstable_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.index.cmp(&b.index))
    });
    hits
}

/// Nearest hit under pixel `(x, y)`, or `None` if the ray misses every
/// candidate.
#[must_use]
pub fn pick<'a>(
    x: f32,
    y: f32,
    width: u32,
    height: u32,
    camera: &Camera,
    candidates: &[&'a dyn Pickable],
) -> Option<Intersection<'a>> {
    let ray = ray_from_pointer(x, y, width, height, camera);
    let nearest = pick_all(&ray, candidates).into_iter().next();
    if let Some(hit) = &nearest {
        log::trace!(
            "pick ({x}, {y}) hit {:?} at {:.3}",
            hit.object.name(),
            hit.distance
        );
    }
    nearest
}
