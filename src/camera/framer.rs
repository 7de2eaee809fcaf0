//! Fit a bounding volume into a perspective camera's view.
//!
//! The camera is placed on the world Z axis in front of the volume, raised
//! by a fixed vertical offset, and aimed at the volume's center. This is an
//! on-axis placement, not a general look-at solve: volumes far off the Z
//! axis are seen at an angle.

use glam::Vec3;

use super::core::Camera;
use super::frustum::{Frustum, FrustumSide};
use crate::error::ViewportError;
use crate::math::Aabb;
use crate::scene::Pickable;

/// Default slack factor applied to the tight framing distance.
pub const DEFAULT_MARGIN: f32 = 1.1;

/// Default height of the eye above the volume's center.
pub const DEFAULT_VERTICAL_OFFSET: f32 = 2.0;

/// Growth factor per back-off step when a corner falls outside the view.
const BACKOFF_FACTOR: f32 = 1.1;
const MAX_BACKOFF_STEPS: usize = 64;

/// Camera placement produced by a successful framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// New eye position.
    pub eye: Vec3,
    /// New look-at target (the volume's center).
    pub target: Vec3,
    /// Distance from the volume's +Z face to the eye, along Z.
    pub distance: f32,
    /// The framed volume.
    pub bounds: Aabb,
}

impl Framing {
    /// Move `camera` to this placement.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.eye = self.eye;
        camera.target = self.target;
        camera.up = Vec3::Y;
    }
}

/// Tight framing distance for a volume: half its largest extent over the
/// tangent of half the vertical field of view, scaled by `margin`.
#[must_use]
pub fn fit_distance(bounds: &Aabb, fovy_radians: f32, margin: f32) -> f32 {
    let max_dim = bounds.max_dimension();
    (max_dim * 0.5 / (fovy_radians * 0.5).tan()).abs() * margin
}

/// Frame the bounding volume of `object`.
///
/// # Errors
///
/// As for [`frame_bounds`].
pub fn frame_object(
    camera: &Camera,
    object: &dyn Pickable,
    margin: f32,
    vertical_offset: f32,
) -> Result<Framing, ViewportError> {
    frame_bounds(camera, &object.bounds(), margin, vertical_offset)
}

/// Compute a placement that keeps all of `bounds` in view.
///
/// The camera itself is not modified; call [`Framing::apply_to`].
///
/// # Errors
///
/// [`ViewportError::InvalidTarget`] for an empty or non-finite volume, and
/// [`ViewportError::ExceedsClipRange`] when the nearest placement that fits
/// the side planes pushes the back of the volume past the far plane.
pub fn frame_bounds(
    camera: &Camera,
    bounds: &Aabb,
    margin: f32,
    vertical_offset: f32,
) -> Result<Framing, ViewportError> {
    if bounds.is_empty() || !bounds.min.is_finite() || !bounds.max.is_finite()
    {
        return Err(ViewportError::InvalidTarget);
    }

    let margin = if margin.is_finite() && margin >= 1.0 {
        margin
    } else {
        log::warn!("framing margin {margin} clamped to 1.0");
        1.0
    };

    let center = bounds.center();
    let front = center.z + bounds.size().z * 0.5;
    let eye_y = center.y + vertical_offset;
    let tolerance = 1e-4 * bounds.max_dimension().max(1.0);

    // A zero-size volume still needs the eye beyond the near plane
    let mut distance = fit_distance(bounds, camera.fovy_radians(), margin)
        .max(camera.znear() * 2.0);
    let mut eye = Vec3::new(0.0, eye_y, front + distance);

    for step in 0..=MAX_BACKOFF_STEPS {
        eye = Vec3::new(0.0, eye_y, front + distance);
        let frustum = frustum_from(camera, eye, center);
        if !within_sides(&frustum, bounds, tolerance) {
            distance *= BACKOFF_FACTOR;
            continue;
        }
        // Backing off further only pushes the volume deeper
        if !within_far(&frustum, bounds, tolerance) {
            break;
        }
        if step > 0 {
            log::debug!("framing backed off {step} step(s) to {distance}");
        }
        return Ok(Framing {
            eye,
            target: center,
            distance,
            bounds: *bounds,
        });
    }

    let depth = farthest_depth(eye, center, bounds);
    log::warn!(
        "volume needs depth {depth:.1} but the far plane is at {}",
        camera.zfar()
    );
    Err(ViewportError::ExceedsClipRange {
        depth,
        zfar: camera.zfar(),
    })
}

/// Frustum of `camera`'s projection seen from `eye` looking at `target`.
fn frustum_from(camera: &Camera, eye: Vec3, target: Vec3) -> Frustum {
    let mut placed = *camera;
    placed.eye = eye;
    placed.target = target;
    placed.up = Vec3::Y;
    placed.frustum()
}

fn within_sides(frustum: &Frustum, bounds: &Aabb, tolerance: f32) -> bool {
    const SIDES: [FrustumSide; 5] = [
        FrustumSide::Left,
        FrustumSide::Right,
        FrustumSide::Bottom,
        FrustumSide::Top,
        FrustumSide::Near,
    ];
    bounds.corners().iter().all(|&c| {
        SIDES
            .iter()
            .all(|&side| frustum.plane(side).distance_to_point(c) >= -tolerance)
    })
}

fn within_far(frustum: &Frustum, bounds: &Aabb, tolerance: f32) -> bool {
    let far = frustum.plane(FrustumSide::Far);
    bounds
        .corners()
        .iter()
        .all(|&c| far.distance_to_point(c) >= -tolerance)
}

/// View depth of the corner farthest from `eye` along the view direction.
fn farthest_depth(eye: Vec3, target: Vec3, bounds: &Aabb) -> f32 {
    let forward = (target - eye).normalize_or_zero();
    bounds
        .corners()
        .iter()
        .map(|&c| (c - eye).dot(forward))
        .fold(f32::NEG_INFINITY, f32::max)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn camera(aspect: f32) -> Camera {
        Camera::new(
            75.0,
            aspect,
            0.1,
            1000.0,
            Vec3::new(0.0, 0.0, 150.0),
            Vec3::ZERO,
        )
    }

    fn cube(half: f32) -> Aabb {
        Aabb::new(Vec3::splat(-half), Vec3::splat(half))
    }

    #[test]
    fn reference_cube_distance() {
        let offset = DEFAULT_VERTICAL_OFFSET;
        let framing =
            frame_bounds(&camera(1.0), &cube(10.0), 1.1, offset).unwrap();
        let expected = 10.0 / 37.5_f32.to_radians().tan() * 1.1;
        assert_relative_eq!(framing.distance, expected, epsilon = 1e-4);
        assert_relative_eq!(framing.distance, 14.36, epsilon = 0.05);
        assert_eq!(framing.target, Vec3::ZERO);
        assert_eq!(framing.eye.x, 0.0);
        assert_relative_eq!(framing.eye.y, 2.0);
        assert_relative_eq!(framing.eye.z, 10.0 + expected, epsilon = 1e-4);
    }

    #[test]
    fn empty_volume_is_rejected() {
        let err = frame_bounds(&camera(1.0), &Aabb::EMPTY, 1.1, 2.0);
        assert!(matches!(err, Err(ViewportError::InvalidTarget)));
    }

    #[test]
    fn margin_below_one_is_clamped() {
        let tight = frame_bounds(&camera(1.0), &cube(5.0), 1.0, 0.0).unwrap();
        let clamped = frame_bounds(&camera(1.0), &cube(5.0), 0.2, 0.0).unwrap();
        assert_eq!(tight, clamped);
    }

    #[test]
    fn narrow_viewport_backs_off_until_contained() {
        let cam = camera(0.3);
        let bounds = cube(10.0);
        let framing = frame_bounds(&cam, &bounds, 1.0, 2.0).unwrap();
        let fitted = fit_distance(&bounds, cam.fovy_radians(), 1.0);
        assert!(framing.distance > fitted);

        let mut framed = cam;
        framing.apply_to(&mut framed);
        assert!(framed.frustum().contains_aabb(&bounds, 1e-2));
    }

    #[test]
    fn framed_volume_respects_far_plane() {
        let cam = camera(1.0);
        let bounds = cube(200.0);
        let framing = frame_bounds(&cam, &bounds, 1.1, 2.0).unwrap();

        let mut framed = cam;
        framing.apply_to(&mut framed);
        assert!(framed.frustum().contains_aabb(&bounds, 1e-2));
    }

    #[test]
    fn volume_deeper_than_far_plane_is_rejected() {
        let cam = camera(1.0);
        let err = frame_bounds(&cam, &cube(350.0), 1.1, 2.0).unwrap_err();
        match err {
            ViewportError::ExceedsClipRange { depth, zfar } => {
                assert_eq!(zfar, 1000.0);
                assert!(depth > zfar);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn point_volume_keeps_eye_off_target() {
        let point = Aabb::from_points([Vec3::new(1.0, 2.0, 3.0)]);
        let framing = frame_bounds(&camera(1.0), &point, 1.1, 0.0).unwrap();
        assert!(framing.eye.distance(framing.target) > 0.1);
    }
}
