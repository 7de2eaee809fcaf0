//! Orbit navigation: the camera circles a target at a controllable
//! distance.
//!
//! The controller only orchestrates navigation through the [`Navigation`]
//! trait. [`OrbitNavigation`] is the stock implementation: primary drag
//! rotates, secondary drag pans, middle drag and the wheel dolly.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::core::Camera;
use crate::input::{PointerButton, PointerEvent, PointerEventKind};
use crate::options::NavigationOptions;

/// Pending motion below this magnitude is dropped.
const SETTLE_EPSILON: f32 = 1e-6;

/// Spherical camera placement around a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavigationState {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Eye-to-target distance.
    pub distance: f32,
    /// Rotation about +Y in radians; 0 places the eye on +Z of the target.
    pub azimuth: f32,
    /// Angle above the horizontal plane through the target, in radians.
    pub elevation: f32,
}

impl NavigationState {
    /// Derive the spherical state of an eye looking at `target`.
    #[must_use]
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Self {
                target,
                distance: 0.0,
                azimuth: 0.0,
                elevation: 0.0,
            };
        }
        Self {
            target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            elevation: (offset.y / distance).clamp(-1.0, 1.0).asin(),
        }
    }

    /// Eye position for this state.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let offset = Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az);
        self.target + offset * self.distance
    }
}

/// Navigation capability orchestrated by the viewport controller.
///
/// Implementations accumulate input in [`handle_pointer`] and apply it to
/// the camera once per frame in [`update`].
///
/// [`handle_pointer`]: Navigation::handle_pointer
/// [`update`]: Navigation::update
pub trait Navigation {
    /// Current spherical state.
    fn state(&self) -> NavigationState;

    /// Current orbit target.
    fn target(&self) -> Vec3 {
        self.state().target
    }

    /// Move the orbit target, keeping the eye where it is.
    fn set_target(&mut self, target: Vec3);

    /// Whether pointer input is accepted.
    fn is_enabled(&self) -> bool;

    /// Enable or disable pointer input. Disabling drops any motion in
    /// flight.
    fn set_enabled(&mut self, enabled: bool);

    /// Viewport size in pixels, used to scale drag distances.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Accumulate a raw pointer event.
    fn handle_pointer(&mut self, event: &PointerEvent);

    /// Re-derive the state from `camera` (after the camera was moved
    /// externally). Drops any motion in flight.
    fn sync_from_camera(&mut self, camera: &Camera);

    /// Advance one tick: apply pending motion and write the resulting
    /// placement into `camera`. Returns `true` if the camera moved.
    fn update(&mut self, camera: &mut Camera) -> bool;

    /// Release resources. Called once by the controller's teardown.
    fn dispose(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
    Dolly,
}

/// Motion accumulated since the last update.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingMotion {
    azimuth: f32,
    elevation: f32,
    /// Pan in viewport pixels.
    pan: Vec2,
    /// Multiplicative distance change (1.0 = none).
    zoom: f32,
}

impl PendingMotion {
    const NONE: Self = Self {
        azimuth: 0.0,
        elevation: 0.0,
        pan: Vec2::ZERO,
        zoom: 1.0,
    };

    fn is_settled(&self) -> bool {
        self.azimuth.abs() < SETTLE_EPSILON
            && self.elevation.abs() < SETTLE_EPSILON
            && self.pan.length_squared() < SETTLE_EPSILON
            && (self.zoom - 1.0).abs() < SETTLE_EPSILON
    }
}

/// Stock orbit navigation.
pub struct OrbitNavigation {
    options: NavigationOptions,
    state: NavigationState,
    enabled: bool,
    viewport_height: f32,
    pending: PendingMotion,
    drag: Option<DragMode>,
    last_pointer: Vec2,
}

impl OrbitNavigation {
    /// Create an enabled orbit looking at the origin from +Z.
    ///
    /// Limit pairs that cannot form a range are repaired first, see
    /// [`NavigationOptions::sanitized`].
    #[must_use]
    pub fn new(options: NavigationOptions) -> Self {
        Self {
            options: options.sanitized(),
            state: NavigationState {
                target: Vec3::ZERO,
                distance: 1.0,
                azimuth: 0.0,
                elevation: 0.0,
            },
            enabled: true,
            viewport_height: 1.0,
            pending: PendingMotion::NONE,
            drag: None,
            last_pointer: Vec2::ZERO,
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    /// Whether motion is still waiting to be applied.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        !self.pending.is_settled()
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.options.zoom_speed)
    }

    fn dolly(&mut self, away: bool) {
        let scale = self.zoom_scale();
        if away {
            self.pending.zoom /= scale;
        } else {
            self.pending.zoom *= scale;
        }
    }

    fn drag_to(&mut self, position: Vec2) {
        let delta = position - self.last_pointer;
        self.last_pointer = position;
        let Some(mode) = self.drag else { return };

        match mode {
            DragMode::Rotate => {
                let turn =
                    TAU * self.options.rotate_speed / self.viewport_height;
                self.pending.azimuth -= delta.x * turn;
                self.pending.elevation += delta.y * turn;
            }
            DragMode::Pan => self.pending.pan += delta,
            DragMode::Dolly => {
                if delta.y != 0.0 {
                    self.dolly(delta.y > 0.0);
                }
            }
        }
    }

    /// Convert a pixel pan into a world-space target offset.
    fn pan_offset(&self, camera: &Camera, pixels: Vec2) -> Vec3 {
        let forward =
            (self.state.target - self.state.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        // World units spanned by one pixel at the target's depth
        let half_height = (camera.fovy_radians() * 0.5).tan();
        let per_pixel = 2.0 * self.state.distance * half_height
            / self.viewport_height
            * self.options.pan_speed;
        right * (-pixels.x * per_pixel) + up * (pixels.y * per_pixel)
    }
}

impl Navigation for OrbitNavigation {
    fn state(&self) -> NavigationState {
        self.state
    }

    fn set_target(&mut self, target: Vec3) {
        self.state = NavigationState::from_eye(self.state.eye(), target);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = None;
            self.pending = PendingMotion::NONE;
        }
    }

    fn set_viewport(&mut self, _width: u32, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    fn handle_pointer(&mut self, event: &PointerEvent) {
        if !self.enabled {
            return;
        }
        let position = Vec2::new(event.x, event.y);
        match event.kind {
            PointerEventKind::Down => {
                self.drag = event.button.map(|button| match button {
                    PointerButton::Primary => DragMode::Rotate,
                    PointerButton::Secondary => DragMode::Pan,
                    PointerButton::Middle => DragMode::Dolly,
                });
                self.last_pointer = position;
            }
            PointerEventKind::Move => self.drag_to(position),
            PointerEventKind::Up => self.drag = None,
            PointerEventKind::Wheel => {
                if event.wheel_delta != 0.0 {
                    self.dolly(event.wheel_delta > 0.0);
                }
            }
            PointerEventKind::ContextMenu => {}
        }
    }

    fn sync_from_camera(&mut self, camera: &Camera) {
        self.state = NavigationState::from_eye(camera.eye, camera.target);
        self.pending = PendingMotion::NONE;
    }

    fn update(&mut self, camera: &mut Camera) -> bool {
        let damping = self.options.damping;
        let fraction = if damping > 0.0 { damping.min(1.0) } else { 1.0 };

        let pan = self.pan_offset(camera, self.pending.pan * fraction);
        self.state.target += pan;
        self.state.azimuth += self.pending.azimuth * fraction;
        self.state.elevation = (self.state.elevation
            + self.pending.elevation * fraction)
            .clamp(
                self.options.min_elevation.to_radians(),
                self.options.max_elevation.to_radians(),
            );
        let zoom = self.pending.zoom.powf(fraction);
        self.state.distance = zoomed_distance(
            self.state.distance,
            zoom,
            self.options.min_distance,
            self.options.max_distance,
        );

        let remaining = 1.0 - fraction;
        self.pending = PendingMotion {
            azimuth: self.pending.azimuth * remaining,
            elevation: self.pending.elevation * remaining,
            pan: self.pending.pan * remaining,
            zoom: self.pending.zoom.powf(remaining),
        };
        if self.pending.is_settled() {
            self.pending = PendingMotion::NONE;
        }

        let before = (camera.eye, camera.target);
        camera.eye = self.state.eye();
        camera.target = self.state.target;
        camera.up = Vec3::Y;
        before != (camera.eye, camera.target)
    }

    fn dispose(&mut self) {
        self.set_enabled(false);
    }
}

/// Scale `distance` by `zoom`, limited only in the direction of travel so
/// a placement outside `min..max` survives until the user zooms.
fn zoomed_distance(distance: f32, zoom: f32, min: f32, max: f32) -> f32 {
    let scaled = distance * zoom;
    if zoom < 1.0 {
        scaled.max(min.min(distance))
    } else if zoom > 1.0 {
        scaled.min(max.max(distance))
    } else {
        distance
    }
}
