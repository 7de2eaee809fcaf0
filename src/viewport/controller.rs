use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

use super::debug::{DebugInspector, DebugSnapshot};
use super::events::{EventHub, Subscription};
use super::host::{HostSurface, ListenerId};
use super::timing::FrameTiming;
use crate::camera::core::Camera;
use crate::camera::framer::{frame_bounds, Framing};
use crate::camera::navigation::{
    Navigation, NavigationState, OrbitNavigation,
};
use crate::error::ViewportError;
use crate::input::{PointerEvent, PointerEventKind};
use crate::math::Aabb;
use crate::options::Options;
use crate::picking::{pick, Intersection};
use crate::scene::{
    compute_bounding_volume, ground_plane, Pickable, SceneObject,
};

/// Result of [`ViewportController::dispatch_pointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The host should suppress its default handling (context menus).
    pub prevent_default: bool,
    /// Number of subscribed handlers that ran.
    pub handlers_run: usize,
}

/// Owns the camera, the navigation capability and the frame cycle of one
/// viewport.
///
/// The host drives it: [`render_frame`](Self::render_frame) once per
/// display frame, [`dispatch_pointer`](Self::dispatch_pointer) for raw
/// pointer input, [`on_resize`](Self::on_resize) when the drawable changes
/// size. Host resize notifications arriving through the registered listener
/// are applied on the next frame.
pub struct ViewportController<H: HostSurface> {
    host: H,
    options: Options,
    camera: Camera,
    navigation: Box<dyn Navigation>,
    ground: SceneObject,
    events: EventHub,
    inspector: Option<Box<dyn DebugInspector>>,
    timing: FrameTiming,
    pending_resize: Rc<Cell<Option<(u32, u32)>>>,
    resize_listener: Option<ListenerId>,
    viewport: (u32, u32),
    torn_down: bool,
}

impl<H: HostSurface> ViewportController<H> {
    /// Create a controller with default options and orbit navigation.
    pub fn initialize(host: H, width: u32, height: u32) -> Self {
        let options = Options::default();
        let navigation =
            Box::new(OrbitNavigation::new(options.navigation.clone()));
        Self::initialize_with_options(host, width, height, &options, navigation)
    }

    /// Create a controller with explicit options and navigation.
    ///
    /// The camera starts `options.camera.initial_distance` units along +Z,
    /// looking at the origin, with navigation enabled.
    pub fn initialize_with_options(
        mut host: H,
        width: u32,
        height: u32,
        options: &Options,
        mut navigation: Box<dyn Navigation>,
    ) -> Self {
        let viewport = clamp_viewport(width, height);
        let camera_opts = &options.camera;
        let camera = Camera::new(
            camera_opts.fovy,
            viewport.0 as f32 / viewport.1 as f32,
            camera_opts.znear,
            camera_opts.zfar,
            Vec3::new(0.0, 0.0, camera_opts.initial_distance),
            Vec3::ZERO,
        );

        navigation.set_enabled(true);
        navigation.set_viewport(viewport.0, viewport.1);
        navigation.sync_from_camera(&camera);

        let pending_resize = Rc::new(Cell::new(None));
        let slot = Rc::clone(&pending_resize);
        let on_resize = move |w: u32, h: u32| slot.set(Some((w, h)));
        let listener = host.add_resize_listener(Box::new(on_resize));

        let pixel_ratio = host.pixel_ratio();
        host.set_output_size(viewport.0, viewport.1, pixel_ratio);

        log::info!(
            "viewport initialized at {}x{} (pixel ratio {pixel_ratio}, fov {})",
            viewport.0,
            viewport.1,
            camera_opts.fovy
        );

        Self {
            host,
            options: options.clone(),
            camera,
            navigation,
            ground: ground_plane(options.ground.size, options.ground.height),
            events: EventHub::new(),
            inspector: None,
            timing: FrameTiming::new(),
            pending_resize,
            resize_listener: Some(listener),
            viewport,
            torn_down: false,
        }
    }

    /// Attach a debug inspector that receives a snapshot after each frame.
    #[must_use]
    pub fn with_inspector(
        mut self,
        inspector: Box<dyn DebugInspector>,
    ) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Replace or remove the debug inspector.
    pub fn set_inspector(
        &mut self,
        inspector: Option<Box<dyn DebugInspector>>,
    ) {
        self.inspector = inspector;
    }

    // -- Accessors --

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The host surface.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host surface.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current orbit state.
    #[must_use]
    pub fn navigation_state(&self) -> NavigationState {
        self.navigation.state()
    }

    /// Whether pointer input reaches navigation.
    #[must_use]
    pub fn navigation_enabled(&self) -> bool {
        self.navigation.is_enabled()
    }

    /// Viewport size in pixels (both dimensions at least 1).
    #[must_use]
    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // -- Operations --

    /// Apply a new viewport size. Zero dimensions are clamped to 1.
    ///
    /// Supersedes any resize the host reported since the last frame.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn on_resize(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<(), ViewportError> {
        self.ensure_live("on_resize")?;
        self.pending_resize.set(None);
        self.apply_resize(width, height);
        Ok(())
    }

    /// Run one frame: apply a pending host resize, advance navigation, then
    /// let the host render with the current camera.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn render_frame(&mut self) -> Result<(), ViewportError> {
        self.ensure_live("render_frame")?;

        if let Some((width, height)) = self.pending_resize.take() {
            self.apply_resize(width, height);
        }
        if self.navigation.is_enabled() {
            let _ = self.navigation.update(&mut self.camera);
        }
        self.host.render(&self.camera);
        self.timing.end_frame();

        if self.inspector.is_some() {
            let snapshot = self.snapshot();
            if let Some(inspector) = self.inspector.as_mut() {
                inspector.inspect(&snapshot);
            }
        }
        Ok(())
    }

    /// Nearest hit under pixel `(x, y)` of the current viewport.
    ///
    /// With `candidates` of `None` the ground plane is tested. A miss is
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn pick_at<'a>(
        &'a self,
        x: f32,
        y: f32,
        candidates: Option<&[&'a dyn Pickable]>,
    ) -> Result<Option<Intersection<'a>>, ViewportError> {
        self.ensure_live("pick_at")?;

        let ground: &dyn Pickable = &self.ground;
        let candidates = candidates.unwrap_or(std::slice::from_ref(&ground));
        let (width, height) = self.viewport;
        let hit = pick(x, y, width, height, &self.camera, candidates);

        match &hit {
            Some(hit) => log::debug!(
                "pick ({x}, {y}) -> {} at {:.3}",
                hit.object.name(),
                hit.distance
            ),
            None => log::debug!("pick ({x}, {y}) -> nothing"),
        }
        Ok(hit)
    }

    /// Frame `object` so its whole bounding volume is visible, and retarget
    /// navigation at its center.
    ///
    /// `margin` defaults to `options.camera.frame_margin`. The placement may
    /// lie outside the navigation distance limits; navigation keeps it until
    /// the next zoom.
    ///
    /// # Errors
    ///
    /// [`ViewportError::InvalidTarget`] for an object without geometry and
    /// [`ViewportError::ExceedsClipRange`] for one too deep to fit before
    /// the far plane. Either leaves the camera untouched.
    pub fn focus_on(
        &mut self,
        object: &dyn Pickable,
        margin: Option<f32>,
    ) -> Result<Framing, ViewportError> {
        self.ensure_live("focus_on")?;
        let bounds = compute_bounding_volume(object);
        if bounds.is_empty() {
            log::debug!("focus_on {:?}: no geometry", object.name());
        }
        self.frame(&bounds, margin)
    }

    /// Frame an explicit bounding volume.
    ///
    /// # Errors
    ///
    /// As for [`focus_on`](Self::focus_on).
    pub fn focus_on_bounds(
        &mut self,
        bounds: &Aabb,
        margin: Option<f32>,
    ) -> Result<Framing, ViewportError> {
        self.ensure_live("focus_on_bounds")?;
        self.frame(bounds, margin)
    }

    /// Enable or disable pointer navigation. Picking is unaffected.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn set_navigation_enabled(
        &mut self,
        enabled: bool,
    ) -> Result<(), ViewportError> {
        self.ensure_live("set_navigation_enabled")?;
        self.navigation.set_enabled(enabled);
        let state = if enabled { "enabled" } else { "disabled" };
        log::debug!("navigation {state}");
        Ok(())
    }

    /// Register `handler` for pointer events of `kind`.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn subscribe(
        &mut self,
        kind: PointerEventKind,
        handler: impl FnMut(&PointerEvent) + 'static,
    ) -> Result<Subscription, ViewportError> {
        self.ensure_live("subscribe")?;
        Ok(self.events.subscribe(kind, Box::new(handler)))
    }

    /// Remove a handler. Returns `Ok(false)` if it was already removed.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn unsubscribe(
        &mut self,
        subscription: Subscription,
    ) -> Result<bool, ViewportError> {
        self.ensure_live("unsubscribe")?;
        Ok(self.events.unsubscribe(subscription))
    }

    /// Deliver a raw pointer event to subscribers and, when enabled, to
    /// navigation.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn dispatch_pointer(
        &mut self,
        event: &PointerEvent,
    ) -> Result<DispatchOutcome, ViewportError> {
        self.ensure_live("dispatch_pointer")?;
        let handlers_run = self.events.dispatch(event);
        if self.navigation.is_enabled() {
            self.navigation.handle_pointer(event);
        }
        Ok(DispatchOutcome {
            prevent_default: event.kind == PointerEventKind::ContextMenu,
            handlers_run,
        })
    }

    /// Current controller state for debugging.
    ///
    /// # Errors
    ///
    /// [`ViewportError::DoubleTeardown`] after [`teardown`](Self::teardown).
    pub fn debug_snapshot(&self) -> Result<DebugSnapshot, ViewportError> {
        self.ensure_live("debug_snapshot")?;
        Ok(self.snapshot())
    }

    /// Release host resources: unregister the resize listener, drop every
    /// subscription and dispose navigation.
    ///
    /// # Errors
    ///
    /// A second call fails with [`ViewportError::DoubleTeardown`] and makes
    /// no host calls.
    pub fn teardown(&mut self) -> Result<(), ViewportError> {
        self.ensure_live("teardown")?;
        if let Some(id) = self.resize_listener.take() {
            if !self.host.remove_resize_listener(id) {
                log::warn!(
                    "resize listener {id:?} was already removed by the host"
                );
            }
        }
        self.events.clear();
        self.navigation.dispose();
        self.inspector = None;
        self.torn_down = true;
        log::info!(
            "viewport torn down after {} frame(s)",
            self.timing.frames()
        );
        Ok(())
    }

    // -- Internals --

    fn ensure_live(
        &self,
        operation: &'static str,
    ) -> Result<(), ViewportError> {
        if self.torn_down {
            log::error!("{operation} called on a torn-down viewport");
            return Err(ViewportError::DoubleTeardown { operation });
        }
        Ok(())
    }

    fn apply_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!(
                "viewport size {width}x{height} clamped to at least 1x1"
            );
        }
        let viewport = clamp_viewport(width, height);
        self.camera.set_viewport(viewport.0, viewport.1);
        self.navigation.set_viewport(viewport.0, viewport.1);
        let pixel_ratio = self.host.pixel_ratio();
        self.host.set_output_size(viewport.0, viewport.1, pixel_ratio);
        self.viewport = viewport;
        log::debug!(
            "viewport resized to {}x{} (aspect {:.3})",
            viewport.0,
            viewport.1,
            self.camera.aspect()
        );
    }

    fn frame(
        &mut self,
        bounds: &Aabb,
        margin: Option<f32>,
    ) -> Result<Framing, ViewportError> {
        let camera_opts = &self.options.camera;
        let margin = margin.unwrap_or(camera_opts.frame_margin);
        let framing = frame_bounds(
            &self.camera,
            bounds,
            margin,
            camera_opts.frame_vertical_offset,
        )?;
        framing.apply_to(&mut self.camera);
        self.navigation.sync_from_camera(&self.camera);
        log::debug!(
            "framed volume centered at {:?} from distance {:.3}",
            framing.target,
            framing.distance
        );

        let limits = &self.options.navigation;
        let orbit = self.navigation.state().distance;
        if orbit < limits.min_distance || orbit > limits.max_distance {
            log::debug!(
                "framed orbit distance {orbit:.3} lies outside navigation \
                 limits {}..{}",
                limits.min_distance,
                limits.max_distance
            );
        }
        Ok(framing)
    }

    fn snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            frame: self.timing.frames(),
            fps: self.timing.fps(),
            viewport: self.viewport,
            eye: self.camera.eye.to_array(),
            target: self.camera.target.to_array(),
            fovy: self.camera.fovy(),
            aspect: self.camera.aspect(),
            navigation: self.navigation.state(),
            navigation_enabled: self.navigation.is_enabled(),
            subscriptions: self.events.len(),
        }
    }
}

impl<H: HostSurface> Drop for ViewportController<H> {
    fn drop(&mut self) {
        if let Some(id) = self.resize_listener.take() {
            let _ = self.host.remove_resize_listener(id);
        }
    }
}

fn clamp_viewport(width: u32, height: u32) -> (u32, u32) {
    (width.max(1), height.max(1))
}
