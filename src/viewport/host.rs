//! The host surface the controller renders through.
//!
//! The host owns the drawing backend and the window (or canvas). The
//! controller only asks it for its size, tells it the output size, and hands
//! it a camera once per frame.

use rustc_hash::FxHashMap;

use crate::camera::core::Camera;

/// Callback invoked with the host's new size in pixels.
pub type ResizeListener = Box<dyn FnMut(u32, u32)>;

/// Handle returned by [`HostSurface::add_resize_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Capability set a rendering host provides to the viewport controller.
pub trait HostSurface {
    /// Current drawable size in pixels.
    fn size(&self) -> (u32, u32);

    /// Device pixels per logical pixel.
    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    /// Configure the output (backbuffer) size.
    fn set_output_size(&mut self, width: u32, height: u32, pixel_ratio: f32);

    /// Draw the host's scene as seen by `camera`.
    fn render(&mut self, camera: &Camera);

    /// Register a callback for host size changes.
    fn add_resize_listener(&mut self, listener: ResizeListener) -> ListenerId;

    /// Unregister a callback. Returns `false` if `id` was not registered.
    fn remove_resize_listener(&mut self, id: ListenerId) -> bool;
}

/// Host with no drawing backend.
///
/// Records what the controller asked of it. Useful for tests, for
/// server-side picking, and as a template for real hosts.
#[derive(Default)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    output_size: Option<(u32, u32)>,
    frames_rendered: u64,
    last_camera: Option<Camera>,
    listeners: FxHashMap<ListenerId, ResizeListener>,
    next_listener: u64,
    listeners_removed: usize,
}

impl HeadlessSurface {
    /// Create a `width` x `height` surface at a pixel ratio of 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            ..Self::default()
        }
    }

    /// Use a different device pixel ratio.
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Change the surface size and notify every resize listener.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        for listener in self.listeners.values_mut() {
            listener(width, height);
        }
    }

    /// Last output size set by the controller.
    #[must_use]
    pub fn output_size(&self) -> Option<(u32, u32)> {
        self.output_size
    }

    /// Number of `render` calls so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Camera passed to the most recent `render` call.
    #[must_use]
    pub fn last_camera(&self) -> Option<&Camera> {
        self.last_camera.as_ref()
    }

    /// Number of currently registered resize listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of successful listener removals so far.
    #[must_use]
    pub fn listeners_removed(&self) -> usize {
        self.listeners_removed
    }
}

impl HostSurface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_output_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.output_size = Some((width, height));
        self.pixel_ratio = pixel_ratio;
    }

    fn render(&mut self, camera: &Camera) {
        self.frames_rendered += 1;
        self.last_camera = Some(*camera);
    }

    fn add_resize_listener(&mut self, listener: ResizeListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let _ = self.listeners.insert(id, listener);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        if removed {
            self.listeners_removed += 1;
        }
        removed
    }
}
