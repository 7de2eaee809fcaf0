/// Which kind of raw pointer event a host delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// A button was pressed.
    Down,
    /// The pointer moved.
    Move,
    /// A button was released.
    Up,
    /// The host asked for a context menu (usually a secondary click).
    ContextMenu,
    /// Scroll wheel or trackpad scroll.
    Wheel,
}

/// Platform-agnostic pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (left) button.
    Primary,
    /// Secondary (right) button.
    Secondary,
    /// Middle button (wheel click).
    Middle,
}

/// Platform-agnostic pointer event in viewport pixel coordinates.
///
/// Positions are relative to the viewport's top-left corner, Y down.
///
/// # Example
///
/// ```
/// use orbitview::{PointerButton, PointerEvent, PointerEventKind};
///
/// let down = PointerEvent::down(120.0, 80.0, PointerButton::Primary);
/// assert_eq!(down.kind, PointerEventKind::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerEventKind,
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
    /// Button that changed state (`Down`, `Up`, `ContextMenu`).
    pub button: Option<PointerButton>,
    /// Scroll amount for `Wheel` events (positive = away from the user,
    /// zooms out).
    pub wheel_delta: f32,
}

impl PointerEvent {
    fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            button: None,
            wheel_delta: 0.0,
        }
    }

    /// Button press at `(x, y)`.
    #[must_use]
    pub fn down(x: f32, y: f32, button: PointerButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(PointerEventKind::Down, x, y)
        }
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Button release at `(x, y)`.
    #[must_use]
    pub fn up(x: f32, y: f32, button: PointerButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(PointerEventKind::Up, x, y)
        }
    }

    /// Context-menu request at `(x, y)`.
    #[must_use]
    pub fn context_menu(x: f32, y: f32) -> Self {
        Self {
            button: Some(PointerButton::Secondary),
            ..Self::new(PointerEventKind::ContextMenu, x, y)
        }
    }

    /// Scroll by `delta` at `(x, y)`.
    #[must_use]
    pub fn wheel(x: f32, y: f32, delta: f32) -> Self {
        Self {
            wheel_delta: delta,
            ..Self::new(PointerEventKind::Wheel, x, y)
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for PointerButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Secondary,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Primary,
        }
    }
}

/// Tracks the cursor so winit button events, which carry no position, can
/// be turned into positioned [`PointerEvent`]s.
#[cfg(feature = "viewer")]
#[derive(Debug, Default, Clone, Copy)]
pub struct WinitPointerAdapter {
    cursor: (f32, f32),
}

#[cfg(feature = "viewer")]
impl WinitPointerAdapter {
    /// Create an adapter with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a window event, or `None` if it is not a pointer event.
    ///
    /// A secondary-button release is reported as [`PointerEventKind::Up`];
    /// hosts that want context menus dispatch
    /// [`PointerEvent::context_menu`] themselves.
    pub fn translate(
        &mut self,
        event: &winit::event::WindowEvent,
    ) -> Option<PointerEvent> {
        use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

        let (x, y) = self.cursor;
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                Some(PointerEvent::moved(self.cursor.0, self.cursor.1))
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let button = PointerButton::from(*button);
                Some(match state {
                    ElementState::Pressed => PointerEvent::down(x, y, button),
                    ElementState::Released => PointerEvent::up(x, y, button),
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports positive Y for scrolling up (zoom in)
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, dy) => -*dy,
                    MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) * 0.01,
                };
                Some(PointerEvent::wheel(x, y, scroll))
            }
            _ => None,
        }
    }
}
