//! Raw pointer events, as delivered by the host.
//!
//! The controller does not interpret gestures. It forwards these events to
//! subscribers and, when navigation is enabled, to the navigation
//! capability.

/// Platform-agnostic pointer events.
pub mod event;

#[cfg(feature = "viewer")]
pub use event::WinitPointerAdapter;
pub use event::{PointerButton, PointerEvent, PointerEventKind};
