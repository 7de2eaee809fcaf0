//! Viewport lifecycle: the controller, the host surface it renders through,
//! pointer subscriptions and the debug hook.

/// Top-level viewport controller.
pub mod controller;
/// Per-frame debug snapshots and the inspector trait.
pub mod debug;
/// Pointer event subscriptions.
pub mod events;
/// Host surface trait and the headless implementation.
pub mod host;
mod timing;

pub use controller::{DispatchOutcome, ViewportController};
pub use debug::{DebugInspector, DebugSnapshot, LogInspector};
pub use events::{EventHub, PointerHandler, Subscription};
pub use host::{HeadlessSurface, HostSurface, ListenerId, ResizeListener};
