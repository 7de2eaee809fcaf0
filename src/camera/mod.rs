//! Camera system for the viewport.
//!
//! Provides the perspective camera, frustum extraction, bounding-volume
//! framing and orbit navigation.

/// Core camera struct and uniform snapshot.
pub mod core;
/// Fitting a bounding volume into the camera's view.
pub mod framer;
/// View frustum extraction and containment tests.
pub mod frustum;
/// Orbit navigation driven by pointer input.
pub mod navigation;

pub use navigation::{Navigation, NavigationState, OrbitNavigation};
