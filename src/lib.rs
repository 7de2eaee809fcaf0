// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math allowances
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

//! Viewport controller for interactive 3D scenes.
//!
//! Orbitview owns a perspective camera, an orbit navigation state, and the
//! mapping between 2D pointer coordinates and 3D world geometry. Rendering
//! itself is left to the host: the controller only tells the host when to
//! draw, at which output size, and with which camera.
//!
//! # Key entry points
//!
//! - [`viewport::ViewportController`] - owns camera, navigation and the
//!   frame/resize cycle
//! - [`camera::framer`] - fits a bounding volume into the camera's view
//! - [`picking`] - pointer-to-ray conversion and nearest-hit resolution
//! - [`scene::Pickable`] - the capability candidates implement to be picked
//!   and framed
//! - [`options::Options`] - camera, navigation and ground configuration with
//!   TOML preset support
//!
//! # Threading
//!
//! Everything runs on the host's render thread. The controller holds no
//! locks; host resize notifications are parked in a single-threaded slot and
//! applied on the next
//! [`render_frame`](viewport::ViewportController::render_frame).

pub mod camera;
pub mod error;
pub mod input;
pub mod math;
pub mod options;
pub mod picking;
pub mod scene;
pub mod viewport;

pub use camera::core::Camera;
pub use error::ViewportError;
pub use input::{PointerButton, PointerEvent, PointerEventKind};
pub use math::{Aabb, Ray};
pub use options::Options;
pub use picking::Intersection;
pub use scene::{Pickable, SceneObject};
pub use viewport::{HeadlessSurface, HostSurface, ViewportController};
