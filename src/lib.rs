//! # vrkit
//!
//! Camera-to-texture preview sessions for VR headsets.
//!
//! vrkit binds a device camera to a GPU texture so a head-mounted display can
//! show a live passthrough preview, and configures the vendor high-frame-rate
//! modes some headsets expose.
//!
//! ## Features
//!
//! - `camera`: The preview session adapter and its platform backends.
//! - `permission`: Camera permission check and request helpers.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! vrkit = { version = "0.1", features = ["camera"] }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vrkit::camera::{FpsMode, VrCamera};
//!
//! let surface = Arc::new(surface);
//! let mut camera = VrCamera::new(hal, &surface);
//! if camera.resume().is_ok() {
//!     camera.configure_frame_rate(FpsMode::Fps120.ordinal());
//! }
//! let timestamp_ns = camera.update();
//! ```

#[cfg(feature = "camera")]
pub use vrkit_camera as camera;

#[cfg(feature = "permission")]
pub use vrkit_permission as permission;
