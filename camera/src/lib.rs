//! Camera preview sessions for VR headsets.
//!
//! This crate binds a device camera to a GPU texture so a head-mounted display
//! can render a live passthrough preview. It drives the camera through a small
//! hardware abstraction ([`CameraHal`], [`CameraDevice`], [`PreviewSurface`])
//! and configures the vendor high-frame-rate "VR mode" that some headsets
//! expose through string camera parameters.
//!
//! The entry point is [`VrCamera`], a session adapter with an explicit
//! `Closed` / `Streaming` / `Paused` lifecycle.

#![warn(missing_docs)]

mod config;
mod hal;
mod mode;
mod params;
mod permission;
pub mod profile;
mod session;

/// Platform-specific implementations.
pub mod sys;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use config::{SessionConfig, SetupMode};
pub use hal::{CameraDevice, CameraHal, PreviewSurface};
pub use mode::{FpsMode, UNSET_FPS_MODE};
pub use params::{CameraParameters, FocusMode, keys};
pub use permission::{has_camera_permission, request_camera_permission};
pub use session::{CameraUnavailable, SessionState, VrCamera};

pub use vrkit_permission::{Permission, PermissionHost, PermissionStatus};

/// Errors that can occur with camera operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CameraError {
    /// Camera is not supported on this platform.
    #[error("camera not supported on this platform")]
    NotSupported,
    /// No camera device is present.
    #[error("no camera device available")]
    NotFound,
    /// Camera is already in use by another client.
    #[error("camera is already in use")]
    AlreadyInUse,
    /// The operation needs an open session.
    #[error("camera is not open")]
    NotOpen,
    /// Frame-rate mode selector outside the supported range.
    #[error("invalid frame rate mode: {0}")]
    InvalidMode(i32),
    /// The device does not declare VR mode support.
    #[error("vr mode is not supported by this device")]
    VrModeUnsupported,
    /// The target surface was dropped by its owner.
    #[error("target surface has been dropped")]
    SurfaceDropped,
    /// A parameter key or value the platform cannot represent.
    #[error("invalid camera parameter: {0}")]
    InvalidParameter(String),
    /// A session configuration that could not be parsed.
    #[error("invalid session configuration: {0}")]
    InvalidConfig(String),
    /// The platform camera API failed.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Camera resolution configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Standard 720p resolution.
    pub const HD: Self = Self {
        width: 1280,
        height: 720,
    };

    /// Standard 1080p resolution.
    pub const FULL_HD: Self = Self {
        width: 1920,
        height: 1080,
    };

    /// Create a resolution.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Opaque GPU texture name a preview surface renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}
