use crate::{
    CameraDevice, CameraError, CameraHal, FpsMode, PreviewSurface, Resolution, SessionConfig,
    SetupMode, UNSET_FPS_MODE, profile,
};
use std::fmt;
use std::sync::{Arc, Weak};

/// Lifecycle state of a [`VrCamera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No device held.
    Closed,
    /// Device open and streaming into the target surface.
    Streaming,
    /// Device released by [`VrCamera::pause`]; frame polling is a no-op.
    Paused,
}

/// The camera could not be opened.
///
/// Every failure to open (no device, device busy, surface gone, platform
/// error) collapses into this one outcome. The underlying error is kept as
/// the source for diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
#[error("camera not available or in use")]
pub struct CameraUnavailable {
    #[source]
    cause: CameraError,
}

impl CameraUnavailable {
    /// The failure that made the camera unavailable.
    #[must_use]
    pub const fn cause(&self) -> &CameraError {
        &self.cause
    }
}

impl From<CameraError> for CameraUnavailable {
    fn from(cause: CameraError) -> Self {
        Self { cause }
    }
}

/// A camera preview session bound to a caller-owned surface.
///
/// The session holds at most one open device, and holds it exactly while
/// streaming. The surface is only borrowed weakly; dropping it makes further
/// opens fail and turns [`update`](Self::update) into a no-op.
///
/// Calls take `&mut self`, so a session is driven from one place at a time.
pub struct VrCamera<H: CameraHal> {
    hal: H,
    surface: Weak<H::Surface>,
    device: Option<H::Device>,
    state: SessionState,
    fps_mode: Option<FpsMode>,
    config: SessionConfig,
}

impl<H: CameraHal> VrCamera<H> {
    /// Create a closed session with the default configuration.
    pub fn new(hal: H, surface: &Arc<H::Surface>) -> Self {
        Self::with_config(hal, surface, SessionConfig::default())
    }

    /// Create a closed session.
    pub fn with_config(hal: H, surface: &Arc<H::Surface>, config: SessionConfig) -> Self {
        Self {
            hal,
            surface: Arc::downgrade(surface),
            device: None,
            state: SessionState::Closed,
            fps_mode: None,
            config,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a device is held (and therefore streaming).
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// The last frame-rate mode applied through configuration.
    #[must_use]
    pub const fn fps_mode(&self) -> Option<FpsMode> {
        self.fps_mode
    }

    /// The last applied frame-rate ordinal, or [`UNSET_FPS_MODE`].
    #[must_use]
    pub const fn fps_mode_raw(&self) -> i32 {
        match self.fps_mode {
            Some(mode) => mode.ordinal(),
            None => UNSET_FPS_MODE,
        }
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The platform camera stack.
    #[must_use]
    pub const fn hal(&self) -> &H {
        &self.hal
    }

    /// Open the first available camera and start streaming into the surface.
    ///
    /// Does nothing if the session is already streaming.
    ///
    /// # Errors
    /// Returns [`CameraUnavailable`] if the camera cannot be opened or
    /// started. The session state is left unchanged.
    pub fn open(&mut self) -> Result<(), CameraUnavailable> {
        if self.device.is_some() {
            return Ok(());
        }

        let device = self.start_device().map_err(|err| {
            log::warn!("camera not available or in use: {err}");
            CameraUnavailable::from(err)
        })?;

        self.device = Some(device);
        self.state = SessionState::Streaming;
        log::info!("camera streaming");
        Ok(())
    }

    /// Reopen the camera and restart streaming.
    ///
    /// When the session reopens and `reapply_on_resume` is set, the cached
    /// frame-rate mode is applied again. A failure to re-apply is logged and
    /// does not fail the resume.
    ///
    /// # Errors
    /// Returns [`CameraUnavailable`] if the camera cannot be reopened. The
    /// session state is left unchanged.
    pub fn resume(&mut self) -> Result<(), CameraUnavailable> {
        let reopened = self.device.is_none();
        self.open()?;

        if reopened
            && self.config.reapply_on_resume
            && let Some(mode) = self.fps_mode
            && let Err(err) = self.apply_fps_mode(mode)
        {
            log::warn!("failed to restore {} fps mode: {err}", mode.fps());
        }
        Ok(())
    }

    /// Stop streaming and release the device.
    ///
    /// Idempotent; pausing a closed session leaves it closed.
    pub fn pause(&mut self) {
        if self.release_device() {
            self.state = SessionState::Paused;
        }
    }

    /// Stop streaming, release the device and close the session.
    ///
    /// Idempotent.
    pub fn close(&mut self) {
        self.release_device();
        self.state = SessionState::Closed;
    }

    /// Latch the latest camera frame into the surface.
    ///
    /// Returns the frame's capture timestamp in nanoseconds. If no new frame
    /// arrived, the surface keeps the previous one. Returns `0` without
    /// touching the surface unless the session is streaming.
    pub fn update(&self) -> i64 {
        if self.state != SessionState::Streaming {
            return 0;
        }
        let Some(surface) = self.surface.upgrade() else {
            return 0;
        };

        match surface.update_tex_image() {
            Ok(()) => surface.timestamp(),
            Err(err) => {
                log::warn!("failed to update {}: {err}", surface.texture_id());
                0
            }
        }
    }

    /// Apply a frame-rate mode by selector (`0`, `1`, `2` for 30, 60, 120 fps).
    ///
    /// Returns `false` if the selector is out of range, the session is not
    /// open, the device does not support VR mode, or the device rejects the
    /// parameters. The cause is logged.
    pub fn configure_frame_rate(&mut self, selector: i32) -> bool {
        match FpsMode::try_from(selector).and_then(|mode| self.apply_fps_mode(mode)) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to configure frame rate mode {selector}: {err}");
                false
            }
        }
    }

    /// Apply the VR preview profile for `mode` to the open device.
    ///
    /// # Errors
    /// Returns [`CameraError::NotOpen`] if the session is not streaming,
    /// [`CameraError::VrModeUnsupported`] if the device lacks VR mode, or the
    /// device's error if its parameters cannot be read or written.
    pub fn apply_fps_mode(&mut self, mode: FpsMode) -> Result<(), CameraError> {
        let device = self.device.as_mut().ok_or(CameraError::NotOpen)?;

        let mut params = device.parameters()?;
        if !profile::apply_vr_mode(&mut params, mode) {
            return Err(CameraError::VrModeUnsupported);
        }
        device.set_parameters(&params)?;

        self.fps_mode = Some(mode);
        log::info!("vr mode enabled at {} fps", mode.fps());
        Ok(())
    }

    /// Whether the platform reports camera hardware.
    #[must_use]
    pub fn has_camera_hardware(&self) -> bool {
        self.hal.has_camera_hardware()
    }

    fn start_device(&mut self) -> Result<H::Device, CameraError> {
        let surface = self.surface.upgrade().ok_or(CameraError::SurfaceDropped)?;
        let mut device = self.hal.open_default()?;

        match bind(&self.config, &mut device, &*surface) {
            Ok(()) => Ok(device),
            Err(err) => {
                device.release();
                Err(err)
            }
        }
    }

    fn release_device(&mut self) -> bool {
        let Some(mut device) = self.device.take() else {
            return false;
        };
        if let Err(err) = device.stop_preview() {
            log::warn!("failed to stop preview: {err}");
        }
        device.release();
        log::info!("camera released");
        true
    }
}

fn bind<S, D>(config: &SessionConfig, device: &mut D, surface: &S) -> Result<(), CameraError>
where
    S: PreviewSurface,
    D: CameraDevice<S>,
{
    if let Some(size) = config.buffer_size {
        surface.set_default_buffer_size(size)?;
    }

    if let SetupMode::Automatic { mode } = config.setup {
        let mut params = device.parameters()?;
        let size = config.buffer_size.unwrap_or(Resolution::FULL_HD);
        profile::apply_automatic(&mut params, size, mode);
        device.set_parameters(&params)?;
    }

    device.set_preview_texture(surface)?;
    device.start_preview()
}

impl<H: CameraHal> Drop for VrCamera<H> {
    fn drop(&mut self) {
        self.release_device();
    }
}

impl<H: CameraHal> fmt::Debug for VrCamera<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VrCamera")
            .field("state", &self.state)
            .field("open", &self.device.is_some())
            .field("fps_mode", &self.fps_mode)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
