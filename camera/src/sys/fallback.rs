//! Compile-time stub for targets without a camera backend.

use crate::{
    CameraDevice, CameraError, CameraHal, CameraParameters, PreviewSurface, Resolution, TextureId,
};

/// Camera stack for unsupported platforms. Opening always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedHal;

/// A surface that never receives frames.
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedSurface(pub TextureId);

/// Uninhabited device type: no device can ever be opened here.
#[derive(Debug)]
pub enum NoDevice {}

impl CameraHal for UnsupportedHal {
    type Surface = UnsupportedSurface;
    type Device = NoDevice;

    fn open_default(&mut self) -> Result<NoDevice, CameraError> {
        Err(CameraError::NotSupported)
    }

    fn has_camera_hardware(&self) -> bool {
        false
    }
}

impl CameraDevice<UnsupportedSurface> for NoDevice {
    fn parameters(&mut self) -> Result<CameraParameters, CameraError> {
        match *self {}
    }

    fn set_parameters(&mut self, _params: &CameraParameters) -> Result<(), CameraError> {
        match *self {}
    }

    fn set_preview_texture(&mut self, _surface: &UnsupportedSurface) -> Result<(), CameraError> {
        match *self {}
    }

    fn start_preview(&mut self) -> Result<(), CameraError> {
        match *self {}
    }

    fn stop_preview(&mut self) -> Result<(), CameraError> {
        match *self {}
    }

    fn release(self) {
        match self {}
    }
}

impl PreviewSurface for UnsupportedSurface {
    fn texture_id(&self) -> TextureId {
        self.0
    }

    fn set_default_buffer_size(&self, _size: Resolution) -> Result<(), CameraError> {
        Err(CameraError::NotSupported)
    }

    fn update_tex_image(&self) -> Result<(), CameraError> {
        Err(CameraError::NotSupported)
    }

    fn timestamp(&self) -> i64 {
        0
    }
}
