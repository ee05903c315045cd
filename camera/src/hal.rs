use crate::{CameraError, CameraParameters, Resolution, TextureId};

/// Entry point into a platform camera stack.
pub trait CameraHal {
    /// Surface type the platform's devices can stream into.
    type Surface: PreviewSurface;
    /// Open device handle.
    type Device: CameraDevice<Self::Surface>;

    /// Acquire the first available camera device.
    ///
    /// # Errors
    /// Returns [`CameraError::NotFound`] if no device is present,
    /// [`CameraError::AlreadyInUse`] if another client holds it, or
    /// [`CameraError::Platform`] for any other platform failure.
    fn open_default(&mut self) -> Result<Self::Device, CameraError>;

    /// Whether the system reports camera hardware at all.
    fn has_camera_hardware(&self) -> bool {
        true
    }
}

/// An exclusively owned, open camera device.
pub trait CameraDevice<S: ?Sized> {
    /// Read the current parameter block.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the device cannot be queried.
    fn parameters(&mut self) -> Result<CameraParameters, CameraError>;

    /// Write a full parameter block.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the device rejects the block.
    fn set_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError>;

    /// Route preview frames into `surface`.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the surface cannot be attached.
    fn set_preview_texture(&mut self, surface: &S) -> Result<(), CameraError>;

    /// Start streaming preview frames.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if streaming cannot start.
    fn start_preview(&mut self) -> Result<(), CameraError>;

    /// Stop streaming preview frames.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the device fails to stop.
    fn stop_preview(&mut self) -> Result<(), CameraError>;

    /// Release the device back to the system.
    fn release(self);
}

/// A caller-owned sink that receives camera frames into a GPU texture.
pub trait PreviewSurface {
    /// The texture frames are written to.
    fn texture_id(&self) -> TextureId;

    /// Size of the buffers the producer allocates.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the surface rejects the size.
    fn set_default_buffer_size(&self, size: Resolution) -> Result<(), CameraError>;

    /// Latch the most recent frame into the texture.
    ///
    /// If no new frame arrived since the previous call, the texture keeps its
    /// previous contents.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the frame cannot be latched.
    fn update_tex_image(&self) -> Result<(), CameraError>;

    /// Capture timestamp of the latched frame, in nanoseconds.
    fn timestamp(&self) -> i64;
}
