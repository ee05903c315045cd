//! In-memory camera stack for driving sessions in tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use vrkit_camera::{
    CameraDevice, CameraError, CameraHal, CameraParameters, PreviewSurface, Resolution, TextureId,
};

pub const PLAIN_DEFAULTS: &str =
    "preview-size=1280x720;preview-fps-range=15000,30000;focus-mode=auto;video-stabilization=true";

pub const VR_DEFAULTS: &str = "preview-size=1280x720;preview-fps-range=15000,30000;\
    focus-mode=auto;video-stabilization=true;vrmode-supported=true;ois-supported=true";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What the fake driver does on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenBehavior {
    Succeed,
    Absent,
    Busy,
    FailStart,
}

/// Shared driver state, inspected by tests after the session runs.
#[derive(Debug)]
pub struct Rig {
    pub behavior: OpenBehavior,
    pub defaults: CameraParameters,
    /// Parameters of the currently open device; reset to defaults on open.
    pub current: CameraParameters,
    pub live_devices: u32,
    pub opens: u32,
    pub releases: u32,
    pub starts: u32,
    pub stops: u32,
    pub parameter_reads: u32,
    pub parameter_writes: u32,
    /// Make `set_parameters` fail without changing anything.
    pub reject_parameters: bool,
    pub bound_texture: Option<TextureId>,
}

impl Rig {
    pub fn new(defaults: &str) -> Rc<RefCell<Self>> {
        let defaults = CameraParameters::unflatten(defaults);
        Rc::new(RefCell::new(Self {
            behavior: OpenBehavior::Succeed,
            current: defaults.clone(),
            defaults,
            live_devices: 0,
            opens: 0,
            releases: 0,
            starts: 0,
            stops: 0,
            parameter_reads: 0,
            parameter_writes: 0,
            reject_parameters: false,
            bound_texture: None,
        }))
    }

    pub fn device_touches(&self) -> u32 {
        self.parameter_reads + self.parameter_writes + self.starts + self.stops
    }
}

#[derive(Debug)]
pub struct FakeHal {
    pub rig: Rc<RefCell<Rig>>,
}

impl CameraHal for FakeHal {
    type Surface = FakeSurface;
    type Device = FakeDevice;

    fn open_default(&mut self) -> Result<FakeDevice, CameraError> {
        let mut rig = self.rig.borrow_mut();
        match rig.behavior {
            OpenBehavior::Absent => return Err(CameraError::NotFound),
            OpenBehavior::Busy => return Err(CameraError::AlreadyInUse),
            OpenBehavior::Succeed | OpenBehavior::FailStart => {}
        }
        assert_eq!(rig.live_devices, 0, "device opened twice");
        rig.opens += 1;
        rig.live_devices += 1;
        rig.current = rig.defaults.clone();
        Ok(FakeDevice {
            rig: Rc::clone(&self.rig),
        })
    }
}

#[derive(Debug)]
pub struct FakeDevice {
    rig: Rc<RefCell<Rig>>,
}

impl CameraDevice<FakeSurface> for FakeDevice {
    fn parameters(&mut self) -> Result<CameraParameters, CameraError> {
        let mut rig = self.rig.borrow_mut();
        rig.parameter_reads += 1;
        Ok(rig.current.clone())
    }

    fn set_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError> {
        let mut rig = self.rig.borrow_mut();
        if rig.reject_parameters {
            return Err(CameraError::Platform("setParameters failed".into()));
        }
        rig.parameter_writes += 1;
        rig.current = params.clone();
        Ok(())
    }

    fn set_preview_texture(&mut self, surface: &FakeSurface) -> Result<(), CameraError> {
        self.rig.borrow_mut().bound_texture = Some(surface.texture);
        Ok(())
    }

    fn start_preview(&mut self) -> Result<(), CameraError> {
        let mut rig = self.rig.borrow_mut();
        if rig.behavior == OpenBehavior::FailStart {
            return Err(CameraError::Platform("startPreview failed".into()));
        }
        rig.starts += 1;
        Ok(())
    }

    fn stop_preview(&mut self) -> Result<(), CameraError> {
        self.rig.borrow_mut().stops += 1;
        Ok(())
    }

    fn release(self) {
        let mut rig = self.rig.borrow_mut();
        rig.releases += 1;
        rig.live_devices -= 1;
        rig.bound_texture = None;
    }
}

/// Surface that produces a new frame every 1/60 s of fake time.
#[derive(Debug)]
pub struct FakeSurface {
    pub texture: TextureId,
    pub buffer_size: Mutex<Option<Resolution>>,
    pub updates: AtomicU32,
}

impl FakeSurface {
    pub fn new(texture: u32) -> Arc<Self> {
        Arc::new(Self {
            texture: TextureId(texture),
            buffer_size: Mutex::new(None),
            updates: AtomicU32::new(0),
        })
    }

    pub fn updates(&self) -> u32 {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn buffer_size(&self) -> Option<Resolution> {
        *self.buffer_size.lock().unwrap()
    }
}

pub const FRAME_INTERVAL_NS: i64 = 16_666_667;

impl PreviewSurface for FakeSurface {
    fn texture_id(&self) -> TextureId {
        self.texture
    }

    fn set_default_buffer_size(&self, size: Resolution) -> Result<(), CameraError> {
        *self.buffer_size.lock().unwrap() = Some(size);
        Ok(())
    }

    fn update_tex_image(&self) -> Result<(), CameraError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn timestamp(&self) -> i64 {
        i64::from(self.updates()) * FRAME_INTERVAL_NS
    }
}
