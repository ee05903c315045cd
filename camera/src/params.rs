use crate::{CameraError, Resolution};
use std::fmt;
use std::str::FromStr;

/// Parameter keys understood by the preview profiles.
pub mod keys {
    /// Preview frame size, `WIDTHxHEIGHT`.
    pub const PREVIEW_SIZE: &str = "preview-size";
    /// Preview frame-rate range, `MIN,MAX` in frames per 1000 seconds.
    pub const PREVIEW_FPS_RANGE: &str = "preview-fps-range";
    /// Video stabilization toggle.
    pub const VIDEO_STABILIZATION: &str = "video-stabilization";
    /// Hint that the preview feeds a recording.
    pub const RECORDING_HINT: &str = "recording-hint";
    /// Focus mode, see [`FocusMode`](super::FocusMode).
    pub const FOCUS_MODE: &str = "focus-mode";
    /// Vendor fast frame-rate mode ordinal.
    pub const FAST_FPS_MODE: &str = "fast-fps-mode";
    /// Vendor VR preview mode.
    pub const VR_MODE: &str = "vrmode";
    /// Optical image stabilization mode.
    pub const OIS: &str = "ois";
    /// Capability flag: the sensor supports VR preview mode.
    pub const VR_MODE_SUPPORTED: &str = "vrmode-supported";
    /// Capability flag: the sensor has optical image stabilization.
    pub const OIS_SUPPORTED: &str = "ois-supported";
}

/// A camera parameter block.
///
/// Parameters are an ordered set of string properties. Across the platform
/// boundary they travel in flattened form, `key1=value1;key2=value2`, which
/// [`CameraParameters::unflatten`] and the `Display` impl convert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraParameters {
    entries: Vec<(String, String)>,
}

impl CameraParameters {
    /// Create an empty parameter block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a flattened parameter string.
    ///
    /// Segments without a `=` are skipped. A repeated key keeps its first
    /// position and its last value.
    #[must_use]
    pub fn unflatten(flattened: &str) -> Self {
        let mut params = Self::new();
        for segment in flattened.split(';') {
            if let Some((key, value)) = segment.split_once('=') {
                params.put(key, value);
            }
        }
        params
    }

    /// Serialize into the flattened form.
    #[must_use]
    pub fn flatten(&self) -> String {
        self.to_string()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a raw value.
    ///
    /// # Errors
    /// Returns [`CameraError::InvalidParameter`] if the key is empty, or if
    /// the key or value contains `=` or `;`, which the flattened form cannot
    /// carry.
    pub fn set(&mut self, key: &str, value: impl fmt::Display) -> Result<(), CameraError> {
        let value = value.to_string();
        if key.is_empty() || key.contains(['=', ';']) {
            return Err(CameraError::InvalidParameter(format!("key {key:?}")));
        }
        if value.contains(['=', ';']) {
            return Err(CameraError::InvalidParameter(format!(
                "value {value:?} for {key}"
            )));
        }
        self.put(key, value);
        Ok(())
    }

    /// Remove a value, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether a value reads as `true`, ignoring case.
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Whether the device declares VR preview mode support.
    #[must_use]
    pub fn vr_mode_supported(&self) -> bool {
        self.is_true(keys::VR_MODE_SUPPORTED)
    }

    /// Whether the device declares optical image stabilization.
    #[must_use]
    pub fn ois_supported(&self) -> bool {
        self.is_true(keys::OIS_SUPPORTED)
    }

    /// Preview frame size.
    #[must_use]
    pub fn preview_size(&self) -> Option<Resolution> {
        let (width, height) = self.get(keys::PREVIEW_SIZE)?.split_once('x')?;
        Some(Resolution::new(width.parse().ok()?, height.parse().ok()?))
    }

    /// Set the preview frame size.
    pub fn set_preview_size(&mut self, size: Resolution) {
        self.put(keys::PREVIEW_SIZE, size.to_string());
    }

    /// Preview frame-rate range, scaled by 1000.
    #[must_use]
    pub fn preview_fps_range(&self) -> Option<(u32, u32)> {
        let (min, max) = self.get(keys::PREVIEW_FPS_RANGE)?.split_once(',')?;
        Some((min.trim().parse().ok()?, max.trim().parse().ok()?))
    }

    /// Set the preview frame-rate range, scaled by 1000.
    pub fn set_preview_fps_range(&mut self, min: u32, max: u32) {
        self.put(keys::PREVIEW_FPS_RANGE, format!("{min},{max}"));
    }

    /// Video stabilization setting, if present.
    #[must_use]
    pub fn video_stabilization(&self) -> Option<bool> {
        self.get(keys::VIDEO_STABILIZATION)
            .map(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Enable or disable video stabilization.
    pub fn set_video_stabilization(&mut self, enabled: bool) {
        self.put(keys::VIDEO_STABILIZATION, enabled.to_string());
    }

    /// Set the recording hint.
    pub fn set_recording_hint(&mut self, hint: bool) {
        self.put(keys::RECORDING_HINT, hint.to_string());
    }

    /// Current focus mode, if present and recognised.
    #[must_use]
    pub fn focus_mode(&self) -> Option<FocusMode> {
        self.get(keys::FOCUS_MODE)?.parse().ok()
    }

    /// Set the focus mode.
    pub fn set_focus_mode(&mut self, mode: FocusMode) {
        self.put(keys::FOCUS_MODE, mode.as_str());
    }

    // Callers guarantee key and value are representable.
    fn put(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_owned(), value)),
        }
    }
}

impl fmt::Display for CameraParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl From<&str> for CameraParameters {
    fn from(flattened: &str) -> Self {
        Self::unflatten(flattened)
    }
}

/// Camera focus modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusMode {
    /// Single-shot auto focus.
    Auto,
    /// Focus fixed at infinity.
    Infinity,
    /// Close-up focus.
    Macro,
    /// Fixed-focus lens.
    Fixed,
    /// Extended depth of field.
    Edof,
    /// Continuous focus tuned for video.
    ContinuousVideo,
    /// Continuous focus tuned for stills.
    ContinuousPicture,
}

impl FocusMode {
    /// The platform parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Infinity => "infinity",
            Self::Macro => "macro",
            Self::Fixed => "fixed",
            Self::Edof => "edof",
            Self::ContinuousVideo => "continuous-video",
            Self::ContinuousPicture => "continuous-picture",
        }
    }
}

impl FromStr for FocusMode {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "auto" => Self::Auto,
            "infinity" => Self::Infinity,
            "macro" => Self::Macro,
            "fixed" => Self::Fixed,
            "edof" => Self::Edof,
            "continuous-video" => Self::ContinuousVideo,
            "continuous-picture" => Self::ContinuousPicture,
            other => return Err(CameraError::InvalidParameter(format!("focus mode {other:?}"))),
        })
    }
}
