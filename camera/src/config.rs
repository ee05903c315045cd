use crate::{CameraError, FpsMode, Resolution};
use serde::{Deserialize, Serialize};

/// How parameters are applied when a session opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetupMode {
    /// Leave driver defaults; frame-rate modes are opt-in via
    /// [`VrCamera::configure_frame_rate`](crate::VrCamera::configure_frame_rate).
    #[default]
    Explicit,
    /// Apply the full preview profile on every open.
    ///
    /// See [`profile::apply_automatic`](crate::profile::apply_automatic).
    Automatic {
        /// Frame-rate mode written by the profile.
        mode: FpsMode,
    },
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Default surface buffer size set before parameters are applied.
    pub buffer_size: Option<Resolution>,
    /// Parameter setup on open.
    pub setup: SetupMode,
    /// Re-apply the last configured frame-rate mode when the session reopens.
    pub reapply_on_resume: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_size: Some(Resolution::FULL_HD),
            setup: SetupMode::Explicit,
            reapply_on_resume: true,
        }
    }
}

impl SessionConfig {
    /// Configuration that applies the full preview profile on open.
    #[must_use]
    pub fn automatic(mode: FpsMode) -> Self {
        Self {
            setup: SetupMode::Automatic { mode },
            ..Self::default()
        }
    }

    /// Set the default surface buffer size.
    #[must_use]
    pub const fn with_buffer_size(mut self, size: Option<Resolution>) -> Self {
        self.buffer_size = size;
        self
    }

    /// Enable or disable re-applying the frame-rate mode on resume.
    #[must_use]
    pub const fn with_reapply_on_resume(mut self, enabled: bool) -> Self {
        self.reapply_on_resume = enabled;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`CameraError::InvalidConfig`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, CameraError> {
        serde_json::from_str(json).map_err(|e| CameraError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
    }

    #[test]
    fn json_overrides_fields() {
        let config = SessionConfig::from_json(
            r#"{
                "buffer_size": { "width": 1280, "height": 720 },
                "setup": { "kind": "automatic", "mode": "fps120" },
                "reapply_on_resume": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.buffer_size, Some(Resolution::HD));
        assert_eq!(
            config.setup,
            SetupMode::Automatic {
                mode: FpsMode::Fps120
            }
        );
        assert!(!config.reapply_on_resume);
    }

    #[test]
    fn null_buffer_size_disables_resize() {
        let config = SessionConfig::from_json(r#"{ "buffer_size": null }"#).unwrap();
        assert_eq!(config.buffer_size, None);
    }

    #[test]
    fn malformed_json_is_invalid_config() {
        assert!(matches!(
            SessionConfig::from_json(r#"{ "setup": { "kind": "sometimes" } }"#),
            Err(CameraError::InvalidConfig(_))
        ));
    }
}
