//! JNI bridge for vrkit camera sessions.
//!
//! The exported functions are only compiled for Android targets.
//! To build: cargo ndk -t arm64-v8a build -p vrkit-android
//!
//! The matching Java class is `com.mozilla.servo.VRCamera`, which declares
//! each exported function as a `private static native` method and keeps the
//! session handle returned by `nativeCreate` in a `long` field.

use vrkit_camera::{CameraError, FpsMode, SessionConfig};

#[cfg(target_os = "android")]
pub mod exports;

/// Frame-rate mode written on every open when Java passes no configuration.
pub const DEFAULT_FPS_MODE: FpsMode = FpsMode::Fps60;

/// Resolve the configuration passed to `nativeCreate`.
///
/// A missing configuration means the Java class's own behaviour: a
/// 1920x1080 buffer and the automatic profile at 60 fps on every open.
/// A JSON configuration starts from [`SessionConfig::default`] instead.
///
/// # Errors
/// Returns [`CameraError::InvalidConfig`] if the JSON is malformed.
pub fn session_config(json: Option<&str>) -> Result<SessionConfig, CameraError> {
    json.map_or_else(
        || Ok(SessionConfig::automatic(DEFAULT_FPS_MODE)),
        SessionConfig::from_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrkit_camera::{Resolution, SetupMode};

    #[test]
    fn missing_config_opens_like_the_java_class() {
        let config = session_config(None).unwrap();

        assert_eq!(config.buffer_size, Some(Resolution::FULL_HD));
        assert_eq!(
            config.setup,
            SetupMode::Automatic {
                mode: FpsMode::Fps60
            }
        );
        assert!(config.reapply_on_resume);
    }

    #[test]
    fn json_config_starts_from_library_defaults() {
        let config = session_config(Some(r#"{ "reapply_on_resume": false }"#)).unwrap();
        assert_eq!(config.setup, SetupMode::Explicit);
        assert!(!config.reapply_on_resume);
    }

    #[test]
    fn malformed_config_is_rejected() {
        assert!(matches!(
            session_config(Some("{")),
            Err(CameraError::InvalidConfig(_))
        ));
    }
}
