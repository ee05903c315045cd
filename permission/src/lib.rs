//! Runtime permission handling.
//!
//! Permissions are checked and requested through a [`PermissionHost`], the
//! platform object that owns the permission prompt (an Android `Activity`, or
//! the process itself on platforms without runtime permissions).
//!
//! Requests are fire-and-forget: the platform delivers the user's answer
//! asynchronously to the host, so callers re-check with [`check`] before
//! retrying whatever needed the permission.

#![warn(missing_docs)]

/// Platform-specific implementations.
pub mod sys;

use thiserror::Error;

/// Request code attached to camera permission requests.
pub const CAMERA_PERMISSION_CODE: i32 = 0;

/// Types of permissions that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Permission {
    /// Access to device camera.
    Camera,
}

impl Permission {
    /// The platform name of this permission.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Camera => "android.permission.CAMERA",
        }
    }

    /// The request code attached to requests for this permission.
    #[must_use]
    pub const fn request_code(self) -> i32 {
        match self {
            Self::Camera => CAMERA_PERMISSION_CODE,
        }
    }
}

/// The current status of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionStatus {
    /// Permission has been granted by the user.
    Granted,
    /// Permission has not been granted (denied, or not asked yet).
    Denied,
}

/// Errors that can occur when talking to the permission host.
#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    /// The permission type is not supported on this platform.
    #[error("permission not supported on this platform")]
    NotSupported,
    /// The platform call failed.
    #[error("platform error: {0}")]
    Platform(String),
}

/// The object that owns permission state and prompts.
pub trait PermissionHost {
    /// Whether permissions are granted at runtime.
    ///
    /// When this returns `false`, permissions declared by the application are
    /// granted at install time and never prompted for.
    fn runtime_permissions(&mut self) -> bool;

    /// Check whether the named permission is currently granted.
    ///
    /// # Errors
    /// Returns [`PermissionError::Platform`] if the host cannot be queried.
    fn check_self_permission(&mut self, name: &str) -> Result<bool, PermissionError>;

    /// Ask the platform to prompt for the named permissions.
    ///
    /// The answer is delivered to the host later, tagged with `request_code`.
    ///
    /// # Errors
    /// Returns [`PermissionError::Platform`] if the request cannot be issued.
    fn request_permissions(&mut self, names: &[&str], request_code: i32)
    -> Result<(), PermissionError>;
}

/// Check the current status of a permission without requesting it.
///
/// Host failures are logged and reported as [`PermissionStatus::Denied`].
pub fn check<H: PermissionHost + ?Sized>(host: &mut H, permission: Permission) -> PermissionStatus {
    if !host.runtime_permissions() {
        return PermissionStatus::Granted;
    }

    match host.check_self_permission(permission.name()) {
        Ok(true) => PermissionStatus::Granted,
        Ok(false) => PermissionStatus::Denied,
        Err(err) => {
            log::error!("failed to check {}: {err}", permission.name());
            PermissionStatus::Denied
        }
    }
}

/// Request a permission from the user.
///
/// Does not wait for the answer.
///
/// # Errors
/// Returns a `PermissionError` if the host could not issue the request.
pub fn request<H: PermissionHost + ?Sized>(
    host: &mut H,
    permission: Permission,
) -> Result<(), PermissionError> {
    if !host.runtime_permissions() {
        return Ok(());
    }

    log::info!("requesting {}", permission.name());
    host.request_permissions(&[permission.name()], permission.request_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingHost {
        runtime: bool,
        granted: bool,
        broken: bool,
        checks: Vec<String>,
        requests: Vec<(Vec<String>, i32)>,
    }

    impl PermissionHost for RecordingHost {
        fn runtime_permissions(&mut self) -> bool {
            self.runtime
        }

        fn check_self_permission(&mut self, name: &str) -> Result<bool, PermissionError> {
            self.checks.push(name.to_owned());
            if self.broken {
                return Err(PermissionError::Platform("host detached".into()));
            }
            Ok(self.granted)
        }

        fn request_permissions(
            &mut self,
            names: &[&str],
            request_code: i32,
        ) -> Result<(), PermissionError> {
            self.requests
                .push((names.iter().map(|n| (*n).to_owned()).collect(), request_code));
            Ok(())
        }
    }

    #[test]
    fn install_time_permissions_are_granted_without_asking() {
        let mut host = RecordingHost::default();

        assert_eq!(check(&mut host, Permission::Camera), PermissionStatus::Granted);
        request(&mut host, Permission::Camera).unwrap();

        assert!(host.checks.is_empty());
        assert!(host.requests.is_empty());
    }

    #[test]
    fn runtime_check_reflects_host_answer() {
        let mut host = RecordingHost {
            runtime: true,
            ..RecordingHost::default()
        };
        assert_eq!(check(&mut host, Permission::Camera), PermissionStatus::Denied);

        host.granted = true;
        assert_eq!(check(&mut host, Permission::Camera), PermissionStatus::Granted);
        assert_eq!(host.checks, ["android.permission.CAMERA"; 2]);
    }

    #[test]
    fn host_failure_reads_as_denied() {
        let mut host = RecordingHost {
            runtime: true,
            granted: true,
            broken: true,
            ..RecordingHost::default()
        };
        assert_eq!(check(&mut host, Permission::Camera), PermissionStatus::Denied);
    }

    #[test]
    fn request_uses_camera_request_code() {
        let mut host = RecordingHost {
            runtime: true,
            ..RecordingHost::default()
        };
        request(&mut host, Permission::Camera).unwrap();

        assert_eq!(
            host.requests,
            vec![(vec!["android.permission.CAMERA".to_owned()], CAMERA_PERMISSION_CODE)]
        );
    }
}
