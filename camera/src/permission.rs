use vrkit_permission::{Permission, PermissionHost, PermissionStatus};

/// Whether the camera permission is granted to `actor`.
pub fn has_camera_permission<P: PermissionHost + ?Sized>(actor: &mut P) -> bool {
    vrkit_permission::check(actor, Permission::Camera) == PermissionStatus::Granted
}

/// Ask the platform to prompt `actor` for the camera permission.
///
/// Fire-and-forget: the answer arrives at the host later, so check again with
/// [`has_camera_permission`] before reopening the camera.
pub fn request_camera_permission<P: PermissionHost + ?Sized>(actor: &mut P) {
    if let Err(err) = vrkit_permission::request(actor, Permission::Camera) {
        log::error!("failed to request camera permission: {err}");
    }
}
