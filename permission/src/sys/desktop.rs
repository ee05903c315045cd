//! Permission host for platforms without runtime permission prompts.
//!
//! On desktop systems camera access is governed by device node permissions
//! and user groups (e.g. 'video'), or by a sandbox portal outside the
//! application's control.

use crate::{PermissionError, PermissionHost};

/// Host for the current process on a platform without runtime permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl PermissionHost for SystemHost {
    fn runtime_permissions(&mut self) -> bool {
        false
    }

    fn check_self_permission(&mut self, _name: &str) -> Result<bool, PermissionError> {
        Ok(true)
    }

    fn request_permissions(
        &mut self,
        _names: &[&str],
        _request_code: i32,
    ) -> Result<(), PermissionError> {
        Ok(())
    }
}
