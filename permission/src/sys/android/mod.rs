//! Android permission implementation using JNI.

use crate::{PermissionError, PermissionHost};
use jni::JNIEnv;
use jni::errors::Error as JniError;
use jni::objects::{JObject, JValue};
use jni::sys::jint;

/// `PackageManager.PERMISSION_GRANTED`.
const PERMISSION_GRANTED: jint = 0;

/// First API level with runtime permissions (Android 6.0).
const RUNTIME_PERMISSIONS_API: jint = 23;

/// Permission host backed by an Android `Activity`.
///
/// The `activity` must be a valid `android.app.Activity` for the lifetime of
/// the host.
#[derive(Debug)]
pub struct ActivityHost<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    activity: &'a JObject<'local>,
}

impl<'a, 'local> ActivityHost<'a, 'local> {
    /// Wrap an activity reference for permission calls.
    pub const fn new(env: &'a mut JNIEnv<'local>, activity: &'a JObject<'local>) -> Self {
        Self { env, activity }
    }

    fn sdk_int(&mut self) -> Result<jint, PermissionError> {
        self.env
            .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .map_err(|e| java_error(self.env, "Build.VERSION.SDK_INT", e))?
            .i()
            .map_err(|e| java_error(self.env, "SDK_INT result", e))
    }
}

impl PermissionHost for ActivityHost<'_, '_> {
    fn runtime_permissions(&mut self) -> bool {
        match self.sdk_int() {
            Ok(level) => level >= RUNTIME_PERMISSIONS_API,
            Err(err) => {
                log::warn!("assuming runtime permissions: {err}");
                true
            }
        }
    }

    fn check_self_permission(&mut self, name: &str) -> Result<bool, PermissionError> {
        let name = self
            .env
            .new_string(name)
            .map_err(|e| java_error(self.env, "new_string", e))?;

        let result = self
            .env
            .call_method(
                self.activity,
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&name)],
            )
            .map_err(|e| java_error(self.env, "checkSelfPermission", e))?
            .i()
            .map_err(|e| java_error(self.env, "checkSelfPermission result", e))?;

        Ok(result == PERMISSION_GRANTED)
    }

    fn request_permissions(
        &mut self,
        names: &[&str],
        request_code: i32,
    ) -> Result<(), PermissionError> {
        let length = jint::try_from(names.len())
            .map_err(|_| PermissionError::Platform("too many permissions".into()))?;

        let array = self
            .env
            .new_object_array(length, "java/lang/String", JObject::null())
            .map_err(|e| java_error(self.env, "new_object_array", e))?;

        for (index, name) in (0..length).zip(names) {
            let name = self
                .env
                .new_string(name)
                .map_err(|e| java_error(self.env, "new_string", e))?;
            self.env
                .set_object_array_element(&array, index, name)
                .map_err(|e| java_error(self.env, "set_object_array_element", e))?;
        }

        self.env
            .call_method(
                self.activity,
                "requestPermissions",
                "([Ljava/lang/String;I)V",
                &[JValue::Object(&array), JValue::Int(request_code)],
            )
            .map_err(|e| java_error(self.env, "requestPermissions", e))?;

        Ok(())
    }
}

/// Clear any pending Java exception and wrap the failure.
fn java_error(env: &mut JNIEnv, context: &str, err: JniError) -> PermissionError {
    if matches!(err, JniError::JavaException) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    PermissionError::Platform(format!("{context}: {err}"))
}
